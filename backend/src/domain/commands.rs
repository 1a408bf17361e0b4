//! Domain-level command and query types
//!
//! Used by services inside the domain layer and not exposed over the public
//! API. The REST layer maps the `shared` DTOs to these.

pub mod transactions {
    use rust_decimal::Decimal;

    /// Input for a deposit or a withdrawal
    #[derive(Debug, Clone)]
    pub struct TransactionCommand {
        pub account_id: i64,
        pub amount: Decimal,
        pub description: Option<String>,
    }
}

pub mod accounts {
    use crate::domain::models::account::{AccountStatus, AccountType};
    use rust_decimal::Decimal;

    /// Input for opening a new account
    #[derive(Debug, Clone)]
    pub struct CreateAccountCommand {
        pub account_number: String,
        pub user_id: i64,
        pub account_type: AccountType,
        pub opening_balance: Decimal,
        pub currency: String,
        pub status: AccountStatus,
    }

    /// Input for changing an account's descriptive fields
    #[derive(Debug, Clone)]
    pub struct UpdateAccountCommand {
        pub account_number: String,
        pub user_id: i64,
        pub account_type: AccountType,
        pub currency: String,
        pub status: AccountStatus,
    }

    #[derive(Debug, Clone, Default)]
    pub struct ListAccountsQuery {
        pub page: Option<u32>,
        pub size: Option<u32>,
    }
}

pub mod users {
    use chrono::NaiveDate;

    /// Input for creating or replacing a user's details
    #[derive(Debug, Clone)]
    pub struct UserCommand {
        pub first_name: String,
        pub last_name: String,
        pub email: String,
        pub phone_number: Option<String>,
        pub address: Option<String>,
        pub date_of_birth: NaiveDate,
    }
}
