//! Shared fixtures for tests that need a populated database.
//!
//! Each [`TestEnvironment`] owns its own in-memory SQLite database, so tests
//! never see each other's rows.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::models::account::{Account, AccountStatus, AccountType, NewAccount};
use crate::domain::models::user::{NewUser, User};
use crate::storage::{AccountStorage, Connection, DbConnection, UserStorage};

pub struct TestEnvironment {
    pub connection: Arc<DbConnection>,
    /// Owner for accounts created through [`TestEnvironment::create_account`]
    pub user: User,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let connection = Arc::new(DbConnection::init_test().await?);
        let user = connection
            .create_user_repository()
            .create_user(&NewUser {
                first_name: "Test".to_string(),
                last_name: "Customer".to_string(),
                email: "customer@example.com".to_string(),
                phone_number: None,
                address: None,
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
            })
            .await?;

        Ok(Self { connection, user })
    }

    /// Open a USD checking account for the fixture user
    pub async fn create_account(&self, account_number: &str, balance: Decimal) -> Result<Account> {
        self.connection
            .create_account_repository()
            .create_account(&NewAccount {
                account_number: account_number.to_string(),
                user_id: self.user.id,
                account_type: AccountType::Checking,
                balance,
                currency: "USD".to_string(),
                status: AccountStatus::Active,
            })
            .await
    }

    /// Current stored balance of an account
    pub async fn balance_of(&self, account_id: i64) -> Result<Decimal> {
        let account = self
            .connection
            .create_account_repository()
            .find_account(account_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("account {} not found", account_id))?;
        Ok(account.balance)
    }
}
