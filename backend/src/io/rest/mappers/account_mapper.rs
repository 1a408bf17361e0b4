use crate::domain::commands::accounts::{CreateAccountCommand, ListAccountsQuery, UpdateAccountCommand};
use crate::domain::models::account::{
    Account as DomainAccount, AccountStatus as DomainAccountStatus, AccountType as DomainAccountType,
};
use shared::{
    AccountListQuery, AccountStatus as SharedAccountStatus, AccountType as SharedAccountType,
    BankAccountRequest, BankAccountResponse,
};

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_create_command(dto: BankAccountRequest) -> CreateAccountCommand {
        CreateAccountCommand {
            account_number: dto.account_number,
            user_id: dto.user_id,
            account_type: Self::to_domain_type(dto.account_type),
            opening_balance: dto.balance,
            currency: dto.currency,
            status: Self::to_domain_status(dto.status),
        }
    }

    /// The request's balance is dropped here.
    pub fn to_update_command(dto: BankAccountRequest) -> UpdateAccountCommand {
        UpdateAccountCommand {
            account_number: dto.account_number,
            user_id: dto.user_id,
            account_type: Self::to_domain_type(dto.account_type),
            currency: dto.currency,
            status: Self::to_domain_status(dto.status),
        }
    }

    pub fn to_list_query(dto: AccountListQuery) -> ListAccountsQuery {
        ListAccountsQuery {
            page: dto.page,
            size: dto.size,
        }
    }

    pub fn to_dto(domain: DomainAccount) -> BankAccountResponse {
        BankAccountResponse {
            id: domain.id,
            account_number: domain.account_number,
            user_id: domain.user_id,
            account_type: Self::to_dto_type(domain.account_type),
            balance: domain.balance,
            currency: domain.currency,
            status: Self::to_dto_status(domain.status),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    fn to_domain_type(dto_type: SharedAccountType) -> DomainAccountType {
        match dto_type {
            SharedAccountType::Checking => DomainAccountType::Checking,
            SharedAccountType::Savings => DomainAccountType::Savings,
        }
    }

    fn to_dto_type(domain_type: DomainAccountType) -> SharedAccountType {
        match domain_type {
            DomainAccountType::Checking => SharedAccountType::Checking,
            DomainAccountType::Savings => SharedAccountType::Savings,
        }
    }

    fn to_domain_status(dto_status: SharedAccountStatus) -> DomainAccountStatus {
        match dto_status {
            SharedAccountStatus::Active => DomainAccountStatus::Active,
            SharedAccountStatus::Inactive => DomainAccountStatus::Inactive,
            SharedAccountStatus::Closed => DomainAccountStatus::Closed,
        }
    }

    fn to_dto_status(domain_status: DomainAccountStatus) -> SharedAccountStatus {
        match domain_status {
            DomainAccountStatus::Active => SharedAccountStatus::Active,
            DomainAccountStatus::Inactive => SharedAccountStatus::Inactive,
            DomainAccountStatus::Closed => SharedAccountStatus::Closed,
        }
    }
}
