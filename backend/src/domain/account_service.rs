use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    account_locks::AccountLocks,
    commands::accounts::{CreateAccountCommand, ListAccountsQuery, UpdateAccountCommand},
    errors::{DomainError, DomainResult},
    models::account::{Account, NewAccount},
};
use crate::storage::{AccountStorage, Connection, TransactionStorage, UserStorage};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Service for opening, describing and closing bank accounts.
///
/// Balances are read-only here: the opening balance is set on creation and
/// every later change goes through the transaction processor.
#[derive(Clone)]
pub struct AccountService<C: Connection> {
    account_repository: C::AccountRepository,
    transaction_repository: C::TransactionRepository,
    user_repository: C::UserRepository,
    locks: AccountLocks,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>, locks: AccountLocks) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            transaction_repository: connection.create_transaction_repository(),
            user_repository: connection.create_user_repository(),
            locks,
        }
    }

    pub async fn create_account(&self, command: CreateAccountCommand) -> DomainResult<Account> {
        info!("Creating bank account {} for user {}", command.account_number, command.user_id);

        validate_account_fields(&command.account_number, &command.currency)?;
        if command.opening_balance < Decimal::ZERO {
            return Err(DomainError::Validation("Balance must not be negative".to_string()));
        }
        self.ensure_user_exists(command.user_id).await?;
        self.ensure_number_free(&command.account_number, None).await?;

        let account = self
            .account_repository
            .create_account(&NewAccount {
                account_number: command.account_number.trim().to_string(),
                user_id: command.user_id,
                account_type: command.account_type,
                balance: command.opening_balance,
                currency: command.currency,
                status: command.status,
            })
            .await?;

        info!("Created bank account {} with ID: {}", account.account_number, account.id);
        Ok(account)
    }

    pub async fn get_account(&self, account_id: i64) -> DomainResult<Account> {
        info!("Fetching bank account with id: {}", account_id);
        self.account_repository
            .find_account(account_id)
            .await?
            .ok_or(DomainError::AccountNotFound(account_id))
    }

    pub async fn list_accounts(&self, query: ListAccountsQuery) -> DomainResult<Vec<Account>> {
        let page = query.page.unwrap_or(0);
        let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        info!("Listing bank accounts: page={}, size={}", page, size);

        Ok(self.account_repository.list_accounts(page, size).await?)
    }

    /// Replace an account's descriptive fields. The balance is never touched.
    pub async fn update_account(&self, account_id: i64, command: UpdateAccountCommand) -> DomainResult<Account> {
        info!("Updating bank account with id {}", account_id);

        validate_account_fields(&command.account_number, &command.currency)?;

        let _guard = self.locks.lock(account_id).await;
        let mut account = self.get_account(account_id).await?;

        if account.user_id != command.user_id {
            self.ensure_user_exists(command.user_id).await?;
        }
        self.ensure_number_free(&command.account_number, Some(account_id)).await?;

        account.account_number = command.account_number.trim().to_string();
        account.user_id = command.user_id;
        account.account_type = command.account_type;
        account.currency = command.currency;
        account.status = command.status;

        Ok(self.account_repository.save_account(&account).await?)
    }

    /// Delete an account. Accounts with recorded transactions are kept.
    pub async fn delete_account(&self, account_id: i64) -> DomainResult<()> {
        info!("Deleting bank account with id: {}", account_id);

        let _guard = self.locks.lock(account_id).await;
        if !self.account_repository.account_exists(account_id).await? {
            warn!("Bank account not found with id: {}", account_id);
            return Err(DomainError::AccountNotFound(account_id));
        }

        let history = self
            .transaction_repository
            .count_transactions_for_account(account_id)
            .await?;
        if history > 0 {
            warn!("Refusing to delete bank account {} with {} transactions", account_id, history);
            return Err(DomainError::Conflict(format!(
                "Bank account {} has {} recorded transactions and cannot be deleted",
                account_id, history
            )));
        }

        self.account_repository.delete_account(account_id).await?;
        self.locks.forget(account_id);
        info!("Bank account deleted with id: {}", account_id);
        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: i64) -> DomainResult<()> {
        if !self.user_repository.user_exists(user_id).await? {
            return Err(DomainError::UserNotFound(user_id));
        }
        Ok(())
    }

    async fn ensure_number_free(&self, account_number: &str, owner: Option<i64>) -> DomainResult<()> {
        match self
            .account_repository
            .find_account_by_number(account_number.trim())
            .await?
        {
            Some(existing) if Some(existing.id) != owner => Err(DomainError::Conflict(format!(
                "Account number {} is already in use",
                account_number.trim()
            ))),
            _ => Ok(()),
        }
    }
}

fn validate_account_fields(account_number: &str, currency: &str) -> DomainResult<()> {
    if account_number.trim().is_empty() {
        return Err(DomainError::Validation("Account number must not be blank".to_string()));
    }
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::Validation(format!(
            "Currency must be a 3-letter ISO code, got '{}'",
            currency
        )));
    }
    Ok(())
}
