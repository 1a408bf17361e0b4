//! # Storage Traits
//!
//! Storage abstractions the domain layer is written against. Every function
//! returns `anyhow::Result`; a missing row is `Ok(None)`, not an error.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::models::{
    account::{Account, NewAccount},
    transaction::{NewTransaction, Transaction},
    user::{NewUser, User},
};

/// Trait defining the interface for user storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a new user; storage assigns the id and timestamps
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Retrieve a user by ID
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    /// Overwrite an existing user's fields and refresh `updated_at`
    async fn save_user(&self, user: &User) -> Result<User>;

    async fn user_exists(&self, user_id: i64) -> Result<bool>;
}

/// Trait defining the interface for bank account storage operations
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Insert a new account with its opening balance
    async fn create_account(&self, account: &NewAccount) -> Result<Account>;

    /// Retrieve an account by ID
    async fn find_account(&self, account_id: i64) -> Result<Option<Account>>;

    async fn find_account_by_number(&self, account_number: &str) -> Result<Option<Account>>;

    /// Upsert by id and refresh `updated_at`.
    ///
    /// When the row already exists its balance is left as stored; balances
    /// only move through [`LedgerStorage::apply_balance_change`].
    async fn save_account(&self, account: &Account) -> Result<Account>;

    async fn account_exists(&self, account_id: i64) -> Result<bool>;

    /// Returns true if a row was deleted
    async fn delete_account(&self, account_id: i64) -> Result<bool>;

    /// One page of accounts ordered by id
    async fn list_accounts(&self, page: u32, size: u32) -> Result<Vec<Account>>;
}

/// Trait defining the interface for transaction storage operations
///
/// Transactions are append-only: there is no update or delete.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Record a transaction; storage assigns the id and timestamp
    async fn save_transaction(&self, transaction: &NewTransaction) -> Result<Transaction>;

    async fn find_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>>;

    /// All transactions of an account in the order they were recorded
    async fn find_transactions_by_account(&self, account_id: i64) -> Result<Vec<Transaction>>;

    async fn count_transactions_for_account(&self, account_id: i64) -> Result<u64>;
}

/// Atomic balance changes
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Write `new_balance` to `account` and record `transaction` as one unit.
    ///
    /// The balance write only applies if the stored row still has
    /// `account.version`; otherwise nothing is written and an error is
    /// returned.
    async fn apply_balance_change(
        &self,
        account: &Account,
        new_balance: Decimal,
        transaction: &NewTransaction,
    ) -> Result<(Account, Transaction)>;
}

/// Trait defining the interface for storage connections
///
/// Factory for the repositories of one storage backend, so domain services
/// stay generic over where the data lives.
pub trait Connection: Send + Sync + Clone {
    type UserRepository: UserStorage + Clone;
    type AccountRepository: AccountStorage + Clone;
    type TransactionRepository: TransactionStorage + Clone;
    type LedgerRepository: LedgerStorage + Clone;

    fn create_user_repository(&self) -> Self::UserRepository;
    fn create_account_repository(&self) -> Self::AccountRepository;
    fn create_transaction_repository(&self) -> Self::TransactionRepository;
    fn create_ledger_repository(&self) -> Self::LedgerRepository;
}
