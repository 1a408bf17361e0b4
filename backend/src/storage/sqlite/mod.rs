//! # SQLite Storage Module
//!
//! - **connection.rs** - pool creation and schema setup
//! - **repositories/** - one repository per aggregate, plus the ledger
//!   repository that writes balance changes atomically

pub mod connection;
pub mod repositories;

use crate::storage::traits::Connection;

pub use connection::DbConnection;
pub use repositories::{AccountRepository, LedgerRepository, TransactionRepository, UserRepository};

impl Connection for DbConnection {
    type UserRepository = UserRepository;
    type AccountRepository = AccountRepository;
    type TransactionRepository = TransactionRepository;
    type LedgerRepository = LedgerRepository;

    fn create_user_repository(&self) -> Self::UserRepository {
        UserRepository::new(self.clone())
    }

    fn create_account_repository(&self) -> Self::AccountRepository {
        AccountRepository::new(self.clone())
    }

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        TransactionRepository::new(self.clone())
    }

    fn create_ledger_repository(&self) -> Self::LedgerRepository {
        LedgerRepository::new(self.clone())
    }
}
