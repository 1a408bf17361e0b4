//! # Storage Module
//!
//! Persistence for users, bank accounts and the transaction log.
//!
//! The domain layer only sees the traits in [`traits`]; [`sqlite`] provides
//! the SQLite implementation built on sqlx. Decimal amounts are stored as
//! TEXT so no precision is lost on the way through the database.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{AccountStorage, Connection, LedgerStorage, TransactionStorage, UserStorage};
