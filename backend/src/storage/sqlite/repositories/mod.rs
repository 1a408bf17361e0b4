// Repository modules
pub mod account_repository;
pub mod ledger_repository;
pub mod transaction_repository;
pub mod user_repository;

// Re-export repository types
pub use account_repository::AccountRepository;
pub use ledger_repository::LedgerRepository;
pub use transaction_repository::TransactionRepository;
pub use user_repository::UserRepository;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};
use std::str::FromStr;

/// Read a decimal stored as TEXT
fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).with_context(|| format!("Invalid decimal in column {}: {}", column, raw))
}

/// Read an enum stored as its upper-case name
fn enum_column<T: FromStr<Err = String>>(row: &SqliteRow, column: &str) -> Result<T> {
    let raw: String = row.try_get(column)?;
    raw.parse::<T>().map_err(anyhow::Error::msg)
}
