//! Domain entities for users, bank accounts and transactions.

pub mod account;
pub mod transaction;
pub mod user;
