//! # Domain Module
//!
//! Business rules for users, bank accounts and their transactions,
//! independent of HTTP and of the storage technology.
//!
//! ## Module Organization
//!
//! - **transaction_processor**: deposits, withdrawals and transaction lookups
//! - **account_service**: opening, updating, listing and deleting accounts
//! - **user_service**: customer records
//! - **account_locks**: per-account serialization of balance changes
//! - **commands**: internal input types for the services
//! - **errors**: the error taxonomy the IO layer translates to HTTP
//! - **models**: domain entities
//!
//! ## Business Rules
//!
//! - Amounts are exact decimals; deposits and withdrawals must be positive
//! - A balance never goes negative; an overdrawing withdrawal is recorded as
//!   FAILED and reported as insufficient funds
//! - Transactions are immutable once recorded
//! - Only the transaction processor changes a balance

pub mod account_locks;
pub mod account_service;
pub mod commands;
pub mod errors;
pub mod models;
pub mod transaction_processor;
pub mod user_service;

pub use account_locks::AccountLocks;
pub use account_service::AccountService;
pub use errors::{DomainError, DomainResult};
pub use transaction_processor::TransactionProcessor;
pub use user_service::UserService;
