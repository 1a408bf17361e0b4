//! Conversions between `shared` DTOs and domain types.

pub mod account_mapper;
pub mod transaction_mapper;
pub mod user_mapper;

pub use account_mapper::AccountMapper;
pub use transaction_mapper::TransactionMapper;
pub use user_mapper::UserMapper;
