//! Errors raised by the domain services.
use rust_decimal::Decimal;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidAmount(String),
    #[error("Bank account not found with id: {0}")]
    AccountNotFound(i64),
    #[error("Transaction not found with id: {0}")]
    TransactionNotFound(i64),
    #[error("User not found with id: {0}")]
    UserNotFound(i64),
    /// Raised after the FAILED withdrawal record has been written.
    #[error("Insufficient funds: cannot withdraw {requested} from account with balance {balance}")]
    InsufficientFunds {
        requested: Decimal,
        balance: Decimal,
        failed_transaction_id: i64,
    },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
