//! Domain model for a deposit or withdrawal record.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Prefix put in front of the caller's description when a withdrawal bounces
pub const INSUFFICIENT_FUNDS_PREFIX: &str = "Failed withdrawal: insufficient funds. ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// Terminal status. A transaction is decided before it is written and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "FAILED" => Ok(TransactionStatus::Failed),
            other => Err(format!("Unknown transaction status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A transaction about to be recorded; storage assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub account_id: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn completed(
        account_id: i64,
        amount: Decimal,
        transaction_type: TransactionType,
        description: Option<String>,
    ) -> Self {
        Self {
            account_id,
            amount,
            transaction_type,
            status: TransactionStatus::Completed,
            description,
        }
    }

    /// Record of a withdrawal rejected for lack of funds
    pub fn insufficient_funds(account_id: i64, amount: Decimal, description: Option<&str>) -> Self {
        Self {
            account_id,
            amount,
            transaction_type: TransactionType::Withdrawal,
            status: TransactionStatus::Failed,
            description: Some(format!(
                "{}{}",
                INSUFFICIENT_FUNDS_PREFIX,
                description.unwrap_or_default()
            )),
        }
    }
}
