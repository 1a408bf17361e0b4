use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqliteExecutor};

use super::{decimal_column, enum_column};
use crate::domain::models::transaction::{NewTransaction, Transaction};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::TransactionStorage;

/// Repository for transaction operations
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn transaction_from_row(row: &SqliteRow) -> Result<Transaction> {
    Ok(Transaction {
        id: row.try_get("id")?,
        account_id: row.try_get("bank_account_id")?,
        amount: decimal_column(row, "amount")?,
        transaction_type: enum_column(row, "transaction_type")?,
        status: enum_column(row, "status")?,
        description: row.try_get("description")?,
        timestamp: row.try_get("timestamp")?,
    })
}

/// Insert a transaction row on any executor, so the ledger repository can
/// reuse it inside its own database transaction.
pub(crate) async fn insert_transaction<'e, E>(
    executor: E,
    transaction: &NewTransaction,
    timestamp: DateTime<Utc>,
) -> Result<Transaction>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query::<Sqlite>(
        r#"
        INSERT INTO transactions (bank_account_id, amount, transaction_type, status, description, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(transaction.account_id)
    .bind(transaction.amount.to_string())
    .bind(transaction.transaction_type.as_str())
    .bind(transaction.status.as_str())
    .bind(&transaction.description)
    .bind(timestamp)
    .execute(executor)
    .await?;

    Ok(Transaction {
        id: result.last_insert_rowid(),
        account_id: transaction.account_id,
        amount: transaction.amount,
        transaction_type: transaction.transaction_type,
        status: transaction.status,
        description: transaction.description.clone(),
        timestamp,
    })
}

#[async_trait]
impl TransactionStorage for TransactionRepository {
    async fn save_transaction(&self, transaction: &NewTransaction) -> Result<Transaction> {
        insert_transaction(self.db.pool(), transaction, Utc::now()).await
    }

    async fn find_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, bank_account_id, amount, transaction_type, status, description, timestamp
            FROM transactions
            WHERE id = ?
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(transaction_from_row).transpose()
    }

    async fn find_transactions_by_account(&self, account_id: i64) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, bank_account_id, amount, transaction_type, status, description, timestamp
            FROM transactions
            WHERE bank_account_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(transaction_from_row).collect()
    }

    async fn count_transactions_for_account(&self, account_id: i64) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE bank_account_id = ?")
            .bind(account_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(u64::try_from(count)?)
    }
}
