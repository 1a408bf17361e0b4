use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;

use super::transaction_repository::insert_transaction;
use crate::domain::models::account::Account;
use crate::domain::models::transaction::{NewTransaction, Transaction};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::LedgerStorage;

/// Repository that writes a balance change and its transaction record
/// in a single database transaction
#[derive(Clone)]
pub struct LedgerRepository {
    db: DbConnection,
}

impl LedgerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerStorage for LedgerRepository {
    async fn apply_balance_change(
        &self,
        account: &Account,
        new_balance: Decimal,
        transaction: &NewTransaction,
    ) -> Result<(Account, Transaction)> {
        let now = Utc::now();
        let mut db_tx = self.db.pool().begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE bank_accounts
            SET balance = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(new_balance.to_string())
        .bind(now)
        .bind(account.id)
        .bind(account.version)
        .execute(&mut *db_tx)
        .await?;

        if updated.rows_affected() == 0 {
            warn!(
                "Balance write for account {} rejected: expected version {}",
                account.id, account.version
            );
            db_tx.rollback().await?;
            bail!("Bank account {} was modified concurrently", account.id);
        }

        let recorded = insert_transaction(&mut *db_tx, transaction, now).await?;
        db_tx.commit().await?;

        let account = Account {
            balance: new_balance,
            version: account.version + 1,
            updated_at: now,
            ..account.clone()
        };
        Ok((account, recorded))
    }
}
