use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};

use super::{decimal_column, enum_column};
use crate::domain::models::account::{Account, NewAccount};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::AccountStorage;

const ACCOUNT_COLUMNS: &str =
    "id, account_number, user_id, account_type, balance, currency, status, version, created_at, updated_at";

/// Repository for bank account operations
#[derive(Clone)]
pub struct AccountRepository {
    db: DbConnection,
}

impl AccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn account_from_row(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: row.try_get("id")?,
        account_number: row.try_get("account_number")?,
        user_id: row.try_get("user_id")?,
        account_type: enum_column(row, "account_type")?,
        balance: decimal_column(row, "balance")?,
        currency: row.try_get("currency")?,
        status: enum_column(row, "status")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl AccountStorage for AccountRepository {
    async fn create_account(&self, account: &NewAccount) -> Result<Account> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO bank_accounts (account_number, user_id, account_type, balance, currency, status, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&account.account_number)
        .bind(account.user_id)
        .bind(account.account_type.as_str())
        .bind(account.balance.to_string())
        .bind(&account.currency)
        .bind(account.status.as_str())
        .bind(now)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        Ok(Account {
            id: result.last_insert_rowid(),
            account_number: account.account_number.clone(),
            user_id: account.user_id,
            account_type: account.account_type,
            balance: account.balance,
            currency: account.currency.clone(),
            status: account.status,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_account(&self, account_id: i64) -> Result<Option<Account>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bank_accounts WHERE id = ?",
            ACCOUNT_COLUMNS
        ))
        .bind(account_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_account_by_number(&self, account_number: &str) -> Result<Option<Account>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM bank_accounts WHERE account_number = ?",
            ACCOUNT_COLUMNS
        ))
        .bind(account_number)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn save_account(&self, account: &Account) -> Result<Account> {
        let now = Utc::now();
        // Balance is only written on insert.
        sqlx::query(
            r#"
            INSERT INTO bank_accounts (id, account_number, user_id, account_type, balance, currency, status, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                account_number = excluded.account_number,
                user_id = excluded.user_id,
                account_type = excluded.account_type,
                currency = excluded.currency,
                status = excluded.status,
                version = bank_accounts.version + 1,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(account.id)
        .bind(&account.account_number)
        .bind(account.user_id)
        .bind(account.account_type.as_str())
        .bind(account.balance.to_string())
        .bind(&account.currency)
        .bind(account.status.as_str())
        .bind(account.version)
        .bind(account.created_at)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        self.find_account(account.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Bank account {} vanished after save", account.id))
    }

    async fn account_exists(&self, account_id: i64) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM bank_accounts WHERE id = ?")
            .bind(account_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.is_some())
    }

    async fn delete_account(&self, account_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bank_accounts WHERE id = ?")
            .bind(account_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_accounts(&self, page: u32, size: u32) -> Result<Vec<Account>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM bank_accounts ORDER BY id ASC LIMIT ? OFFSET ?",
            ACCOUNT_COLUMNS
        ))
        .bind(size as i64)
        .bind(page as i64 * size as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(account_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::account::{AccountStatus, AccountType};
    use crate::domain::models::user::NewUser;
    use crate::storage::sqlite::repositories::UserRepository;
    use crate::storage::traits::UserStorage;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn setup_test() -> (AccountRepository, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user = UserRepository::new(db.clone())
            .create_user(&NewUser {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: "grace@example.com".to_string(),
                phone_number: None,
                address: None,
                date_of_birth: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
            })
            .await
            .unwrap();
        (AccountRepository::new(db), user.id)
    }

    fn new_account(user_id: i64, number: &str) -> NewAccount {
        NewAccount {
            account_number: number.to_string(),
            user_id,
            account_type: AccountType::Checking,
            balance: dec!(100.00),
            currency: "USD".to_string(),
            status: AccountStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_account() {
        let (repo, user_id) = setup_test().await;

        let created = repo.create_account(&new_account(user_id, "1234567890")).await.unwrap();
        let found = repo.find_account(created.id).await.unwrap().expect("account should exist");

        assert_eq!(found.balance, dec!(100.00));
        assert_eq!(found.balance.to_string(), "100.00");
        assert_eq!(found.account_type, AccountType::Checking);
        assert_eq!(found.version, 0);

        let by_number = repo.find_account_by_number("1234567890").await.unwrap();
        assert_eq!(by_number.map(|a| a.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_save_account_keeps_stored_balance() {
        let (repo, user_id) = setup_test().await;
        let mut account = repo.create_account(&new_account(user_id, "111")).await.unwrap();

        account.status = AccountStatus::Inactive;
        account.balance = dec!(1000000);
        let saved = repo.save_account(&account).await.unwrap();

        assert_eq!(saved.status, AccountStatus::Inactive);
        assert_eq!(saved.balance, dec!(100.00));
        assert_eq!(saved.version, 1);
        assert!(saved.updated_at >= account.created_at);
    }

    #[tokio::test]
    async fn test_duplicate_account_number_is_rejected() {
        let (repo, user_id) = setup_test().await;
        repo.create_account(&new_account(user_id, "dup")).await.unwrap();

        assert!(repo.create_account(&new_account(user_id, "dup")).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_account() {
        let (repo, user_id) = setup_test().await;
        let account = repo.create_account(&new_account(user_id, "bye")).await.unwrap();

        assert!(repo.delete_account(account.id).await.unwrap());
        assert!(!repo.account_exists(account.id).await.unwrap());
        assert!(!repo.delete_account(account.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_accounts_pages_by_id() {
        let (repo, user_id) = setup_test().await;
        for n in 0..5 {
            repo.create_account(&new_account(user_id, &format!("acc-{}", n))).await.unwrap();
        }

        let first = repo.list_accounts(0, 2).await.unwrap();
        let third = repo.list_accounts(2, 2).await.unwrap();
        let beyond = repo.list_accounts(3, 2).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].account_number, "acc-0");
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].account_number, "acc-4");
        assert!(beyond.is_empty());
    }
}
