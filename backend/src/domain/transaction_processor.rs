//! Deposits, withdrawals and transaction lookups.
//!
//! Every balance change runs as one unit of work: the account's lock is taken,
//! the account is read, the new balance is computed, and the balance write plus
//! the transaction record are committed together by
//! [`LedgerStorage::apply_balance_change`]. A withdrawal that would overdraw
//! the account is recorded as FAILED before `InsufficientFunds` is returned, so
//! callers must not assume an error means nothing was written.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    account_locks::AccountLocks,
    commands::transactions::TransactionCommand,
    errors::{DomainError, DomainResult},
    models::{
        account::Account,
        transaction::{NewTransaction, Transaction, TransactionType},
    },
};
use crate::storage::{AccountStorage, Connection, LedgerStorage, TransactionStorage};

#[derive(Clone)]
pub struct TransactionProcessor<C: Connection> {
    account_repository: C::AccountRepository,
    transaction_repository: C::TransactionRepository,
    ledger_repository: C::LedgerRepository,
    locks: AccountLocks,
}

impl<C: Connection> TransactionProcessor<C> {
    pub fn new(connection: Arc<C>, locks: AccountLocks) -> Self {
        Self {
            account_repository: connection.create_account_repository(),
            transaction_repository: connection.create_transaction_repository(),
            ledger_repository: connection.create_ledger_repository(),
            locks,
        }
    }

    pub async fn deposit(&self, command: TransactionCommand) -> DomainResult<Transaction> {
        ensure_positive(command.amount, "Deposit amount must be positive")?;

        let _guard = self.locks.lock(command.account_id).await;
        let account = self.load_account(command.account_id).await?;

        let new_balance = account.balance.checked_add(command.amount).ok_or_else(|| {
            warn!("Deposit of {} into account {} would overflow its balance", command.amount, account.id);
            DomainError::InvalidAmount(format!(
                "Deposit of {} would exceed the maximum balance of account {}",
                command.amount, account.id
            ))
        })?;
        let record = NewTransaction::completed(
            account.id,
            command.amount,
            TransactionType::Deposit,
            command.description,
        );
        let (_, transaction) = self
            .ledger_repository
            .apply_balance_change(&account, new_balance, &record)
            .await?;

        info!(
            "Deposited {} into account {} (balance {} -> {}), transaction {}",
            command.amount, account.id, account.balance, new_balance, transaction.id
        );
        Ok(transaction)
    }

    pub async fn withdraw(&self, command: TransactionCommand) -> DomainResult<Transaction> {
        ensure_positive(command.amount, "Withdrawal amount must be positive")?;

        let _guard = self.locks.lock(command.account_id).await;
        let account = self.load_account(command.account_id).await?;

        if account.balance < command.amount {
            let failed = self
                .transaction_repository
                .save_transaction(&NewTransaction::insufficient_funds(
                    account.id,
                    command.amount,
                    command.description.as_deref(),
                ))
                .await?;

            warn!(
                "Withdrawal of {} from account {} rejected: balance {}, recorded failed transaction {}",
                command.amount, account.id, account.balance, failed.id
            );
            return Err(DomainError::InsufficientFunds {
                requested: command.amount,
                balance: account.balance,
                failed_transaction_id: failed.id,
            });
        }

        let new_balance = account.balance - command.amount;
        let record = NewTransaction::completed(
            account.id,
            command.amount,
            TransactionType::Withdrawal,
            command.description,
        );
        let (_, transaction) = self
            .ledger_repository
            .apply_balance_change(&account, new_balance, &record)
            .await?;

        info!(
            "Withdrew {} from account {} (balance {} -> {}), transaction {}",
            command.amount, account.id, account.balance, new_balance, transaction.id
        );
        Ok(transaction)
    }

    pub async fn get_transaction_by_id(&self, transaction_id: i64) -> DomainResult<Transaction> {
        self.transaction_repository
            .find_transaction(transaction_id)
            .await?
            .ok_or(DomainError::TransactionNotFound(transaction_id))
    }

    /// All transactions of an account in storage order
    pub async fn get_transactions_for_account(&self, account_id: i64) -> DomainResult<Vec<Transaction>> {
        if !self.account_repository.account_exists(account_id).await? {
            return Err(DomainError::AccountNotFound(account_id));
        }
        Ok(self
            .transaction_repository
            .find_transactions_by_account(account_id)
            .await?)
    }

    async fn load_account(&self, account_id: i64) -> DomainResult<Account> {
        self.account_repository
            .find_account(account_id)
            .await?
            .ok_or(DomainError::AccountNotFound(account_id))
    }
}

fn ensure_positive(amount: Decimal, message: &str) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::transaction::{TransactionStatus, INSUFFICIENT_FUNDS_PREFIX};
    use crate::storage::DbConnection;
    use crate::test_utils::TestEnvironment;
    use rust_decimal_macros::dec;

    async fn setup() -> (TestEnvironment, TransactionProcessor<DbConnection>) {
        let env = TestEnvironment::new().await.expect("Failed to create test environment");
        let processor = TransactionProcessor::new(env.connection.clone(), AccountLocks::new());
        (env, processor)
    }

    fn command(account_id: i64, amount: Decimal, description: Option<&str>) -> TransactionCommand {
        TransactionCommand {
            account_id,
            amount,
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_deposit_increases_balance_and_records_completed() {
        let (env, processor) = setup().await;
        let account = env.create_account("DEP-1", dec!(100.00)).await.unwrap();

        let tx = processor
            .deposit(command(account.id, dec!(50.00), Some("Birthday money")))
            .await
            .unwrap();

        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.transaction_type, TransactionType::Deposit);
        assert_eq!(tx.amount, dec!(50.00));
        assert_eq!(tx.account_id, account.id);
        assert_eq!(tx.description.as_deref(), Some("Birthday money"));
        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(150.00));

        let history = processor.get_transactions_for_account(account.id).await.unwrap();
        assert_eq!(history, vec![tx]);
    }

    #[tokio::test]
    async fn test_deposit_refreshes_update_timestamp() {
        let (env, processor) = setup().await;
        let account = env.create_account("DEP-2", dec!(0)).await.unwrap();

        processor.deposit(command(account.id, dec!(1), None)).await.unwrap();

        let stored = env
            .connection
            .create_account_repository()
            .find_account(account.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.updated_at >= account.updated_at);
        assert_eq!(stored.created_at, account.created_at);
    }

    #[tokio::test]
    async fn test_non_positive_deposit_is_rejected_without_record() {
        let (env, processor) = setup().await;
        let account = env.create_account("DEP-3", dec!(100.00)).await.unwrap();

        for amount in [dec!(0), dec!(-5)] {
            let err = processor.deposit(command(account.id, amount, None)).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidAmount(_)), "unexpected error: {:?}", err);
        }

        assert!(processor.get_transactions_for_account(account.id).await.unwrap().is_empty());
        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(100.00));
    }

    #[tokio::test]
    async fn test_deposit_overflowing_balance_is_rejected_without_record() {
        let (env, processor) = setup().await;
        let account = env.create_account("MAX-1", Decimal::MAX).await.unwrap();

        let err = processor.deposit(command(account.id, Decimal::ONE, None)).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidAmount(_)), "unexpected error: {:?}", err);
        assert!(processor.get_transactions_for_account(account.id).await.unwrap().is_empty());
        assert_eq!(env.balance_of(account.id).await.unwrap(), Decimal::MAX);
    }

    #[tokio::test]
    async fn test_deposit_to_missing_account() {
        let (_env, processor) = setup().await;

        let err = processor.deposit(command(404, dec!(10), None)).await.unwrap_err();

        assert!(matches!(err, DomainError::AccountNotFound(404)));
    }

    #[tokio::test]
    async fn test_withdraw_within_balance() {
        let (env, processor) = setup().await;
        let account = env.create_account("WD-1", dec!(100.00)).await.unwrap();

        let tx = processor
            .withdraw(command(account.id, dec!(100.00), Some("Rent")))
            .await
            .unwrap();

        assert_eq!(tx.status, TransactionStatus::Completed);
        assert_eq!(tx.transaction_type, TransactionType::Withdrawal);
        assert_eq!(tx.description.as_deref(), Some("Rent"));
        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(0.00));
    }

    #[tokio::test]
    async fn test_overdraft_records_failed_transaction_and_errors() {
        let (env, processor) = setup().await;
        let account = env.create_account("WD-2", dec!(100.00)).await.unwrap();

        let err = processor
            .withdraw(command(account.id, dec!(150.00), Some("New bike")))
            .await
            .unwrap_err();

        let failed_id = match err {
            DomainError::InsufficientFunds {
                requested,
                balance,
                failed_transaction_id,
            } => {
                assert_eq!(requested, dec!(150.00));
                assert_eq!(balance, dec!(100.00));
                failed_transaction_id
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        };

        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(100.00));

        let history = processor.get_transactions_for_account(account.id).await.unwrap();
        assert_eq!(history.len(), 1);
        let failed = &history[0];
        assert_eq!(failed.id, failed_id);
        assert_eq!(failed.status, TransactionStatus::Failed);
        assert_eq!(failed.transaction_type, TransactionType::Withdrawal);
        assert_eq!(failed.amount, dec!(150.00));
        assert_eq!(
            failed.description.as_deref(),
            Some(format!("{}New bike", INSUFFICIENT_FUNDS_PREFIX).as_str())
        );
    }

    #[tokio::test]
    async fn test_non_positive_withdrawal_is_rejected_without_record() {
        let (env, processor) = setup().await;
        let account = env.create_account("WD-3", dec!(10)).await.unwrap();

        let err = processor.withdraw(command(account.id, dec!(-1), None)).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidAmount(_)));
        assert!(processor.get_transactions_for_account(account.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_from_missing_account_creates_nothing() {
        let (_env, processor) = setup().await;

        let err = processor.withdraw(command(77, dec!(1), None)).await.unwrap_err();

        assert!(matches!(err, DomainError::AccountNotFound(77)));
        assert!(matches!(
            processor.get_transaction_by_id(1).await,
            Err(DomainError::TransactionNotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_balance_matches_completed_history() {
        let (env, processor) = setup().await;
        let opening = dec!(20.00);
        let account = env.create_account("HIST-1", opening).await.unwrap();

        processor.deposit(command(account.id, dec!(5.25), None)).await.unwrap();
        processor.withdraw(command(account.id, dec!(10.00), None)).await.unwrap();
        let _ = processor.withdraw(command(account.id, dec!(500), None)).await;
        processor.deposit(command(account.id, dec!(0.75), None)).await.unwrap();

        let history = processor.get_transactions_for_account(account.id).await.unwrap();
        let replayed = history
            .iter()
            .filter(|t| t.status == TransactionStatus::Completed)
            .fold(opening, |balance, t| match t.transaction_type {
                TransactionType::Deposit => balance + t.amount,
                TransactionType::Withdrawal => balance - t.amount,
            });

        assert_eq!(history.len(), 4);
        assert_eq!(replayed, dec!(16.00));
        assert_eq!(env.balance_of(account.id).await.unwrap(), replayed);
    }

    #[tokio::test]
    async fn test_get_transaction_by_id_is_repeatable() {
        let (env, processor) = setup().await;
        let account = env.create_account("GET-1", dec!(0)).await.unwrap();
        let tx = processor.deposit(command(account.id, dec!(3), None)).await.unwrap();

        let first = processor.get_transaction_by_id(tx.id).await.unwrap();
        let second = processor.get_transaction_by_id(tx.id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, tx);
        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(3));
    }

    #[tokio::test]
    async fn test_transactions_for_missing_account() {
        let (_env, processor) = setup().await;

        let err = processor.get_transactions_for_account(9).await.unwrap_err();

        assert!(matches!(err, DomainError::AccountNotFound(9)));
    }

    #[tokio::test]
    async fn test_concurrent_deposits_lose_no_update() {
        let (env, processor) = setup().await;
        let account = env.create_account("CONC-1", dec!(0)).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let processor = processor.clone();
                tokio::spawn(async move { processor.deposit(command(account.id, dec!(1.50), None)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(30.00));
        assert_eq!(
            processor.get_transactions_for_account(account.id).await.unwrap().len(),
            20
        );
    }

    #[tokio::test]
    async fn test_concurrent_withdrawals_never_overdraw() {
        let (env, processor) = setup().await;
        let account = env.create_account("CONC-2", dec!(10)).await.unwrap();

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let processor = processor.clone();
                tokio::spawn(async move { processor.withdraw(command(account.id, dec!(4), None)).await })
            })
            .collect();
        let mut completed = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => completed += 1,
                Err(DomainError::InsufficientFunds { .. }) => rejected += 1,
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(completed, 2);
        assert_eq!(rejected, 3);
        assert_eq!(env.balance_of(account.id).await.unwrap(), dec!(2));
    }
}
