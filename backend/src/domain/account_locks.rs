//! Per-account mutual exclusion for balance changes.
//!
//! Deposits and withdrawals read an account, compute a new balance and write
//! it back. Holding the account's guard for that whole sequence serializes
//! operations on the same account while leaving other accounts untouched.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct AccountLocks {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `account_id`. Released when the guard drops.
    pub async fn lock(&self, account_id: i64) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the map shard is not held across the await.
        let lock = self
            .locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop the entry for an account that no longer exists
    pub fn forget(&self, account_id: i64) {
        self.locks.remove(&account_id);
    }
}
