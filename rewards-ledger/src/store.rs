//! Store abstraction and in-memory implementation
//!
//! The ledger depends on the [`LedgerStore`] capability rather than a
//! process-global mapping, so the in-memory store can later be swapped
//! for a transactional backend without touching operation logic.
//!
//! # Atomicity
//!
//! - `with_user_mut` runs its closure while holding the user's entry
//!   guard; all mutations to one user are serialized through it
//! - `claim_receipt` is a single check-and-insert on the receipt hash;
//!   at most one caller ever wins a given hash
//! - Aggregate counters are relaxed, saturating atomic increments; only
//!   final totals are meaningful and they never wrap

use crate::{
    error::{Error, Result},
    types::{PlatformStats, Receipt, UserAccount},
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Closure type for per-user critical sections
pub type UserMutFn<'a> = &'a mut dyn FnMut(&mut UserAccount) -> Result<()>;

/// Storage capability the ledger operates against
pub trait LedgerStore: Send + Sync {
    /// Insert a freshly created user
    fn insert_user(&self, user: UserAccount) -> Result<()>;

    /// Snapshot of a user record
    fn get_user(&self, user_id: Uuid) -> Result<UserAccount>;

    /// Run `op` as one critical section over the user's record
    ///
    /// If `op` returns an error the record must be left as `op` left it;
    /// callers are expected to mutate only after their own checks pass.
    fn with_user_mut(&self, user_id: Uuid, op: UserMutFn<'_>) -> Result<()>;

    /// Atomically claim a receipt hash; fails with [`Error::DuplicateReceipt`]
    /// when the hash was already processed
    fn claim_receipt(&self, receipt: Receipt) -> Result<()>;

    /// Look up a processed receipt by hash
    fn get_receipt(&self, receipt_hash: &str) -> Option<Receipt>;

    /// Add to the total-minted counter
    fn add_drop_minted(&self, amount: u64);

    /// Add to the total-burned counter
    fn add_drop_burned(&self, amount: u64);

    /// Bump the processed-receipts counter
    fn inc_receipts_processed(&self);

    /// Current aggregate totals
    fn platform_stats(&self) -> PlatformStats;

    /// Number of user records
    fn user_count(&self) -> usize;
}

/// In-memory store backed by sharded maps
///
/// Lives for the process lifetime; restart loses all state. This is the
/// demo backend, not a durable system.
pub struct MemoryStore {
    // Map: user_id -> account
    users: DashMap<Uuid, UserAccount>,

    // Map: receipt_hash -> receipt (dedup set + lookup)
    receipts: DashMap<String, Receipt>,

    total_drop_minted: AtomicU64,
    total_drop_burned: AtomicU64,
    total_receipts_processed: AtomicU64,
    drf_treasury_balance: u64,
}

impl MemoryStore {
    /// Create a store seeded with the platform's starting totals
    pub fn new(seed: &crate::config::StatsSeedConfig) -> Self {
        Self {
            users: DashMap::new(),
            receipts: DashMap::new(),
            total_drop_minted: AtomicU64::new(seed.total_drop_minted),
            total_drop_burned: AtomicU64::new(seed.total_drop_burned),
            total_receipts_processed: AtomicU64::new(seed.total_receipts_processed),
            drf_treasury_balance: seed.drf_treasury_balance,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(&crate::config::StatsSeedConfig::default())
    }
}

impl LedgerStore for MemoryStore {
    fn insert_user(&self, user: UserAccount) -> Result<()> {
        let user_id = user.user_id;
        self.users.insert(user_id, user);

        tracing::debug!(user_id = %user_id, "User record inserted");
        Ok(())
    }

    fn get_user(&self, user_id: Uuid) -> Result<UserAccount> {
        self.users
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))
    }

    fn with_user_mut(&self, user_id: Uuid, op: UserMutFn<'_>) -> Result<()> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;

        op(entry.value_mut())
    }

    fn claim_receipt(&self, receipt: Receipt) -> Result<()> {
        match self.receipts.entry(receipt.receipt_hash.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateReceipt(receipt.receipt_hash)),
            Entry::Vacant(slot) => {
                slot.insert(receipt);
                Ok(())
            }
        }
    }

    fn get_receipt(&self, receipt_hash: &str) -> Option<Receipt> {
        self.receipts
            .get(receipt_hash)
            .map(|entry| entry.value().clone())
    }

    fn add_drop_minted(&self, amount: u64) {
        saturating_add(&self.total_drop_minted, amount);
    }

    fn add_drop_burned(&self, amount: u64) {
        saturating_add(&self.total_drop_burned, amount);
    }

    fn inc_receipts_processed(&self) {
        saturating_add(&self.total_receipts_processed, 1);
    }

    fn platform_stats(&self) -> PlatformStats {
        PlatformStats {
            total_drop_minted: self.total_drop_minted.load(Ordering::Relaxed),
            total_drop_burned: self.total_drop_burned.load(Ordering::Relaxed),
            total_receipts_processed: self.total_receipts_processed.load(Ordering::Relaxed),
            drf_treasury_balance: self.drf_treasury_balance,
        }
    }

    fn user_count(&self) -> usize {
        self.users.len()
    }
}

// Monotonic counters pin at u64::MAX instead of wrapping
fn saturating_add(counter: &AtomicU64, amount: u64) {
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
        Some(v.saturating_add(amount))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_store() -> MemoryStore {
        let seed = crate::config::StatsSeedConfig {
            total_drop_minted: 0,
            total_drop_burned: 0,
            total_receipts_processed: 0,
            drf_treasury_balance: 500,
        };
        MemoryStore::new(&seed)
    }

    fn test_user() -> UserAccount {
        UserAccount::new("a@b.c".into(), "0xabc".into(), 1000, 10000)
    }

    fn test_receipt(hash: &str) -> Receipt {
        Receipt {
            receipt_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            receipt_hash: hash.to_string(),
            purchase_amount: 10_000,
            drop_earned: 100,
            processed_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_get_user() {
        let store = test_store();
        let user = test_user();
        let user_id = user.user_id;

        store.insert_user(user).unwrap();

        let retrieved = store.get_user(user_id).unwrap();
        assert_eq!(retrieved.user_id, user_id);
        assert_eq!(retrieved.drop_balance, 1000);
    }

    #[test]
    fn test_get_missing_user() {
        let store = test_store();
        let result = store.get_user(Uuid::new_v4());
        assert!(matches!(result, Err(Error::UserNotFound(_))));
    }

    #[test]
    fn test_with_user_mut() {
        let store = test_store();
        let user = test_user();
        let user_id = user.user_id;
        store.insert_user(user).unwrap();

        store
            .with_user_mut(user_id, &mut |u| {
                u.drop_balance += 100;
                Ok(())
            })
            .unwrap();

        assert_eq!(store.get_user(user_id).unwrap().drop_balance, 1100);
    }

    #[test]
    fn test_claim_receipt_once() {
        let store = test_store();

        store.claim_receipt(test_receipt("h1")).unwrap();
        let second = store.claim_receipt(test_receipt("h1"));
        assert!(matches!(second, Err(Error::DuplicateReceipt(_))));

        // Different hash still goes through
        store.claim_receipt(test_receipt("h2")).unwrap();
        assert!(store.get_receipt("h1").is_some());
    }

    #[test]
    fn test_concurrent_claims_single_winner() {
        use std::sync::Arc;

        let store = Arc::new(test_store());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                store.claim_receipt(test_receipt("contested")).is_ok()
            }));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let store = test_store();
        store.add_drop_minted(u64::MAX);
        store.add_drop_minted(10);
        store.add_drop_burned(u64::MAX - 5);
        store.add_drop_burned(100);

        let stats = store.platform_stats();
        assert_eq!(stats.total_drop_minted, u64::MAX);
        assert_eq!(stats.total_drop_burned, u64::MAX);
    }

    #[test]
    fn test_stats_counters() {
        let store = test_store();
        store.add_drop_minted(100);
        store.add_drop_minted(50);
        store.add_drop_burned(30);
        store.inc_receipts_processed();
        store.inc_receipts_processed();

        let stats = store.platform_stats();
        assert_eq!(stats.total_drop_minted, 150);
        assert_eq!(stats.total_drop_burned, 30);
        assert_eq!(stats.total_receipts_processed, 2);
        assert_eq!(stats.drf_treasury_balance, 500);
    }
}
