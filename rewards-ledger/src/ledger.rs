//! Main ledger orchestration layer
//!
//! This module ties the store, configuration, and metrics together into
//! the high-level API for reward processing.
//!
//! # Example
//!
//! ```
//! use rewards_ledger::{Config, Ledger};
//!
//! fn main() -> rewards_ledger::Result<()> {
//!     let ledger = Ledger::new(Config::default())?;
//!
//!     let user = ledger.create_user("ada@example.com", "0xada")?;
//!     let outcome = ledger.scan_receipt(user.user_id, "sha256:abc", 10_000)?;
//!     assert_eq!(outcome.drop_earned, 100);
//!
//!     Ok(())
//! }
//! ```

use crate::{
    config::Config,
    metrics::Metrics,
    store::{LedgerStore, MemoryStore},
    types::{
        BalanceView, EventKind, PlatformStats, Receipt, RewardEvent, UserAccount, UserProfile,
    },
    Error, Result,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Result of a successful receipt scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    /// DROP credited to the user
    pub drop_earned: u64,
    /// The stored receipt record
    pub receipt: Receipt,
}

/// Result of a successful reward redemption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemOutcome {
    /// DROP debited from the user
    pub drop_burned: u64,
    /// Echo of the caller-supplied reward label
    pub reward_type: String,
}

/// Main ledger interface
pub struct Ledger {
    /// Store capability (in-memory by default)
    store: Arc<dyn LedgerStore>,

    /// Prometheus metrics
    metrics: Metrics,

    /// Configuration
    config: Config,
}

impl Ledger {
    /// Create a ledger over the default in-memory store
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(MemoryStore::new(&config.stats));
        Self::with_store(config, store)
    }

    /// Create a ledger over an injected store
    pub fn with_store(config: Config, store: Arc<dyn LedgerStore>) -> Result<Self> {
        let metrics = Metrics::new()
            .map_err(|e| Error::Other(format!("Failed to register metrics: {}", e)))?;

        Ok(Self {
            store,
            metrics,
            config,
        })
    }

    /// Create a user with the welcome bonuses and an empty event log
    pub fn create_user(
        &self,
        email: impl Into<String>,
        wallet_address: impl Into<String>,
    ) -> Result<UserProfile> {
        let user = UserAccount::new(
            email.into(),
            wallet_address.into(),
            self.config.welcome.drop_bonus,
            self.config.welcome.drf_bonus,
        );
        let profile = user.profile();

        self.store.insert_user(user)?;
        self.metrics.record_user_created();

        tracing::info!(user_id = %profile.user_id, "User created");

        Ok(profile)
    }

    /// Current DROP and DRF balances; pure read
    pub fn get_balance(&self, user_id: Uuid) -> Result<BalanceView> {
        Ok(self.store.get_user(user_id)?.balances())
    }

    /// Most-recent-first snapshot of a user's event log
    pub fn get_events(&self, user_id: Uuid, limit: Option<usize>) -> Result<Vec<RewardEvent>> {
        let user = self.store.get_user(user_id)?;
        let take = limit.unwrap_or(usize::MAX);
        Ok(user.events.iter().take(take).cloned().collect())
    }

    /// Credit a reward for a scanned receipt
    ///
    /// The existence lookup, overflow check, hash claim, and credit all
    /// run inside the user's critical section, with every check ahead of
    /// the first mutation. A scan that fails mutates nothing: a rejected
    /// hash stays unclaimed, a claimed hash is always credited.
    pub fn scan_receipt(
        &self,
        user_id: Uuid,
        receipt_hash: impl Into<String>,
        purchase_amount: u64,
    ) -> Result<ScanOutcome> {
        let receipt_hash = receipt_hash.into();
        let drop_earned = self.drop_earned_for(purchase_amount);

        let receipt = Receipt {
            receipt_id: Uuid::new_v4(),
            user_id,
            receipt_hash: receipt_hash.clone(),
            purchase_amount,
            drop_earned,
            processed_at: Utc::now(),
        };

        let applied = self.store.with_user_mut(user_id, &mut |user| {
            // The credit must be known to fit before the hash is claimed
            let new_balance = user
                .drop_balance
                .checked_add(drop_earned)
                .ok_or(Error::BalanceOverflow { credit: drop_earned })?;

            // At most one caller wins a given hash
            self.store.claim_receipt(receipt.clone())?;

            user.drop_balance = new_balance;
            user.push_event(EventKind::ReceiptScanned {
                receipt_id: receipt.receipt_id,
                receipt_hash: receipt.receipt_hash.clone(),
                purchase_amount,
                drop_earned,
            });
            Ok(())
        });

        if let Err(e) = applied {
            if matches!(e, Error::DuplicateReceipt(_)) {
                self.metrics.record_duplicate_receipt();
            }
            return Err(e);
        }

        self.store.add_drop_minted(drop_earned);
        self.store.inc_receipts_processed();
        self.metrics.record_receipt_scanned(drop_earned);

        tracing::info!(
            user_id = %user_id,
            receipt_id = %receipt.receipt_id,
            drop_earned,
            "Receipt scanned"
        );

        Ok(ScanOutcome {
            drop_earned,
            receipt,
        })
    }

    /// Burn DROP for a reward redemption
    ///
    /// The balance check and debit run as one critical section per user;
    /// concurrent redemptions cannot drive the balance negative.
    pub fn redeem_reward(
        &self,
        user_id: Uuid,
        reward_type: impl Into<String>,
        drop_amount: u64,
    ) -> Result<RedeemOutcome> {
        let reward_type = reward_type.into();

        self.store.with_user_mut(user_id, &mut |user| {
            if user.drop_balance < drop_amount {
                return Err(Error::InsufficientBalance {
                    requested: drop_amount,
                    available: user.drop_balance,
                });
            }

            user.drop_balance -= drop_amount;
            user.push_event(EventKind::RewardRedeemed {
                reward_type: reward_type.clone(),
                drop_burned: drop_amount,
            });
            Ok(())
        })?;

        self.store.add_drop_burned(drop_amount);
        self.metrics.record_reward_redeemed(drop_amount);

        tracing::info!(
            user_id = %user_id,
            reward_type = %reward_type,
            drop_burned = drop_amount,
            "Reward redeemed"
        );

        Ok(RedeemOutcome {
            drop_burned: drop_amount,
            reward_type,
        })
    }

    /// Current platform aggregate; pure read
    pub fn platform_stats(&self) -> PlatformStats {
        self.store.platform_stats()
    }

    /// Number of user records held by the store
    pub fn user_count(&self) -> usize {
        self.store.user_count()
    }

    /// Metrics collector (for the /metrics endpoint)
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Integer fixed-point reward math: `amount * bps / 10_000`, floored
    ///
    /// Equivalent to `floor(amount * 0.01)` at the default 100 bps, without
    /// the floating-point round trip.
    pub fn drop_earned_for(&self, purchase_amount: u64) -> u64 {
        let bps = self.config.reward.earn_rate_bps as u128;
        ((purchase_amount as u128 * bps) / 10_000) as u64
    }
}
