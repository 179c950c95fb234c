//! Core types for the rewards ledger
//!
//! All types serialize with serde; field names are camelCase on the wire
//! to match the platform's public API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// A user's full ledger record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Unique user ID, assigned at creation, immutable
    pub user_id: Uuid,

    /// Contact email (opaque, unvalidated)
    pub email: String,

    /// On-chain wallet address (opaque, unvalidated)
    pub wallet_address: String,

    /// DROP reward-point balance; never observed negative
    pub drop_balance: u64,

    /// DRF balance; no in-scope operation mutates it
    pub drf_balance: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Event log, most-recent-first, append-only from the front
    pub events: VecDeque<RewardEvent>,
}

impl UserAccount {
    /// Create a fresh account with the configured welcome bonuses
    pub fn new(email: String, wallet_address: String, welcome_drop: u64, welcome_drf: u64) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email,
            wallet_address,
            drop_balance: welcome_drop,
            drf_balance: welcome_drf,
            created_at: Utc::now(),
            events: VecDeque::new(),
        }
    }

    /// Sanitized view returned by user creation (balances omitted)
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            email: self.email.clone(),
            wallet_address: self.wallet_address.clone(),
            created_at: self.created_at,
        }
    }

    /// Balance view for the balance read
    pub fn balances(&self) -> BalanceView {
        BalanceView {
            drop_balance: self.drop_balance,
            drf_balance: self.drf_balance,
        }
    }

    /// Record an event at the front of the log
    pub fn push_event(&mut self, kind: EventKind) {
        self.events.push_front(RewardEvent {
            event_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            kind,
        });
    }
}

/// Sanitized user view (id, contact, creation time)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique user ID
    pub user_id: Uuid,
    /// Contact email
    pub email: String,
    /// Wallet address
    pub wallet_address: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The two token balances of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceView {
    /// DROP balance
    pub drop_balance: u64,
    /// DRF balance
    pub drf_balance: u64,
}

/// A deduplicated proof-of-purchase record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Unique receipt ID
    pub receipt_id: Uuid,

    /// Owning user (lookup only; the ledger does not manage user
    /// lifecycle through this reference)
    pub user_id: Uuid,

    /// Caller-supplied dedup key, globally unique across all receipts
    pub receipt_hash: String,

    /// Purchase amount in the smallest currency unit, trusted as supplied
    pub purchase_amount: u64,

    /// DROP credited for this receipt
    pub drop_earned: u64,

    /// Processing timestamp
    pub processed_at: DateTime<Utc>,
}

/// An entry in a user's event log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEvent {
    /// Unique event ID
    pub event_id: Uuid,

    /// When the event was recorded
    pub recorded_at: DateTime<Utc>,

    /// Type-specific payload
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Event payload, tagged by event type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A receipt was scanned and DROP credited
    #[serde(rename_all = "camelCase")]
    ReceiptScanned {
        /// Receipt created by the scan
        receipt_id: Uuid,
        /// Dedup key of the receipt
        receipt_hash: String,
        /// Purchase amount in the smallest currency unit
        purchase_amount: u64,
        /// DROP credited
        drop_earned: u64,
    },

    /// DROP was burned for a reward redemption
    #[serde(rename_all = "camelCase")]
    RewardRedeemed {
        /// Opaque caller-supplied reward label
        reward_type: String,
        /// DROP debited
        drop_burned: u64,
    },
}

/// Process-wide aggregate counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    /// Total DROP ever minted (monotonic)
    pub total_drop_minted: u64,

    /// Total DROP ever burned (monotonic)
    pub total_drop_burned: u64,

    /// Total receipts successfully processed (monotonic)
    pub total_receipts_processed: u64,

    /// DRF treasury balance; a seed constant, unaffected by in-scope
    /// operations
    pub drf_treasury_balance: u64,
}
