//! DropRewards Ledger Core
//!
//! In-memory dual-token (DROP/DRF) rewards ledger for the loyalty platform.
//!
//! # Architecture
//!
//! - **Keyed critical sections**: All per-user mutations run under the
//!   user's store entry guard, so credits and debits never race
//! - **Receipt deduplication**: Claiming a receipt hash is a single
//!   atomic check-and-insert, the one integrity guarantee against
//!   double-crediting
//! - **Commutative counters**: Platform aggregates are atomic increments;
//!   only final totals are observable
//!
//! # Invariants
//!
//! - DROP balances never go negative; a debit that would underflow is
//!   rejected before any mutation
//! - At most one successful scan per receipt hash, across all callers
//! - Failed operations mutate nothing

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod store;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::{Ledger, RedeemOutcome, ScanOutcome};
pub use store::{LedgerStore, MemoryStore};
pub use types::{
    BalanceView, EventKind, PlatformStats, Receipt, RewardEvent, UserAccount, UserProfile,
};
