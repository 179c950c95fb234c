//! Metrics collection for observability
//!
//! Prometheus metrics for monitoring the ledger.
//!
//! # Metrics
//!
//! - `rewards_users_created_total` - Users created
//! - `rewards_receipts_processed_total` - Receipts successfully scanned
//! - `rewards_duplicate_receipts_total` - Scans rejected as duplicates
//! - `rewards_drop_minted_total` - DROP credited by scans
//! - `rewards_drop_burned_total` - DROP debited by redemptions
//! - `rewards_redemptions_total` - Successful redemptions

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector
///
/// Each collector owns its registry so independent ledgers (tests spin up
/// several per process) never collide on collector names.
#[derive(Clone)]
pub struct Metrics {
    /// Users created
    pub users_created: IntCounter,

    /// Receipts successfully processed
    pub receipts_processed: IntCounter,

    /// Duplicate-receipt rejections
    pub duplicate_receipts: IntCounter,

    /// DROP minted by scans
    pub drop_minted: IntCounter,

    /// DROP burned by redemptions
    pub drop_burned: IntCounter,

    /// Successful redemptions
    pub redemptions: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let users_created =
            IntCounter::new("rewards_users_created_total", "Users created")?;
        registry.register(Box::new(users_created.clone()))?;

        let receipts_processed = IntCounter::new(
            "rewards_receipts_processed_total",
            "Receipts successfully scanned",
        )?;
        registry.register(Box::new(receipts_processed.clone()))?;

        let duplicate_receipts = IntCounter::new(
            "rewards_duplicate_receipts_total",
            "Scans rejected as duplicates",
        )?;
        registry.register(Box::new(duplicate_receipts.clone()))?;

        let drop_minted =
            IntCounter::new("rewards_drop_minted_total", "DROP credited by scans")?;
        registry.register(Box::new(drop_minted.clone()))?;

        let drop_burned =
            IntCounter::new("rewards_drop_burned_total", "DROP debited by redemptions")?;
        registry.register(Box::new(drop_burned.clone()))?;

        let redemptions =
            IntCounter::new("rewards_redemptions_total", "Successful redemptions")?;
        registry.register(Box::new(redemptions.clone()))?;

        Ok(Self {
            users_created,
            receipts_processed,
            duplicate_receipts,
            drop_minted,
            drop_burned,
            redemptions,
            registry,
        })
    }

    /// Record user creation
    pub fn record_user_created(&self) {
        self.users_created.inc();
    }

    /// Record a successful scan
    pub fn record_receipt_scanned(&self, drop_earned: u64) {
        self.receipts_processed.inc();
        self.drop_minted.inc_by(drop_earned);
    }

    /// Record a duplicate-receipt rejection
    pub fn record_duplicate_receipt(&self) {
        self.duplicate_receipts.inc();
    }

    /// Record a successful redemption
    pub fn record_reward_redeemed(&self, drop_burned: u64) {
        self.redemptions.inc();
        self.drop_burned.inc_by(drop_burned);
    }

    /// Export all metrics in Prometheus text format
    pub fn export(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.users_created.get(), 0);
        assert_eq!(metrics.receipts_processed.get(), 0);
    }

    #[test]
    fn test_record_receipt_scanned() {
        let metrics = Metrics::new().unwrap();
        metrics.record_receipt_scanned(100);
        metrics.record_receipt_scanned(50);

        assert_eq!(metrics.receipts_processed.get(), 2);
        assert_eq!(metrics.drop_minted.get(), 150);
    }

    #[test]
    fn test_record_reward_redeemed() {
        let metrics = Metrics::new().unwrap();
        metrics.record_reward_redeemed(30);
        assert_eq!(metrics.redemptions.get(), 1);
        assert_eq!(metrics.drop_burned.get(), 30);
    }

    #[test]
    fn test_independent_collectors() {
        // Two collectors in one process must not collide
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_user_created();
        assert_eq!(a.users_created.get(), 1);
        assert_eq!(b.users_created.get(), 0);
    }

    #[test]
    fn test_export_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_user_created();
        let text = metrics.export().unwrap();
        assert!(text.contains("rewards_users_created_total 1"));
    }
}
