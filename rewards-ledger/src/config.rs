//! Configuration for the rewards ledger

use serde::{Deserialize, Serialize};

/// Ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Welcome bonus configuration
    pub welcome: WelcomeConfig,

    /// Reward accrual configuration
    pub reward: RewardConfig,

    /// Seed values for the platform aggregate
    pub stats: StatsSeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "rewards-ledger".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            welcome: WelcomeConfig::default(),
            reward: RewardConfig::default(),
            stats: StatsSeedConfig::default(),
        }
    }
}

/// Balances granted to every new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeConfig {
    /// DROP granted at creation
    pub drop_bonus: u64,

    /// DRF granted at creation
    pub drf_bonus: u64,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        Self {
            drop_bonus: 1_000,
            drf_bonus: 10_000,
        }
    }
}

/// Reward accrual parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Earn rate in basis points of the purchase amount (100 = 1%)
    pub earn_rate_bps: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self { earn_rate_bps: 100 }
    }
}

/// Seed values for the process-wide aggregate counters
///
/// The demo platform starts its public stats from non-zero totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSeedConfig {
    /// Seed for total DROP minted
    pub total_drop_minted: u64,

    /// Seed for total DROP burned
    pub total_drop_burned: u64,

    /// Seed for total receipts processed
    pub total_receipts_processed: u64,

    /// DRF treasury balance constant
    pub drf_treasury_balance: u64,
}

impl Default for StatsSeedConfig {
    fn default() -> Self {
        Self {
            total_drop_minted: 2_500_000,
            total_drop_burned: 180_000,
            total_receipts_processed: 12_400,
            drf_treasury_balance: 100_000_000,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(bonus) = std::env::var("REWARDS_WELCOME_DROP") {
            config.welcome.drop_bonus = bonus
                .parse()
                .map_err(|e| crate::Error::Config(format!("REWARDS_WELCOME_DROP: {}", e)))?;
        }

        if let Ok(bonus) = std::env::var("REWARDS_WELCOME_DRF") {
            config.welcome.drf_bonus = bonus
                .parse()
                .map_err(|e| crate::Error::Config(format!("REWARDS_WELCOME_DRF: {}", e)))?;
        }

        if let Ok(bps) = std::env::var("REWARDS_EARN_RATE_BPS") {
            config.reward.earn_rate_bps = bps
                .parse()
                .map_err(|e| crate::Error::Config(format!("REWARDS_EARN_RATE_BPS: {}", e)))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "rewards-ledger");
        assert_eq!(config.welcome.drop_bonus, 1_000);
        assert_eq!(config.welcome.drf_bonus, 10_000);
        assert_eq!(config.reward.earn_rate_bps, 100);
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            service_name = "rewards-ledger"
            service_version = "0.1.0"

            [welcome]
            drop_bonus = 500
            drf_bonus = 5000

            [reward]
            earn_rate_bps = 200

            [stats]
            total_drop_minted = 0
            total_drop_burned = 0
            total_receipts_processed = 0
            drf_treasury_balance = 1000
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.welcome.drop_bonus, 500);
        assert_eq!(config.reward.earn_rate_bps, 200);
        assert_eq!(config.stats.drf_treasury_balance, 1000);
    }
}
