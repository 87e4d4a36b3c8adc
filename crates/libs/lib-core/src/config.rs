//! # Application Configuration
//!
//! The ATM front-end has no runtime configuration source: values are baked in at
//! build time through `option_env!`, falling back to the local Hardhat deployment.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Build variable | Meaning | Default |
//! |---|---|---|
//! | `ATM_CONTRACT_ADDRESS` | Deployed Assessment contract | `0x5FbDB2315678afecb367f032d93F642f64180aa3` |
//! | `ATM_POLL_INTERVAL_MS` | Receipt polling interval | `500` |
//! | `ATM_MAX_CONFIRMATION_POLLS` | Receipt polls before giving up | unset (wait indefinitely) |
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().expect("invalid build configuration");
//! let contract = core_config().contract_address;
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use alloy_primitives::{address, Address};

/// Hardhat's first deployment address on a fresh node.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Application configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Address of the deployed Assessment contract
    pub contract_address: Address,

    /// Delay between `eth_getTransactionReceipt` polls
    pub poll_interval: Duration,

    /// Upper bound on receipt polls; `None` waits until the transaction is mined.
    pub max_confirmation_polls: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_confirmation_polls: None,
        }
    }
}

impl Config {
    /// Load configuration from variables captured at compile time.
    pub fn from_build_env() -> Result<Self, String> {
        Self::from_values(
            option_env!("ATM_CONTRACT_ADDRESS"),
            option_env!("ATM_POLL_INTERVAL_MS"),
            option_env!("ATM_MAX_CONFIRMATION_POLLS"),
        )
    }

    /// Build configuration from raw optional strings; `None` selects the default.
    pub fn from_values(
        contract_address: Option<&str>,
        poll_interval_ms: Option<&str>,
        max_confirmation_polls: Option<&str>,
    ) -> Result<Self, String> {
        let defaults = Self::default();

        let contract_address = match contract_address {
            Some(raw) => raw
                .trim()
                .parse::<Address>()
                .map_err(|e| format!("ATM_CONTRACT_ADDRESS must be a 20-byte hex address: {}", e))?,
            None => defaults.contract_address,
        };

        let poll_interval = match poll_interval_ms {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse()
                    .map_err(|e| format!("ATM_POLL_INTERVAL_MS must be a valid number: {}", e))?,
            ),
            None => defaults.poll_interval,
        };

        let max_confirmation_polls = match max_confirmation_polls {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|e| format!("ATM_MAX_CONFIRMATION_POLLS must be a valid number: {}", e))?,
            ),
            None => defaults.max_confirmation_polls,
        };

        Ok(Self {
            contract_address,
            poll_interval,
            max_confirmation_polls,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.contract_address == Address::ZERO {
            return Err("ATM_CONTRACT_ADDRESS must not be the zero address".to_string());
        }

        if self.poll_interval.is_zero() || self.poll_interval > Duration::from_secs(60) {
            return Err("ATM_POLL_INTERVAL_MS must be between 1 and 60000".to_string());
        }

        if self.max_confirmation_polls == Some(0) {
            return Err("ATM_MAX_CONFIRMATION_POLLS must be at least 1 when set".to_string());
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration from the build environment.
///
/// # Errors
///
/// Returns an error if:
/// - A build variable is malformed
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<(), String> {
    let config = Config::from_build_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration.
///
/// Falls back to [`Config::default`] when [`init_config()`] was never called.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
