//! # Core Library
//!
//! Browser-independent logic of the ATM front-end: configuration, errors, the
//! wallet provider seam, the contract handle and the wallet session.

pub mod config;
pub mod contract;
pub mod error;
pub mod provider;
pub mod session;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use contract::{AtmContract, PendingTransaction};
pub use error::{AppError, Result};
pub use provider::Eip1193Provider;
pub use session::{OwnerDisplay, SessionSnapshot, SessionState, WalletSession};
