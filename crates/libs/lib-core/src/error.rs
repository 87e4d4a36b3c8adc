//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] returned by every wallet
//! session and contract operation. It follows the `thiserror` pattern for
//! ergonomic error handling.
//!
//! ## Design Philosophy
//!
//! - **Single Error Type**: Session, contract and provider code all return `AppError`
//! - **Typed Outcomes**: Remote rejections come back as values; the UI layer decides
//!   whether to show them
//! - **Descriptive Messages**: Each variant includes a context string
//!
//! ## Error Categories
//!
//! 1. **Environment** - Nothing to talk to
//!    - [`ProviderUnavailable`](AppError::ProviderUnavailable) - no injected wallet
//!
//! 2. **User** - The wallet holder said no, or typed something unusable
//!    - [`UserRejected`](AppError::UserRejected) - EIP-1193 code 4001
//!    - [`InvalidInput`](AppError::InvalidInput) - e.g. a new owner that is not an address
//!
//! 3. **Remote** - The provider or the contract refused
//!    - [`Reverted`](AppError::Reverted) - decoded contract revert
//!    - [`Transaction`](AppError::Transaction) - failed receipt or confirmation timeout
//!    - [`Rpc`](AppError::Rpc) - any other provider failure
//!
//! 4. **Internal**
//!    - [`Encoding`](AppError::Encoding) / [`Decoding`](AppError::Decoding)
//!    - [`Config`](AppError::Config)
//!
//! Calling a contract operation before a connection exists is **not** an error;
//! those operations return `Ok(None)`.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_accounts(accounts: &[String]) -> Result<&str> {
//!     accounts
//!         .first()
//!         .map(String::as_str)
//!         .ok_or_else(|| AppError::Rpc("Provider returned no accounts".to_string()))
//! }
//! ```

use shared::dto::rpc::{codes, RpcError};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error type covering all wallet session failure scenarios.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// No injected wallet provider was found.
    #[error("No Ethereum wallet provider detected")]
    ProviderUnavailable,

    /// The user declined an authorization or signing prompt.
    #[error("Request rejected by user: {0}")]
    UserRejected(String),

    /// The contract reverted; carries the decoded reason.
    #[error("Contract reverted: {0}")]
    Reverted(String),

    /// Transaction mined with a failure status, or never confirmed.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Any other provider / JSON-RPC failure.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// User input that cannot be encoded for the contract.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Calldata could not be produced.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A provider response had an unexpected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid build-time configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ProviderUnavailable => "MetaMask wallet is required to connect".to_string(),
            AppError::UserRejected(_) => "The request was rejected in your wallet".to_string(),
            AppError::Reverted(reason) => format!("Transaction reverted: {}", reason),
            AppError::Transaction(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Rpc(_) => "Wallet provider request failed".to_string(),
            AppError::Encoding(_) | AppError::Decoding(_) | AppError::Config(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, AppError::UserRejected(_))
    }
}

/// Convert a rejected `provider.request(...)` into `AppError`.
///
/// Revert payloads are not decoded here; the contract handle does that since it
/// knows the contract's custom errors.
impl From<RpcError> for AppError {
    fn from(err: RpcError) -> Self {
        match err.code {
            codes::USER_REJECTED => AppError::UserRejected(err.message),
            codes::UNAUTHORIZED => AppError::Rpc(format!("Unauthorized: {}", err.message)),
            codes::DISCONNECTED => AppError::Rpc(format!("Provider disconnected: {}", err.message)),
            _ => AppError::Rpc(err.to_string()),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

/// Convert ABI decoding failures to `AppError`.
impl From<alloy_sol_types::Error> for AppError {
    fn from(err: alloy_sol_types::Error) -> Self {
        AppError::Decoding(format!("ABI error: {}", err))
    }
}
