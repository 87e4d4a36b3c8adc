//! JSON-RPC method names and the EIP-1193 provider error shape.

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider methods used by the ATM front-end.
pub mod methods {
    /// Non-interactive: accounts the user already authorized for this origin.
    pub const ETH_ACCOUNTS: &str = "eth_accounts";
    /// Interactive: prompts the user to authorize accounts.
    pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ETH_CALL: &str = "eth_call";
    pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
}

/// Default block tag for read-only calls.
pub const BLOCK_LATEST: &str = "latest";

/// EIP-1193 / EIP-1474 error codes the front-end distinguishes.
pub mod codes {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested method and/or account has not been authorized by the user.
    pub const UNAUTHORIZED: i64 = 4100;
    /// The provider is disconnected from all chains.
    pub const DISCONNECTED: i64 = 4900;
    /// Execution reverted (geth / hardhat).
    pub const EXECUTION_REVERTED: i64 = 3;
    /// Internal JSON-RPC error; MetaMask wraps node reverts in this.
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Error object rejected by `provider.request(...)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == codes::USER_REJECTED
    }

    /// Raw revert payload attached to the error, if any.
    ///
    /// Nodes put the hex string directly in `data`; MetaMask nests it as
    /// `data.data` or `data.originalError.data`.
    pub fn revert_data(&self) -> Option<Bytes> {
        fn hex_at(value: &Value) -> Option<Bytes> {
            value.as_str().and_then(|s| s.parse::<Bytes>().ok())
        }

        let data = self.data.as_ref()?;
        hex_at(data)
            .or_else(|| data.get("data").and_then(hex_at))
            .or_else(|| {
                data.get("originalError")
                    .and_then(|orig| orig.get("data"))
                    .and_then(hex_at)
            })
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for RpcError {}
