//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with an injected
//! EIP-1193 provider via `provider.request({ method, params })`.
//!
//! ## Module Organization
//!
//! - [`rpc`] - JSON-RPC method names, block tags and the provider error shape
//! - [`transaction`] - `eth_call` / `eth_sendTransaction` requests and receipts
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase, as Ethereum JSON-RPC expects
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Numbers and bytes**: `0x`-prefixed hex strings
//!
//! ## Example JSON Communication
//!
//! ```text
//! provider.request({
//!   method: "eth_sendTransaction",
//!   params: [{
//!     "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
//!     "to":   "0x5fbdb2315678afecb367f032d93f642f64180aa3",
//!     "data": "0xb6b55f250000000000000000000000000000000000000000000000000000000000000001"
//!   }]
//! })
//! ```
//!
//! ```text
//! => "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"
//! ```

pub mod rpc;
pub mod transaction;

pub use rpc::*;
pub use transaction::*;
