//! # Shared Wire Types Library
//!
//! This library defines the contract between the ATM front-end and an injected
//! EIP-1193 wallet provider. Everything that crosses the `provider.request(...)`
//! boundary is modelled here so that `lib-core` (business logic) and `atm-web`
//! (browser bindings) agree on one JSON shape.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for provider communication
//!   - **[`dto::rpc`]**: JSON-RPC method names and the provider error shape
//!   - **[`dto::transaction`]**: Call/transaction requests and receipts
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format account addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using `serde`:
//! - Field names are **camelCase** on the wire, matching Ethereum JSON-RPC
//! - Quantities, addresses and byte strings are `0x`-prefixed hex, via the
//!   `serde` support of [`alloy_primitives`]
//! - Optional fields are omitted from JSON when `None`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::transaction::CallRequest;
//! use alloy_primitives::{address, Bytes};
//!
//! let call = CallRequest {
//!     from: None,
//!     to: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
//!     data: Bytes::from_static(&[0x12, 0x06, 0x5f, 0xe0]),
//! };
//! let json = serde_json::to_value(&call).unwrap();
//! assert_eq!(json["data"], "0x12065fe0");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
