//! # Wallet Provider Seam
//!
//! [`Eip1193Provider`] is the only way lib-core reaches the outside world. In
//! the browser it is implemented over the injected `window.ethereum` object; in
//! tests it is an in-memory chain.
//!
//! The trait is `?Send`: browser futures hold `JsValue`s and run on a
//! single-threaded executor.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::dto::rpc::RpcError;

use crate::error::{AppError, Result};

/// An EIP-1193 `request({ method, params })` endpoint.
#[async_trait(?Send)]
pub trait Eip1193Provider {
    /// Forward one JSON-RPC request to the wallet.
    async fn request(&self, method: &str, params: Value) -> std::result::Result<Value, RpcError>;

    /// Pause between transaction receipt polls.
    ///
    /// Required: an implementation that returns immediately turns an unbounded
    /// confirmation wait into a busy loop.
    async fn sleep(&self, duration: Duration);
}

/// Issue a request and deserialize its result.
pub async fn request_as<P, T>(provider: &P, method: &str, params: Value) -> Result<T>
where
    P: Eip1193Provider + ?Sized,
    T: DeserializeOwned,
{
    let value = provider.request(method, params).await.map_err(AppError::from)?;
    serde_json::from_value(value)
        .map_err(|e| AppError::Decoding(format!("Unexpected {} response: {}", method, e)))
}
