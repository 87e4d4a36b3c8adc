//! Injected Ethereum provider via wasm-bindgen
//!
//! Wraps `window.ethereum` (MetaMask and other EIP-1193 wallets) behind
//! [`Eip1193Provider`] so `lib-core` can drive it.

use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use js_sys::Reflect;
use lib_core::Eip1193Provider;
use serde::Serialize;
use serde_json::Value;
use shared::dto::rpc::{codes, RpcError};
use wasm_bindgen::prelude::*;

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen(inline_js = "
export function detectEthereum() {
    if (typeof window !== 'undefined' && window.ethereum) {
        return window.ethereum;
    }
    return null;
}

export async function ethereumRequest(provider, method, params) {
    return await provider.request({ method: method, params: params });
}

export function onAccountsChanged(provider, callback) {
    if (typeof provider.on === 'function') {
        provider.on('accountsChanged', callback);
        return true;
    }
    return false;
}
")]
extern "C" {
    fn detectEthereum() -> Option<JsValue>;

    #[wasm_bindgen(catch)]
    async fn ethereumRequest(provider: &JsValue, method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    fn onAccountsChanged(provider: &JsValue, callback: &Closure<dyn FnMut(JsValue)>) -> bool;
}

// ============================================================================
// PROVIDER
// ============================================================================

/// Handle to the injected `window.ethereum` object.
#[derive(Clone, Debug)]
pub struct InjectedEthereum {
    inner: JsValue,
}

impl InjectedEthereum {
    /// Look for an injected provider. Never prompts the user.
    pub fn detect() -> Option<Self> {
        detectEthereum().map(|inner| Self { inner })
    }

    /// Subscribe to `accountsChanged` for the lifetime of the page.
    pub fn on_accounts_changed(&self, mut handler: impl FnMut(Vec<Address>) + 'static) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            match from_js::<Vec<Address>>(payload) {
                Ok(accounts) => handler(accounts),
                Err(e) => log::warn!("Ignoring malformed accountsChanged payload: {}", e),
            }
        });

        if onAccountsChanged(&self.inner, &callback) {
            // The provider keeps the listener until the page unloads
            callback.forget();
        } else {
            log::warn!("Provider does not emit accountsChanged events");
        }
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for InjectedEthereum {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let params = params
            .serialize(&serializer)
            .map_err(|e| RpcError::new(codes::INTERNAL_ERROR, format!("Failed to encode params: {}", e)))?;

        log::debug!("-> {}", method);
        match ethereumRequest(&self.inner, method, params).await {
            Ok(result) => from_js(result).map_err(|e| {
                RpcError::new(codes::INTERNAL_ERROR, format!("Unreadable {} result: {}", method, e))
            }),
            Err(err) => {
                let err = rpc_error_from_js(&err);
                log::debug!("<- {} failed: {}", method, err);
                Err(err)
            }
        }
    }

    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

/// Convert a JS value into a serde type through `serde_json::Value`.
fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, String> {
    let json: Value = serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())?;
    serde_json::from_value(json).map_err(|e| e.to_string())
}

/// Read `{code, message, data}` off a rejected provider request.
fn rpc_error_from_js(err: &JsValue) -> RpcError {
    let field = |name: &str| {
        Reflect::get(err, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    };

    let code = field("code")
        .and_then(|v| v.as_f64())
        .map(|c| c as i64)
        .unwrap_or(codes::INTERNAL_ERROR);
    let message = field("message")
        .and_then(|v| v.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "Unknown provider error".to_string());

    let error = RpcError::new(code, message);
    match field("data").and_then(|v| from_js::<Value>(v).ok()) {
        Some(data) => error.with_data(data),
        None => error,
    }
}
