//! # ATM Contract Handle
//!
//! Typed client for the deployed Assessment contract. The interface is declared
//! once with `sol!`; calldata encoding and return decoding come from
//! `alloy-sol-types`, transport from any [`Eip1193Provider`].
//!
//! ## Operations
//!
//! | Method | Kind | JSON-RPC |
//! |---|---|---|
//! | [`AtmContract::get_balance`] | read | `eth_call` |
//! | [`AtmContract::owner`] | read | `eth_call` |
//! | [`AtmContract::deposit`] | write | `eth_sendTransaction` |
//! | [`AtmContract::withdraw`] | write | `eth_sendTransaction` |
//! | [`AtmContract::transfer_ownership`] | write | `eth_sendTransaction` |
//!
//! Writes return a [`PendingTransaction`]; [`PendingTransaction::confirm`] polls
//! `eth_getTransactionReceipt` until the transaction is mined.
//!
//! ## Example
//!
//! ```rust,ignore
//! let contract = AtmContract::bind(provider, core_config(), signer);
//! let receipt = contract.deposit(U256::from(1)).await?.confirm().await?;
//! let balance = contract.get_balance().await?;
//! ```

use std::rc::Rc;
use std::time::Duration;

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use alloy_sol_types::{sol, Revert, SolCall, SolError};
use serde::Serialize;
use serde_json::Value;
use shared::dto::rpc::{methods, RpcError, BLOCK_LATEST};
use shared::dto::transaction::{CallRequest, TransactionReceipt, TransactionRequest};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::provider::Eip1193Provider;

sol! {
    /// Remote interface of the deployed ATM contract.
    interface Assessment {
        error InsufficientBalance(uint256 balance, uint256 withdrawAmount);

        function getBalance() external view returns (uint256);
        function deposit(uint256 amount) external payable;
        function withdraw(uint256 withdrawAmount) external;
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }
}

/// Contract proxy bound to one address, one provider and one signing account.
pub struct AtmContract<P> {
    provider: Rc<P>,
    address: Address,
    signer: Address,
    poll_interval: Duration,
    max_polls: Option<u32>,
}

impl<P> Clone for AtmContract<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            address: self.address,
            signer: self.signer,
            poll_interval: self.poll_interval,
            max_polls: self.max_polls,
        }
    }
}

impl<P> std::fmt::Debug for AtmContract<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtmContract")
            .field("address", &self.address)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl<P: Eip1193Provider> AtmContract<P> {
    /// Bind the contract at `config.contract_address` for `signer`.
    ///
    /// Pure construction: no request reaches the provider.
    pub fn bind(provider: Rc<P>, config: &Config, signer: Address) -> Self {
        Self {
            provider,
            address: config.contract_address,
            signer,
            poll_interval: config.poll_interval,
            max_polls: config.max_confirmation_polls,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> Address {
        self.signer
    }

    #[instrument(skip(self), fields(contract = %self.address))]
    pub async fn get_balance(&self) -> Result<U256> {
        self.call(&Assessment::getBalanceCall {}).await
    }

    #[instrument(skip(self), fields(contract = %self.address))]
    pub async fn owner(&self) -> Result<Address> {
        self.call(&Assessment::ownerCall {}).await
    }

    #[instrument(skip(self), fields(contract = %self.address))]
    pub async fn deposit(&self, amount: U256) -> Result<PendingTransaction<P>> {
        self.send(&Assessment::depositCall { amount }).await
    }

    #[instrument(skip(self), fields(contract = %self.address))]
    pub async fn withdraw(&self, amount: U256) -> Result<PendingTransaction<P>> {
        self.send(&Assessment::withdrawCall {
            withdrawAmount: amount,
        })
        .await
    }

    #[instrument(skip(self), fields(contract = %self.address))]
    pub async fn transfer_ownership(&self, new_owner: Address) -> Result<PendingTransaction<P>> {
        self.send(&Assessment::transferOwnershipCall { newOwner: new_owner })
            .await
    }

    async fn call<C: SolCall>(&self, call: &C) -> Result<C::Return> {
        let request = CallRequest {
            from: Some(self.signer),
            to: self.address,
            data: Bytes::from(call.abi_encode()),
        };
        let params = Value::Array(vec![
            to_param(&request)?,
            Value::from(BLOCK_LATEST),
        ]);

        let result = self
            .provider
            .request(methods::ETH_CALL, params)
            .await
            .map_err(map_rpc_error)?;
        let raw: Bytes = serde_json::from_value(result)?;
        debug!(function = C::SIGNATURE, bytes = raw.len(), "eth_call returned");

        Ok(C::abi_decode_returns(&raw)?)
    }

    async fn send<C: SolCall>(&self, call: &C) -> Result<PendingTransaction<P>> {
        let request = TransactionRequest {
            from: self.signer,
            to: self.address,
            data: Bytes::from(call.abi_encode()),
        };
        let params = Value::Array(vec![to_param(&request)?]);

        let result = self
            .provider
            .request(methods::ETH_SEND_TRANSACTION, params)
            .await
            .map_err(map_rpc_error)?;
        let hash: B256 = serde_json::from_value(result)?;
        info!(function = C::SIGNATURE, %hash, "Transaction submitted");

        Ok(PendingTransaction {
            provider: Rc::clone(&self.provider),
            hash,
            poll_interval: self.poll_interval,
            max_polls: self.max_polls,
        })
    }
}

/// A submitted transaction awaiting confirmation.
#[must_use = "a submitted transaction is only confirmed once `confirm` is awaited"]
pub struct PendingTransaction<P> {
    provider: Rc<P>,
    hash: B256,
    poll_interval: Duration,
    max_polls: Option<u32>,
}

impl<P: Eip1193Provider> PendingTransaction<P> {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Wait until the transaction has a receipt.
    ///
    /// A mined receipt with failure status is an error; so is exceeding
    /// `max_polls` when one is configured.
    #[instrument(skip(self), fields(hash = %self.hash))]
    pub async fn confirm(self) -> Result<TransactionReceipt> {
        let params = Value::Array(vec![to_param(&self.hash)?]);
        let mut polls: u32 = 0;

        loop {
            let result = self
                .provider
                .request(methods::ETH_GET_TRANSACTION_RECEIPT, params.clone())
                .await
                .map_err(AppError::from)?;
            polls += 1;

            if !result.is_null() {
                let receipt: TransactionReceipt = serde_json::from_value(result)?;
                if !receipt.is_success() {
                    warn!(polls, "Transaction mined with failure status");
                    return Err(AppError::Transaction(format!(
                        "Transaction {} failed on-chain",
                        self.hash
                    )));
                }
                info!(polls, block = ?receipt.block_number, "Transaction confirmed");
                return Ok(receipt);
            }

            if self.max_polls.is_some_and(|max| polls >= max) {
                warn!(polls, "Giving up on transaction confirmation");
                return Err(AppError::Transaction(format!(
                    "Transaction {} not confirmed after {} polls",
                    self.hash, polls
                )));
            }

            self.provider.sleep(self.poll_interval).await;
        }
    }
}

fn to_param<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Encoding(e.to_string()))
}

/// Map a provider error, decoding contract reverts when a payload is present.
fn map_rpc_error(err: RpcError) -> AppError {
    if err.is_user_rejection() {
        return AppError::from(err);
    }
    match err.revert_data() {
        Some(data) => AppError::Reverted(decode_revert(&data)),
        None if err.message.to_ascii_lowercase().contains("revert") => {
            AppError::Reverted(err.message)
        }
        None => AppError::from(err),
    }
}

/// Human-readable reason for a revert payload.
pub fn decode_revert(data: &[u8]) -> String {
    if let Ok(err) = Assessment::InsufficientBalance::abi_decode(data) {
        return format!(
            "insufficient balance: {} available, {} requested",
            err.balance, err.withdrawAmount
        );
    }
    if let Ok(revert) = Revert::abi_decode(data) {
        return revert.reason;
    }
    if data.is_empty() {
        return "no reason given".to_string();
    }
    hex::encode_prefixed(data)
}
