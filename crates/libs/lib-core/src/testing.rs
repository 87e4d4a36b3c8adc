//! In-memory EIP-1193 provider running the Assessment contract rules.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use alloy_primitives::{address, hex, Address, Bytes, B256, U256, U64};
use alloy_sol_types::{Revert, SolError, SolInterface, SolValue};
use async_trait::async_trait;
use serde_json::{json, Value};
use shared::dto::rpc::{codes, methods, RpcError};
use shared::dto::transaction::{CallRequest, TransactionReceipt, TransactionRequest};

use crate::config::Config;
use crate::contract::Assessment::{self, AssessmentCalls};
use crate::provider::Eip1193Provider;

/// Hardhat account #0, deployer and initial owner.
pub const OWNER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
/// Hardhat account #1.
pub const OTHER: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

const NOT_OWNER: &str = "You are not the owner of this account";

struct PendingReceipt {
    receipt: TransactionReceipt,
    function: &'static str,
    polls_left: u32,
}

struct ChainState {
    contract: Address,
    wallet_accounts: Vec<Address>,
    authorized: bool,
    reject_prompts: bool,
    balance: U256,
    owner: Address,
    pending_polls: u32,
    failing_receipts: bool,
    receipts: HashMap<B256, PendingReceipt>,
    tx_count: u8,
    receipt_polls: u32,
    sleeps: Vec<Duration>,
    requests: Vec<String>,
    events: Vec<String>,
}

/// Cloning shares the same chain.
#[derive(Clone)]
pub struct MockChain {
    state: Rc<RefCell<ChainState>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ChainState {
                contract: Config::default().contract_address,
                wallet_accounts: vec![OWNER],
                authorized: false,
                reject_prompts: false,
                balance: U256::ZERO,
                owner: OWNER,
                pending_polls: 0,
                failing_receipts: false,
                receipts: HashMap::new(),
                tx_count: 0,
                receipt_polls: 0,
                sleeps: Vec::new(),
                requests: Vec::new(),
                events: Vec::new(),
            })),
        }
    }

    /// The origin is already authorized, so `eth_accounts` answers.
    pub fn authorized(self) -> Self {
        self.state.borrow_mut().authorized = true;
        self
    }

    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state.borrow_mut().wallet_accounts = accounts;
        self
    }

    pub fn with_balance(self, balance: u64) -> Self {
        self.state.borrow_mut().balance = U256::from(balance);
        self
    }

    /// The user declines every `eth_requestAccounts` prompt.
    pub fn rejecting_prompts(self) -> Self {
        self.state.borrow_mut().reject_prompts = true;
        self
    }

    /// Receipt polls answered with `null` before a transaction is mined.
    pub fn with_pending_polls(self, polls: u32) -> Self {
        self.state.borrow_mut().pending_polls = polls;
        self
    }

    /// Transactions are mined with status `0x0` and no state change.
    pub fn with_failing_receipts(self) -> Self {
        self.state.borrow_mut().failing_receipts = true;
        self
    }

    pub fn balance(&self) -> U256 {
        self.state.borrow().balance
    }

    pub fn owner(&self) -> Address {
        self.state.borrow().owner
    }

    /// Methods received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }

    /// `submit <fn>` / `confirm <fn>` entries, in order.
    pub fn events(&self) -> Vec<String> {
        self.state.borrow().events.clone()
    }

    pub fn receipt_polls(&self) -> u32 {
        self.state.borrow().receipt_polls
    }

    /// Durations passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }

    fn call(&self, params: &Value) -> Result<Value, RpcError> {
        let request: CallRequest = param(params, 0)?;
        let state = self.state.borrow();
        if request.to != state.contract {
            return Ok(json!("0x"));
        }

        let output = match decode_calldata(&request.data)? {
            AssessmentCalls::getBalance(_) => state.balance.abi_encode(),
            AssessmentCalls::owner(_) => state.owner.abi_encode(),
            _ => return Err(RpcError::new(-32000, "state-changing function called with eth_call")),
        };
        Ok(json!(hex::encode_prefixed(output)))
    }

    fn send_transaction(&self, params: &Value) -> Result<Value, RpcError> {
        let tx: TransactionRequest = param(params, 0)?;
        let mut state = self.state.borrow_mut();
        if !state.authorized || !state.wallet_accounts.contains(&tx.from) {
            return Err(RpcError::new(codes::UNAUTHORIZED, "The requested account has not been authorized"));
        }

        let call = decode_calldata(&tx.data)?;
        let function = match &call {
            AssessmentCalls::deposit(_) => "deposit",
            AssessmentCalls::withdraw(_) => "withdraw",
            AssessmentCalls::transferOwnership(_) => "transferOwnership",
            _ => "view",
        };

        if tx.from != state.owner {
            let reason = Revert {
                reason: NOT_OWNER.to_string(),
            };
            return Err(reverted(SolError::abi_encode(&reason)));
        }

        let success = !state.failing_receipts;
        match call {
            AssessmentCalls::deposit(c) if success => state.balance += c.amount,
            AssessmentCalls::withdraw(c) => {
                if state.balance < c.withdrawAmount {
                    let err = Assessment::InsufficientBalance {
                        balance: state.balance,
                        withdrawAmount: c.withdrawAmount,
                    };
                    return Err(reverted(SolError::abi_encode(&err)));
                }
                if success {
                    state.balance -= c.withdrawAmount;
                }
            }
            AssessmentCalls::transferOwnership(c) if success => state.owner = c.newOwner,
            _ => {}
        }

        state.tx_count += 1;
        let hash = B256::with_last_byte(state.tx_count);
        let receipt = TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(state.tx_count)),
            status: Some(U64::from(u8::from(success))),
        };
        let polls_left = state.pending_polls;
        state.receipts.insert(
            hash,
            PendingReceipt {
                receipt,
                function,
                polls_left,
            },
        );
        state.events.push(format!("submit {}", function));
        Ok(json!(hash))
    }

    fn receipt(&self, params: &Value) -> Result<Value, RpcError> {
        let hash: B256 = param(params, 0)?;
        let mut state = self.state.borrow_mut();
        state.receipt_polls += 1;

        let Some(pending) = state.receipts.get_mut(&hash) else {
            return Ok(Value::Null);
        };
        if pending.polls_left > 0 {
            pending.polls_left -= 1;
            return Ok(Value::Null);
        }
        let receipt = json!(pending.receipt);
        let function = pending.function;
        state.events.push(format!("confirm {}", function));
        Ok(receipt)
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for MockChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.state.borrow_mut().requests.push(method.to_string());
        // Every request is a suspension point, as with a real wallet.
        tokio::task::yield_now().await;

        match method {
            methods::ETH_ACCOUNTS => {
                let state = self.state.borrow();
                let accounts = if state.authorized { state.wallet_accounts.clone() } else { Vec::new() };
                Ok(json!(accounts))
            }
            methods::ETH_REQUEST_ACCOUNTS => {
                let mut state = self.state.borrow_mut();
                if state.reject_prompts {
                    return Err(RpcError::new(codes::USER_REJECTED, "User rejected the request."));
                }
                state.authorized = true;
                Ok(json!(state.wallet_accounts))
            }
            methods::ETH_CALL => self.call(&params),
            methods::ETH_SEND_TRANSACTION => self.send_transaction(&params),
            methods::ETH_GET_TRANSACTION_RECEIPT => self.receipt(&params),
            other => Err(RpcError::new(4200, format!("Unsupported method {}", other))),
        }
    }

    async fn sleep(&self, duration: Duration) {
        self.state.borrow_mut().sleeps.push(duration);
        tokio::task::yield_now().await;
    }
}

fn param<T: serde::de::DeserializeOwned>(params: &Value, index: usize) -> Result<T, RpcError> {
    params
        .get(index)
        .cloned()
        .ok_or_else(|| RpcError::new(-32602, "missing parameter"))
        .and_then(|value| {
            serde_json::from_value(value).map_err(|e| RpcError::new(-32602, e.to_string()))
        })
}

fn decode_calldata(data: &Bytes) -> Result<AssessmentCalls, RpcError> {
    AssessmentCalls::abi_decode(data).map_err(|e| RpcError::new(codes::EXECUTION_REVERTED, e.to_string()))
}

/// MetaMask-style wrapping of a node revert.
fn reverted(data: Vec<u8>) -> RpcError {
    RpcError::new(codes::INTERNAL_ERROR, "Internal JSON-RPC error.").with_data(json!({
        "code": codes::EXECUTION_REVERTED,
        "message": "execution reverted",
        "data": hex::encode_prefixed(data),
    }))
}
