//! # Wallet Session
//!
//! [`WalletSession`] is the explicit state holder behind the ATM page: provider
//! availability, the connected accounts, the bound contract, the last balance,
//! the owner display and the ownership-transfer draft.
//!
//! ## State Machine
//!
//! ```text
//! Uninitialized ──probe_provider──► ProviderAbsent
//!       │
//!       └────────probe_provider──► ProviderPresentDisconnected
//!                                        │  ▲
//!   query_authorized_accounts (found) /  │  │ handle_accounts_changed([])
//!   request_connection (approved)        ▼  │
//!                                      Connected ◄─┐
//!                                        └─────────┘ handle_accounts_changed([a, ..])
//! ```
//!
//! Contract operations called before `Connected` are silent no-ops and return
//! `Ok(None)`. Every other failure comes back as an [`AppError`].
//!
//! ## Invariants
//!
//! - A contract handle exists iff the account set is non-empty; both live in one
//!   `Connection`.
//! - The balance is cleared whenever the connection is dropped or rebound.
//! - Each bind bumps a generation counter; a remote result that started under an
//!   older generation is returned to the caller but never written into state.
//! - Mutating operations (deposit, withdraw, transfer) are serialized: the next
//!   one is submitted only after the previous one confirmed and refreshed.
//! - No `RefCell` borrow is held across an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use alloy_primitives::{Address, B256, U256};
use futures::lock::Mutex;
use serde_json::Value;
use shared::dto::rpc::methods;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::contract::AtmContract;
use crate::error::{AppError, Result};
use crate::provider::{request_as, Eip1193Provider};


/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    ProviderAbsent,
    ProviderPresentDisconnected,
    Connected,
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected)
    }
}

/// Current owner as last fetched, and whether it is shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerDisplay {
    pub address: Option<Address>,
    pub visible: bool,
}

/// Owned copy of the session state for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub accounts: Vec<Address>,
    pub balance: Option<U256>,
    pub owner: OwnerDisplay,
    pub transfer_draft: String,
}

struct Connection<P> {
    accounts: Vec<Address>,
    contract: AtmContract<P>,
    generation: u64,
}

struct Inner<P> {
    state: SessionState,
    provider: Option<Rc<P>>,
    connection: Option<Connection<P>>,
    balance: Option<U256>,
    owner: OwnerDisplay,
    transfer_draft: String,
    generation: u64,
}

/// Client-side session over an injected wallet provider.
pub struct WalletSession<P> {
    config: Config,
    inner: RefCell<Inner<P>>,
    mutations: Mutex<()>,
}

impl<P: Eip1193Provider> WalletSession<P> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            inner: RefCell::new(Inner {
                state: SessionState::Uninitialized,
                provider: None,
                connection: None,
                balance: None,
                owner: OwnerDisplay::default(),
                transfer_draft: String::new(),
                generation: 0,
            }),
            mutations: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.borrow();
        SessionSnapshot {
            state: inner.state,
            accounts: inner
                .connection
                .as_ref()
                .map(|c| c.accounts.clone())
                .unwrap_or_default(),
            balance: inner.balance,
            owner: inner.owner.clone(),
            transfer_draft: inner.transfer_draft.clone(),
        }
    }

    /// Record the injected provider, if any.
    ///
    /// Re-probing discards any existing connection.
    pub fn probe_provider(&self, injected: Option<P>) -> SessionState {
        let mut inner = self.inner.borrow_mut();
        inner.connection = None;
        inner.balance = None;
        inner.owner = OwnerDisplay::default();
        inner.generation += 1;

        let state = if injected.is_some() {
            SessionState::ProviderPresentDisconnected
        } else {
            SessionState::ProviderAbsent
        };
        inner.provider = injected.map(Rc::new);
        inner.state = state;
        info!(?state, "Wallet provider probed");
        state
    }

    /// Ask the provider for accounts this origin already authorized.
    ///
    /// Never prompts. Without a provider this does nothing.
    #[instrument(skip(self))]
    pub async fn query_authorized_accounts(&self) -> Result<SessionState> {
        let Some(provider) = self.provider() else {
            return Ok(self.state());
        };

        let accounts: Vec<Address> =
            request_as(&*provider, methods::ETH_ACCOUNTS, Value::Array(Vec::new())).await?;
        if accounts.is_empty() {
            debug!("No previously authorized accounts");
            return Ok(self.state());
        }

        self.bind_contract(provider, accounts);
        Ok(self.state())
    }

    /// Prompt the user to authorize accounts.
    ///
    /// # Errors
    ///
    /// - [`AppError::ProviderUnavailable`] when no provider was detected
    /// - [`AppError::UserRejected`] when the user declines
    #[instrument(skip(self))]
    pub async fn request_connection(&self) -> Result<SessionState> {
        let provider = self.provider().ok_or(AppError::ProviderUnavailable)?;

        let accounts: Vec<Address> =
            request_as(&*provider, methods::ETH_REQUEST_ACCOUNTS, Value::Array(Vec::new())).await?;
        if accounts.is_empty() {
            warn!("Provider approved the request but returned no accounts");
            return Ok(self.state());
        }

        self.bind_contract(provider, accounts);
        Ok(self.state())
    }

    /// Apply a provider `accountsChanged` event.
    ///
    /// An empty list drops the connection; otherwise the contract is rebound to
    /// the new first account.
    pub fn handle_accounts_changed(&self, accounts: Vec<Address>) -> SessionState {
        let Some(provider) = self.provider() else {
            return self.state();
        };

        if accounts.is_empty() {
            let mut inner = self.inner.borrow_mut();
            if inner.connection.take().is_some() {
                info!("Wallet disconnected all accounts");
            }
            inner.generation += 1;
            inner.balance = None;
            inner.owner = OwnerDisplay::default();
            inner.state = SessionState::ProviderPresentDisconnected;
            return inner.state;
        }

        self.bind_contract(provider, accounts);
        self.state()
    }

    /// Read the contract balance into state.
    #[instrument(skip(self))]
    pub async fn fetch_balance(&self) -> Result<Option<U256>> {
        let Some((contract, generation)) = self.contract() else {
            return Ok(None);
        };

        let balance = contract.get_balance().await?;
        let mut inner = self.inner.borrow_mut();
        if inner.is_current(generation) {
            inner.balance = Some(balance);
        } else {
            debug!("Discarding balance read from a replaced connection");
        }
        Ok(Some(balance))
    }

    /// Deposit `amount`, wait for confirmation, then refresh the balance.
    ///
    /// Returns the refreshed balance.
    #[instrument(skip(self))]
    pub async fn deposit(&self, amount: U256) -> Result<Option<U256>> {
        let _guard = self.mutations.lock().await;
        let Some((contract, _)) = self.contract() else {
            return Ok(None);
        };

        contract.deposit(amount).await?.confirm().await?;
        self.fetch_balance().await
    }

    /// Withdraw `amount`, wait for confirmation, then refresh the balance.
    ///
    /// A rejected withdrawal leaves the stored balance untouched.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, amount: U256) -> Result<Option<U256>> {
        let _guard = self.mutations.lock().await;
        let Some((contract, _)) = self.contract() else {
            return Ok(None);
        };

        contract.withdraw(amount).await?.confirm().await?;
        self.fetch_balance().await
    }

    /// Hand the contract to `new_owner` and clear the draft once confirmed.
    ///
    /// The only local check is that the text parses as an address; the contract
    /// decides whether the transfer is allowed. Returns the transaction hash.
    #[instrument(skip(self))]
    pub async fn transfer_ownership(&self, new_owner: &str) -> Result<Option<B256>> {
        let _guard = self.mutations.lock().await;
        let Some((contract, generation)) = self.contract() else {
            return Ok(None);
        };

        let new_owner: Address = new_owner
            .trim()
            .parse()
            .map_err(|e| AppError::InvalidInput(format!("'{}' is not an address: {}", new_owner.trim(), e)))?;

        let receipt = contract.transfer_ownership(new_owner).await?.confirm().await?;

        let mut inner = self.inner.borrow_mut();
        if inner.is_current(generation) {
            inner.transfer_draft.clear();
        }
        info!(%new_owner, "Ownership transferred");
        Ok(Some(receipt.transaction_hash))
    }

    /// Fetch the current owner and make it visible.
    #[instrument(skip(self))]
    pub async fn reveal_owner_address(&self) -> Result<Option<Address>> {
        let Some((contract, generation)) = self.contract() else {
            return Ok(None);
        };

        let owner = contract.owner().await?;
        let mut inner = self.inner.borrow_mut();
        if inner.is_current(generation) {
            inner.owner = OwnerDisplay {
                address: Some(owner),
                visible: true,
            };
        }
        Ok(Some(owner))
    }

    pub fn set_transfer_draft(&self, draft: impl Into<String>) {
        self.inner.borrow_mut().transfer_draft = draft.into();
    }

    pub fn transfer_draft(&self) -> String {
        self.inner.borrow().transfer_draft.clone()
    }

    /// Build the contract handle for `accounts` and enter `Connected`.
    ///
    /// Runs once per connection: an identical account set keeps the existing
    /// handle.
    fn bind_contract(&self, provider: Rc<P>, accounts: Vec<Address>) {
        let Some(&signer) = accounts.first() else {
            return;
        };

        let mut inner = self.inner.borrow_mut();
        if inner
            .connection
            .as_ref()
            .is_some_and(|existing| existing.accounts == accounts)
        {
            return;
        }

        inner.generation += 1;
        let generation = inner.generation;
        let contract = AtmContract::bind(provider, &self.config, signer);
        info!(%signer, contract = %contract.address(), accounts = accounts.len(), "Contract bound");

        inner.connection = Some(Connection {
            accounts,
            contract,
            generation,
        });
        inner.balance = None;
        inner.state = SessionState::Connected;
    }

    fn provider(&self) -> Option<Rc<P>> {
        self.inner.borrow().provider.clone()
    }

    fn contract(&self) -> Option<(AtmContract<P>, u64)> {
        self.inner
            .borrow()
            .connection
            .as_ref()
            .map(|c| (c.contract.clone(), c.generation))
    }
}

impl<P> Inner<P> {
    fn is_current(&self, generation: u64) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|c| c.generation == generation)
    }
}
