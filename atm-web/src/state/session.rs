//! Session state management
//!
//! [`SessionContext`] owns the `lib-core` [`WalletSession`] and mirrors its
//! snapshot into signals after every operation.

use std::future::Future;
use std::rc::Rc;

use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::config::core_config;
use lib_core::{AppError, SessionSnapshot, WalletSession};

use crate::services::ethereum::InjectedEthereum;

pub type Session = WalletSession<InjectedEthereum>;

/// Global session context
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: StoredValue<Rc<Session>, LocalStorage>,
    pub snapshot: RwSignal<SessionSnapshot>,
    pub error: RwSignal<Option<String>>,
    pub pending: RwSignal<usize>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session: StoredValue::new_local(Rc::new(WalletSession::new(core_config().clone()))),
            snapshot: RwSignal::new(SessionSnapshot::default()),
            error: RwSignal::new(None),
            pending: RwSignal::new(0),
        }
    }

    pub fn session(&self) -> Rc<Session> {
        self.session.get_value()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.get() > 0
    }

    /// Copy the session state into the snapshot signal.
    pub fn sync(&self) {
        self.snapshot.set(self.session().snapshot());
    }

    pub fn report(&self, action: &str, error: &AppError) {
        log!("{} failed: {}", action, error);
        self.error.set(Some(error.user_message()));
    }

    /// Probe for a wallet, subscribe to account changes and pick up accounts
    /// the user already authorized.
    pub fn initialize(&self) {
        let ctx = *self;
        let injected = InjectedEthereum::detect();

        if let Some(provider) = &injected {
            provider.on_accounts_changed(move |accounts| {
                log!("Accounts changed: {} account(s)", accounts.len());
                let state = ctx.session().handle_accounts_changed(accounts);
                ctx.sync();
                if state.is_connected() {
                    ctx.run("Balance refresh", |session| async move { session.fetch_balance().await });
                }
            });
        }

        self.session().probe_provider(injected);
        self.sync();

        self.run("Account lookup", |session| async move {
            if session.query_authorized_accounts().await?.is_connected() {
                session.fetch_balance().await?;
            }
            Ok::<_, AppError>(())
        });
    }

    /// Run a session operation in the background, then refresh the snapshot.
    ///
    /// Failures land in the error banner.
    pub fn run<F, Fut, T>(&self, action: &'static str, op: F)
    where
        F: FnOnce(Rc<Session>) -> Fut + 'static,
        Fut: Future<Output = Result<T, AppError>> + 'static,
        T: 'static,
    {
        let ctx = *self;
        ctx.error.set(None);
        ctx.pending.update(|n| *n += 1);

        spawn_local(async move {
            if let Err(e) = op(ctx.session()).await {
                ctx.report(action, &e);
            }
            ctx.pending.update(|n| *n = n.saturating_sub(1));
            ctx.sync();
        });
    }
}

pub fn provide_session_context() -> SessionContext {
    let context = SessionContext::new();
    provide_context(context);
    context
}

pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}
