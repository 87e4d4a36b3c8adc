//! ATM page
//!
//! Shows the install hint, the connect button or the connected ATM panel
//! depending on the session state.

use alloy_primitives::U256;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::{AppError, SessionState};

use crate::state::session::{use_session_context, SessionContext};
use crate::utils::constants::{CONNECT_PROMPT, DEFAULT_AMOUNT, INSTALL_METAMASK, PROVIDER_REQUIRED};
use crate::utils::format::format_balance;

#[component]
pub fn AtmPage() -> impl IntoView {
    let ctx = use_session_context();
    let state = move || ctx.snapshot.with(|s| s.state);

    view! {
        <main class="atm-container">
            <header>
                <h1>"Welcome to the Metacrafters ATM!"</h1>
            </header>
            <ErrorBanner/>
            {move || match state() {
                SessionState::Uninitialized => view! { <p>"Looking for a wallet..."</p> }.into_any(),
                SessionState::ProviderAbsent => view! { <p>{INSTALL_METAMASK}</p> }.into_any(),
                SessionState::ProviderPresentDisconnected => view! { <ConnectButton/> }.into_any(),
                SessionState::Connected => view! { <AtmPanel/> }.into_any(),
            }}
        </main>
    }
}

#[component]
fn ErrorBanner() -> impl IntoView {
    let ctx = use_session_context();

    move || {
        ctx.error.get().map(|message| {
            view! {
                <div class="error-banner" role="alert">
                    <span>{message}</span>
                    <button class="dismiss-btn" on:click=move |_| ctx.error.set(None)>"×"</button>
                </div>
            }
        })
    }
}

#[component]
fn ConnectButton() -> impl IntoView {
    let ctx = use_session_context();

    view! {
        <button class="connect-btn" on:click=move |_| connect(ctx)>
            {CONNECT_PROMPT}
        </button>
    }
}

/// Prompt for accounts, then read the balance of the new connection.
fn connect(ctx: SessionContext) {
    ctx.error.set(None);
    spawn_local(async move {
        let session = ctx.session();
        let result = match session.request_connection().await {
            Ok(state) if state.is_connected() => session.fetch_balance().await.map(|_| ()),
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => log!("Wallet connected"),
            Err(AppError::ProviderUnavailable) => alert(PROVIDER_REQUIRED),
            Err(e) => ctx.report("Connect", &e),
        }
        ctx.sync();
    });
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

#[component]
fn AtmPanel() -> impl IntoView {
    let ctx = use_session_context();
    let snapshot = ctx.snapshot;
    let amount = U256::from(DEFAULT_AMOUNT);

    let deposit = move |_| ctx.run("Deposit", move |session| async move { session.deposit(amount).await });
    let withdraw = move |_| ctx.run("Withdraw", move |session| async move { session.withdraw(amount).await });
    let show_owner = move |_| {
        ctx.run("Owner lookup", |session| async move { session.reveal_owner_address().await })
    };
    let transfer = move |_| {
        let new_owner = ctx.session().transfer_draft();
        ctx.run("Ownership transfer", move |session| async move {
            session.transfer_ownership(&new_owner).await
        })
    };
    let on_draft = move |ev: leptos::ev::Event| {
        ctx.session().set_transfer_draft(event_target_value(&ev));
        ctx.sync();
    };

    view! {
        <div class="container">
            <div class="account-info">
                <For
                    each=move || snapshot.with(|s| s.accounts.clone())
                    key=|address| *address
                    children=move |address| view! {
                        <div>"Connected Account: " {address.to_checksum(None)}</div>
                        <hr/>
                    }
                />
                <p>"Your Balance: " {move || snapshot.with(|s| format_balance(s.balance))}</p>
                <Show when=move || ctx.is_busy()>
                    <p class="pending">"Waiting for the wallet..."</p>
                </Show>
            </div>
            <div class="transaction-buttons">
                <button class="deposit-btn" on:click=deposit>
                    {format!("Deposit {} ETH", DEFAULT_AMOUNT)}
                </button>
                <button class="withdraw-btn" on:click=withdraw>
                    {format!("Withdraw {} ETH", DEFAULT_AMOUNT)}
                </button>
                <button class="owner-btn" on:click=show_owner>"Show Owner Address"</button>
                {move || {
                    snapshot.with(|s| {
                        s.owner.address.filter(|_| s.owner.visible).map(|owner| {
                            view! {
                                <div class="owner-address">
                                    "Current Owner Address: " {owner.to_checksum(None)}
                                </div>
                            }
                        })
                    })
                }}
            </div>
            <div class="transfer-ownership">
                <label>"New owner address"</label>
                <input
                    class="owner-input"
                    placeholder="Enter new owner address"
                    type="text"
                    prop:value=move || snapshot.with(|s| s.transfer_draft.clone())
                    on:input=on_draft
                />
                <button class="transfer-btn" on:click=transfer>
                    "Transfer Ownership"
                </button>
            </div>
        </div>
    }
}
