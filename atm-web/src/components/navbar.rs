//! Navigation bar with the active account

use leptos::prelude::*;
use leptos_router::components::A;
use shared::utils::truncate_address;

use crate::state::session::use_session_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_session_context();
    let active = move || {
        ctx.snapshot
            .with(|s| s.accounts.first().map(|a| truncate_address(&a.to_checksum(None))))
    };

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Metacrafters ATM"</span>
                </A>
                {move || active().map(|address| view! {
                    <span class="nav-account" title="Active account">{address}</span>
                })}
            </div>
        </nav>
    }
}
