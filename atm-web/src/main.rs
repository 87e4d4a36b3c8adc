//! Metacrafters ATM - Leptos Frontend
//!
//! Talks to the Assessment contract through the injected `window.ethereum`
//! provider. All session logic lives in `lib-core`; this crate binds the
//! browser provider and renders the page.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger; lib-core's tracing events arrive through `log`
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("ATM front-end starting");

    if let Err(e) = lib_core::config::init_config().map_err(lib_core::AppError::Config) {
        log::error!("{}; using defaults", e);
    }

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading element from `index.html`.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id("leptos-loading") {
        Some(loading_element) => {
            if let Some(html_element) = loading_element.dyn_ref::<HtmlElement>() {
                if let Err(e) = html_element.class_list().add_1("hidden") {
                    log::warn!("Failed to hide loading screen: {:?}", e);
                }
            }
            loading_element.set_attribute("style", "display: none !important;").ok();
        }
        None => log::debug!("Loading element not found"),
    }
}
