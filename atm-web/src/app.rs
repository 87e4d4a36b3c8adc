//! Root component and routes

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::Navbar;
use crate::pages::AtmPage;
use crate::state::session::provide_session_context;

#[component]
pub fn App() -> impl IntoView {
    let session = provide_session_context();

    // Probe the provider once the page is in the DOM
    Effect::new(move || session.initialize());

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=AtmPage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card" style="max-width: 500px; margin: 48px auto; text-align: center;">
            <h1>"404 - Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href="/">
                <span class="btn">"Go to the ATM"</span>
            </A>
        </div>
    }
}
