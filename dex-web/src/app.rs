//! AvaSwap front-end - Leptos application root

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::Navbar;
use crate::pages::SwapPage;
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    provide_wallet_context();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <main>
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=path!("/") view=SwapPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card not-found">
            <h1>"404 - Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href="/">
                <span class="btn">"Back to Swap"</span>
            </A>
        </div>
    }
}
