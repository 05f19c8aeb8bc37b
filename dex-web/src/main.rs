//! AvaSwap - token swap front-end compiled to WebAssembly
//!
//! Connects an injected EVM wallet and quotes swaps against the aggregator
//! router's `queryNoSplit`.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("AvaSwap starting...");

    if let Err(e) = shared::config::init_config() {
        log::error!("Invalid build configuration, using defaults: {}", e);
    }
    let cfg = shared::config::config();
    log::info!("Router {} on chain {}", cfg.router_address, cfg.chain_id);

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading screen from index.html
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id("leptos-loading") {
        Some(element) => {
            if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
                if let Err(e) = html_element.class_list().add_1("hidden") {
                    log::error!("Failed to hide loading screen: {:?}", e);
                }
            }
        }
        None => log::debug!("Loading element not found"),
    }
}
