//! Swap Page - pay/receive inputs wired to the router quote

use alloy_primitives::Address;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use shared::config::config;
use shared::error::{QuoteError, WalletError};
use shared::quote::{fetch_quote, QuoteStatus, QuoteTracker, SwapIntent, SwapSummary};
use shared::router::ProviderRouter;
use shared::tokens::{find_by_address, token_at};

use crate::components::CoinInput;
use crate::services::wallet::InjectedProvider;
use crate::state::wallet::use_wallet_context;

#[component]
pub fn SwapPage() -> impl IntoView {
    let cfg = config();
    let wallet_ctx = use_wallet_context();
    let intent = RwSignal::new(SwapIntent::new(
        token_at(cfg.default_pay_token),
        token_at(cfg.default_receive_token),
        "",
    ));
    let tracker = RwSignal::new(QuoteTracker::default());

    // Re-quote whenever the amount, either token or the wallet connection changes
    Effect::new(move |_| {
        let current = intent.get();
        let connected = wallet_ctx.wallet.with(|w| w.is_connected());
        let Some(ticket) = tracker.try_update(|t| t.prepare(&current, connected)).flatten() else {
            return;
        };
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(cfg.quote_debounce_ms).await;
            if !tracker.try_with_untracked(|t| t.is_current(ticket)).unwrap_or(false) {
                return;
            }

            let result = match InjectedProvider::detect() {
                Some(provider) => {
                    let router = ProviderRouter::new(provider, cfg.router_address);
                    fetch_quote(&router, &current).await
                }
                None => Err(QuoteError::Wallet(WalletError::NotInstalled)),
            };
            tracker.try_update(|t| t.settle(ticket, result));
        });
    });

    let set_pay_token = Callback::new(move |address: Address| {
        if let Some(token) = find_by_address(&address) {
            intent.update(|i| i.token_in = token);
        }
    });
    let set_receive_token = Callback::new(move |address: Address| {
        if let Some(token) = find_by_address(&address) {
            intent.update(|i| i.token_out = token);
        }
    });
    let set_amount = Callback::new(move |amount: String| {
        intent.update(|i| i.amount_in = amount);
    });
    let flip = move |_| intent.update(|i| *i = i.flipped());

    let pay_selected = Signal::derive(move || intent.with(|i| i.token_in.address));
    let receive_selected = Signal::derive(move || intent.with(|i| i.token_out.address));
    let amount_out = Signal::derive(move || {
        tracker.with(|t| t.quote().and_then(|q| q.amount_out_decimal()))
    });

    // Only a settled quote matches the current intent
    let summary = Memo::new(move |_| {
        tracker.with(|t| {
            intent.with(|i| SwapSummary::new(i, t.ready_quote(), cfg.fee_bps, cfg.slippage_bps))
        })
    });

    let status_line = move || match tracker.with(|t| t.status().clone()) {
        QuoteStatus::Idle => None,
        QuoteStatus::Loading => Some(view! { <p class="quote-status loading">"Fetching best price..."</p> }.into_any()),
        QuoteStatus::Ready => None,
        QuoteStatus::Failed(msg) => Some(view! { <p class="quote-status error">{format!("Quote failed: {}", msg)}</p> }.into_any()),
    };

    view! {
        <div class="swap-layout">
            <section class="panel chart-panel"></section>

            <section class="panel swap-panel">
                <h2>"Swap"</h2>
                <CoinInput
                    label="You pay"
                    token_index=cfg.default_pay_token
                    selected=pay_selected
                    on_token_change=set_pay_token
                    on_amount_change=set_amount
                />
                <button class="flip-button" title="Switch tokens" on:click=flip>"⇅"</button>
                <CoinInput
                    label="You receive"
                    token_index=cfg.default_receive_token
                    disabled=true
                    show_value=amount_out
                    selected=receive_selected
                    on_token_change=set_receive_token
                />

                {status_line}

                <dl class="swap-details">
                    <dt>"Rate"</dt>
                    <dd>{move || summary.with(|s| s.rate.clone().unwrap_or_else(|| "-".to_string()))}</dd>
                    <dt>"Route"</dt>
                    <dd>{move || summary.with(|s| s.venue.clone().unwrap_or_else(|| "-".to_string()))}</dd>
                    <dt>"Fee"</dt>
                    <dd>{move || summary.with(|s| s.fee.clone())}</dd>
                    <dt>"Slippage"</dt>
                    <dd>{move || summary.with(|s| s.slippage.clone())}</dd>
                </dl>
            </section>

            <section class="panel orders-panel"></section>
            <section class="panel trades-panel"></section>
        </div>
    }
}
