//! Coin Input Widget - amount field, token button and USD equivalent

use alloy_primitives::Address;
use leptos::prelude::*;
use rust_decimal::Decimal;
use shared::coin_input::CoinInputModel;
use shared::overlay::CoinOverlay;
use shared::tokens::{find_by_address, Token};
use web_sys::HtmlInputElement;

use crate::components::coin_selector::CoinSelector;
use crate::services::scroll_lock::BodyScrollLock;

#[component]
pub fn CoinInput(
    #[prop(into)] label: String,
    /// Initially selected token
    #[prop(optional)]
    token_index: usize,
    /// Read-only mode
    #[prop(optional)]
    disabled: bool,
    /// Value shown in read-only mode
    #[prop(optional, into)]
    show_value: Option<Signal<Option<Decimal>>>,
    /// Token chosen by the parent; overrides the local selection when it changes
    #[prop(optional, into)]
    selected: Option<Signal<Address>>,
    on_token_change: Callback<Address>,
    #[prop(optional)] on_amount_change: Option<Callback<String>>,
) -> impl IntoView {
    let model = RwSignal::new(if disabled {
        CoinInputModel::display(token_index, None)
    } else {
        CoinInputModel::new(token_index)
    });
    let overlay = RwSignal::new(CoinOverlay::<BodyScrollLock>::default());

    if let Some(show_value) = show_value {
        Effect::new(move |_| {
            let value = show_value.get();
            model.update(|m| m.set_display_value(value));
        });
    }

    if let Some(selected) = selected {
        Effect::new(move |_| {
            let address = selected.get();
            match find_by_address(&address) {
                Some(token) => {
                    model.update(|m| {
                        m.select_token(token);
                    });
                }
                None => log::warn!("Unknown token {} ignored", address),
            }
        });
    }

    let on_input = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let candidate = input.value();
        let accepted = model.try_update(|m| m.try_set_amount(&candidate)).unwrap_or(false);
        if accepted {
            if let Some(callback) = on_amount_change {
                callback.run(candidate);
            }
        } else {
            // Put the last valid value back into the DOM
            input.set_value(&model.with_untracked(|m| m.amount_text()));
        }
    };

    let open_selector = move |_| overlay.update(|o| o.open(BodyScrollLock));

    let on_select = Callback::new(move |token: &'static Token| {
        let changed = model.try_update(|m| m.select_token(token)).unwrap_or(false);
        if changed {
            log::info!("Token changed to {}", token.code);
            on_token_change.run(token.address);
        }
    });

    view! {
        <div class="coin-input" class:disabled=move || model.with(|m| m.is_disabled())>
            <div class="coin-input-label">{label}</div>
            <div class="coin-input-row">
                <input
                    type="text"
                    inputmode="decimal"
                    autocomplete="off"
                    placeholder="0.0"
                    class="coin-input-amount"
                    prop:value=move || model.with(|m| m.amount_text())
                    disabled=move || model.with(|m| m.is_disabled())
                    on:input=on_input
                />
                <button class="coin-input-token" on:click=open_selector>
                    <img
                        class="coin-icon"
                        src=move || model.with(|m| m.token().icon.clone())
                        alt=move || model.with(|m| m.token().code.clone())
                    />
                    <span>{move || model.with(|m| m.token().code.clone())}</span>
                    <span class="chevron">"▾"</span>
                </button>
            </div>
            <div class="coin-input-usd">{move || model.with(|m| m.usd_text(None))}</div>
            <CoinSelector overlay=overlay on_select=on_select/>
        </div>
    }
}
