//! Coin Selector Overlay - full-screen token list

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use shared::overlay::{CloseReason, CoinOverlay};
use shared::tokens::Token;

use crate::services::scroll_lock::BodyScrollLock;

pub type SelectorState = CoinOverlay<BodyScrollLock>;

/// Modal token list driven by `overlay`.
///
/// Clicking the backdrop closes it; clicking a row closes it and then runs
/// `on_select`.
#[component]
pub fn CoinSelector(
    overlay: RwSignal<SelectorState>,
    on_select: Callback<&'static Token>,
) -> impl IntoView {
    let is_open = move || overlay.with(|o| o.is_open());

    let close = move |_: MouseEvent| {
        overlay.update(|o| {
            o.close(CloseReason::OutsideClick);
        });
    };

    let select = move |token: &'static Token| {
        let mut chosen = None;
        overlay.update(|o| o.select(token, |t| chosen = Some(t)));
        if let Some(token) = chosen {
            on_select.run(token);
        }
    };

    let rows = move || {
        let tokens = overlay.with(|o| o.visible_tokens());
        if tokens.is_empty() {
            return view! { <li class="coin-selector-empty">"No tokens found"</li> }.into_any();
        }
        tokens
            .into_iter()
            .map(|token| {
                view! {
                    <li class="coin-selector-row" on:click=move |_| select(token)>
                        <img class="coin-icon" src=token.icon.clone() alt=token.code.clone()/>
                        <span class="coin-code">{token.code.clone()}</span>
                        <span class="coin-name">{token.name.clone()}</span>
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    move || {
        is_open().then(|| {
            view! {
                <div class="coin-selector-backdrop" on:click=close>
                    <div class="coin-selector-panel" on:click=|ev: MouseEvent| ev.stop_propagation()>
                        <h3>"Select a token"</h3>
                        <input
                            type="text"
                            class="coin-selector-search"
                            placeholder="Search name or symbol"
                            prop:value=move || overlay.with(|o| o.filter().to_string())
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                overlay.update(|o| o.set_filter(text));
                            }
                        />
                        <ul class="coin-selector-list">{rows}</ul>
                    </div>
                </div>
            }
        })
    }
}
