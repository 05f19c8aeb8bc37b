//! Navigation Bar Component with the wallet connect button

use leptos::prelude::*;
use leptos_router::components::A;
use shared::config::config;
use shared::utils::truncate_address;
use shared::wallet::{connect, WalletState};

use crate::services::wallet::InjectedProvider;
use crate::state::wallet::use_wallet_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    let on_connect = move |_| {
        if matches!(wallet_ctx.wallet.get_untracked(), WalletState::Connecting) {
            return;
        }
        wallet_ctx.set_connecting();
        leptos::task::spawn_local(async move {
            let provider = InjectedProvider::detect();
            let result = connect(provider.as_ref()).await;
            wallet_ctx.apply_connect_result(result);
        });
    };

    let wrong_chain = move || wallet_ctx.wallet.with(|state| state.is_wrong_chain(config().chain_id));

    let button = move || match wallet_ctx.wallet.get() {
        WalletState::Unavailable => view! {
            <button class="btn btn-wallet" disabled=true title="Install MetaMask, Core or another EVM wallet">
                "Install a wallet"
            </button>
        }
        .into_any(),
        WalletState::Connecting => view! {
            <button class="btn btn-wallet" disabled=true>"Connecting..."</button>
        }
        .into_any(),
        WalletState::Connected(session) => {
            let label = truncate_address(&session.address);
            view! {
                <button
                    class="btn btn-wallet connected"
                    title=session.kind.name()
                    on:click=move |_| wallet_ctx.disconnect()
                >
                    {label}
                </button>
            }
            .into_any()
        }
        WalletState::Disconnected | WalletState::Error(_) => view! {
            <button class="btn btn-wallet" on:click=on_connect>"Connect Wallet"</button>
        }
        .into_any(),
    };

    let error = move || match wallet_ctx.wallet.get() {
        WalletState::Error(msg) => Some(view! { <span class="nav-error">{msg}</span> }),
        _ => None,
    };

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"AvaSwap"</span>
                </A>
                <div class="nav-wallet">
                    <Show when=wrong_chain>
                        <span class="nav-warning">{format!("Switch to {}", config().chain_name)}</span>
                    </Show>
                    {error}
                    {button}
                </div>
            </div>
        </nav>
    }
}
