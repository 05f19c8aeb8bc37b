//! Wallet state management

use leptos::prelude::*;
use shared::error::WalletError;
use shared::wallet::{restore, WalletSession, WalletState};

use crate::services::wallet::{subscribe_provider_events, InjectedProvider, ProviderEvent};

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub wallet: RwSignal<WalletState>,
}

impl WalletContext {
    pub fn new() -> Self {
        let initial = if InjectedProvider::detect().is_some() {
            WalletState::Disconnected
        } else {
            WalletState::Unavailable
        };
        Self { wallet: RwSignal::new(initial) }
    }

    pub fn set_connecting(&self) {
        self.wallet.set(WalletState::Connecting);
    }

    pub fn apply_connect_result(&self, result: Result<WalletSession, WalletError>) {
        if let Err(e) = &result {
            log::warn!("Wallet connection failed: {}", e);
        }
        self.wallet.set(WalletState::from_connect_result(result));
    }

    pub fn disconnect(&self) {
        self.wallet.set(WalletState::Disconnected);
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let context = WalletContext::new();
    provide_context(context);

    let wallet = context.wallet;
    subscribe_provider_events(move |event| match event {
        ProviderEvent::AccountsChanged(accounts) => {
            log::info!("accountsChanged: {} account(s)", accounts.len());
            wallet.update(|state| state.on_accounts_changed(&accounts));
        }
        ProviderEvent::ChainChanged(chain_id) => {
            log::info!("chainChanged: {}", chain_id);
            wallet.update(|state| state.on_chain_changed(&chain_id));
        }
    });

    // Pick up an existing authorization without prompting
    if let Some(provider) = InjectedProvider::detect() {
        leptos::task::spawn_local(async move {
            match restore(&provider).await {
                Ok(Some(session)) => {
                    wallet.try_update(|state| state.on_restored(session));
                }
                Ok(None) => log::debug!("No authorized account to restore"),
                Err(e) => log::warn!("Could not restore wallet session: {}", e),
            }
        });
    }

    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
