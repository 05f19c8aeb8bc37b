//! Injected EVM Wallet Integration via wasm-bindgen
//!
//! Thin JavaScript interop over the EIP-1193 provider that browser
//! extensions (MetaMask, Core, Rabby, Coinbase Wallet) inject as
//! `window.ethereum`. [`InjectedProvider`] implements the
//! [`shared::wallet::Eip1193`] seam, so the connect flow and the router
//! codec stay in the shared crate.

use alloy_primitives::{hex, Address, Bytes};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use shared::error::WalletError;
use shared::wallet::{Eip1193, ProviderFlags, WalletKind};

// ============================================================================
// PROVIDER BINDINGS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function hasEthereum() {
    return typeof window !== 'undefined' && !!window.ethereum;
}

export function providerFlags() {
    const eth = window.ethereum || {};
    return {
        isMetaMask: !!eth.isMetaMask,
        isAvalanche: !!eth.isAvalanche,
        isRabby: !!eth.isRabby,
        isCoinbaseWallet: !!eth.isCoinbaseWallet,
    };
}

export async function ethRequest(method, params) {
    if (!window.ethereum) {
        throw { code: null, message: 'No injected wallet provider' };
    }
    try {
        return await window.ethereum.request({ method, params });
    } catch (error) {
        // Normalize to { code, message } so Rust can classify rejections (4001)
        throw {
            code: typeof error.code === 'number' ? error.code : null,
            message: error.message || String(error),
        };
    }
}

export function onProviderEvent(event, callback) {
    if (window.ethereum && typeof window.ethereum.on === 'function') {
        window.ethereum.on(event, callback);
    }
}
")]
extern "C" {
    #[wasm_bindgen(js_name = hasEthereum)]
    fn has_ethereum() -> bool;

    #[wasm_bindgen(js_name = providerFlags)]
    fn provider_flags() -> JsValue;

    /// `window.ethereum.request({ method, params })`
    #[wasm_bindgen(js_name = ethRequest, catch)]
    async fn eth_request(method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = onProviderEvent)]
    fn on_provider_event(event: &str, callback: &Closure<dyn FnMut(JsValue)>);
}

/// Error object thrown by `ethRequest`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderRpcError {
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl From<ProviderRpcError> for WalletError {
    fn from(err: ProviderRpcError) -> Self {
        WalletError::from_provider(err.code, err.message)
    }
}

fn js_error(err: JsValue) -> WalletError {
    match serde_wasm_bindgen::from_value::<ProviderRpcError>(err.clone()) {
        Ok(rpc) => rpc.into(),
        Err(_) => WalletError::Provider(err.as_string().unwrap_or_else(|| format!("{:?}", err))),
    }
}

#[derive(Serialize)]
struct CallObject {
    to: String,
    data: String,
}

// ============================================================================
// PROVIDER SERVICE
// ============================================================================

/// Handle to the injected `window.ethereum` provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectedProvider {
    kind: WalletKind,
}

impl InjectedProvider {
    /// The injected provider, or `None` when no wallet extension is present.
    pub fn detect() -> Option<Self> {
        if !has_ethereum() {
            return None;
        }
        let flags: ProviderFlags = serde_wasm_bindgen::from_value(provider_flags()).unwrap_or_default();
        Some(Self { kind: flags.into() })
    }

    async fn request(&self, method: &str, params: JsValue) -> Result<JsValue, WalletError> {
        log::debug!("eth request: {}", method);
        eth_request(method, params).await.map_err(js_error)
    }
}

#[async_trait(?Send)]
impl Eip1193 for InjectedProvider {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        let accounts = self.request("eth_requestAccounts", JsValue::UNDEFINED).await?;
        serde_wasm_bindgen::from_value(accounts)
            .map_err(|e| WalletError::Provider(format!("unexpected accounts payload: {}", e)))
    }

    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        let accounts = self.request("eth_accounts", JsValue::UNDEFINED).await?;
        serde_wasm_bindgen::from_value(accounts)
            .map_err(|e| WalletError::Provider(format!("unexpected accounts payload: {}", e)))
    }

    async fn chain_id(&self) -> Result<String, WalletError> {
        self.request("eth_chainId", JsValue::UNDEFINED)
            .await?
            .as_string()
            .ok_or_else(|| WalletError::Provider("eth_chainId did not return a string".to_string()))
    }

    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, WalletError> {
        let call = CallObject { to: to.to_string(), data: hex::encode_prefixed(&data) };
        let params = serde_wasm_bindgen::to_value(&(call, "latest"))
            .map_err(|e| WalletError::Provider(format!("could not encode eth_call: {}", e)))?;

        let result = self
            .request("eth_call", params)
            .await?
            .as_string()
            .ok_or_else(|| WalletError::Provider("eth_call did not return a hex string".to_string()))?;
        result
            .parse::<Bytes>()
            .map_err(|e| WalletError::Provider(format!("eth_call returned invalid hex: {}", e)))
    }
}

/// Provider events the page reacts to.
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

/// Subscribe `handler` to `accountsChanged` and `chainChanged`.
///
/// The callbacks live as long as the page, so the closures are leaked.
pub fn subscribe_provider_events(handler: impl Fn(ProviderEvent) + Clone + 'static) {
    if !has_ethereum() {
        return;
    }

    let on_accounts = handler.clone();
    let accounts_changed = Closure::wrap(Box::new(move |value: JsValue| {
        let accounts: Vec<String> = serde_wasm_bindgen::from_value(value).unwrap_or_default();
        on_accounts(ProviderEvent::AccountsChanged(accounts));
    }) as Box<dyn FnMut(JsValue)>);
    on_provider_event("accountsChanged", &accounts_changed);
    accounts_changed.forget();

    let chain_changed = Closure::wrap(Box::new(move |value: JsValue| {
        if let Some(chain_id) = value.as_string() {
            handler(ProviderEvent::ChainChanged(chain_id));
        }
    }) as Box<dyn FnMut(JsValue)>);
    on_provider_event("chainChanged", &chain_changed);
    chain_changed.forget();
}
