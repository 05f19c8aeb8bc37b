//! # Wallet Connector
//!
//! The browser wallet is reached through the EIP-1193 `request` API that
//! extensions inject as `window.ethereum`. This module holds the pieces that
//! do not need a browser:
//!
//! - [`Eip1193`] - the provider seam (implemented over wasm-bindgen in `dex-web`)
//! - [`connect`] - request account access and read the active chain
//! - [`WalletState`] - what the navbar renders
//! - [`WalletKind`] - which extension injected the provider

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Browser extension that injected the provider.
///
/// Several extensions also set `isMetaMask` for compatibility, so the more
/// specific flags win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    MetaMask,
    Core,
    Rabby,
    Coinbase,
    Unknown,
}

impl WalletKind {
    pub fn name(&self) -> &'static str {
        match self {
            WalletKind::MetaMask => "MetaMask",
            WalletKind::Core => "Core",
            WalletKind::Rabby => "Rabby",
            WalletKind::Coinbase => "Coinbase Wallet",
            WalletKind::Unknown => "Browser Wallet",
        }
    }
}

/// `isXxx` flags read off the injected provider object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFlags {
    #[serde(default)]
    pub is_meta_mask: bool,
    #[serde(default)]
    pub is_avalanche: bool,
    #[serde(default)]
    pub is_rabby: bool,
    #[serde(default)]
    pub is_coinbase_wallet: bool,
}

impl From<ProviderFlags> for WalletKind {
    fn from(flags: ProviderFlags) -> Self {
        if flags.is_avalanche {
            WalletKind::Core
        } else if flags.is_rabby {
            WalletKind::Rabby
        } else if flags.is_coinbase_wallet {
            WalletKind::Coinbase
        } else if flags.is_meta_mask {
            WalletKind::MetaMask
        } else {
            WalletKind::Unknown
        }
    }
}

/// Minimal EIP-1193 surface used by the swap page.
///
/// `?Send` because the browser implementation holds `JsValue`s.
#[async_trait(?Send)]
pub trait Eip1193 {
    fn kind(&self) -> WalletKind;

    /// `eth_requestAccounts`; may open the wallet's authorization prompt.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;

    /// `eth_accounts`; accounts this site is already authorized for. Never prompts.
    async fn accounts(&self) -> Result<Vec<String>, WalletError>;

    /// `eth_chainId`, as the provider's hex quantity string.
    async fn chain_id(&self) -> Result<String, WalletError>;

    /// `eth_call` against the latest block.
    async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, WalletError>;
}

/// An authorized account on a known chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Address,
    pub chain_id: u64,
    pub kind: WalletKind,
}

/// Parse an EIP-1193 hex quantity such as `"0xa86a"`.
pub fn parse_chain_id(hex: &str) -> Result<u64, WalletError> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .ok_or_else(|| WalletError::Provider(format!("chain id '{}' is not a hex quantity", hex)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| WalletError::Provider(format!("chain id '{}' is invalid: {}", hex, e)))
}

/// First account of an `eth_requestAccounts` / `accountsChanged` payload.
pub fn first_account(accounts: &[String]) -> Result<Address, WalletError> {
    let first = accounts.first().ok_or(WalletError::NoAccounts)?;
    first
        .parse()
        .map_err(|e| WalletError::Provider(format!("account '{}' is not an address: {}", first, e)))
}

/// Request account access and read the active chain.
///
/// `None` means no provider was injected.
pub async fn connect<P>(provider: Option<&P>) -> Result<WalletSession, WalletError>
where
    P: Eip1193 + ?Sized,
{
    let provider = provider.ok_or(WalletError::NotInstalled)?;
    log::info!("Requesting accounts from {}", provider.kind().name());

    let accounts = provider.request_accounts().await?;
    let address = first_account(&accounts)?;
    let chain_id = parse_chain_id(&provider.chain_id().await?)?;

    log::info!("Wallet connected: {} on chain {}", address, chain_id);
    Ok(WalletSession { address, chain_id, kind: provider.kind() })
}

/// Resume a session the wallet already authorized, without prompting.
///
/// `Ok(None)` when the site has no authorized account yet.
pub async fn restore<P>(provider: &P) -> Result<Option<WalletSession>, WalletError>
where
    P: Eip1193 + ?Sized,
{
    let accounts = provider.accounts().await?;
    let address = match first_account(&accounts) {
        Ok(address) => address,
        Err(WalletError::NoAccounts) => return Ok(None),
        Err(e) => return Err(e),
    };
    let chain_id = parse_chain_id(&provider.chain_id().await?)?;

    log::info!("Restored wallet session: {} on chain {}", address, chain_id);
    Ok(Some(WalletSession { address, chain_id, kind: provider.kind() }))
}

/// Wallet connection state rendered by the navbar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletState {
    /// No injected provider; wallet features are disabled.
    Unavailable,
    Disconnected,
    Connecting,
    Connected(WalletSession),
    Error(String),
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected(_))
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            WalletState::Connected(session) => Some(session.address),
            _ => None,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            WalletState::Connected(session) => Some(session.chain_id),
            _ => None,
        }
    }

    /// Connected, but to a chain other than `expected`.
    pub fn is_wrong_chain(&self, expected: u64) -> bool {
        self.chain_id().is_some_and(|id| id != expected)
    }

    /// State after a connect attempt settles.
    pub fn from_connect_result(result: Result<WalletSession, WalletError>) -> Self {
        match result {
            Ok(session) => WalletState::Connected(session),
            Err(WalletError::NotInstalled) => WalletState::Unavailable,
            Err(e) => WalletState::Error(e.to_string()),
        }
    }

    /// Adopt a session restored on page load, unless the user already
    /// started connecting or an event arrived in the meantime.
    pub fn on_restored(&mut self, session: WalletSession) {
        if matches!(self, WalletState::Disconnected) {
            *self = WalletState::Connected(session);
        }
    }

    /// Apply an `accountsChanged` event. An empty list means the user
    /// disconnected the site from the wallet.
    pub fn on_accounts_changed(&mut self, accounts: &[String]) {
        let WalletState::Connected(session) = self else {
            return;
        };
        match first_account(accounts) {
            Ok(address) => session.address = address,
            Err(_) => *self = WalletState::Disconnected,
        }
    }

    /// Apply a `chainChanged` event.
    pub fn on_chain_changed(&mut self, chain_id_hex: &str) {
        if let WalletState::Connected(session) = self {
            match parse_chain_id(chain_id_hex) {
                Ok(id) => session.chain_id = id,
                Err(e) => log::warn!("Ignoring chainChanged event: {}", e),
            }
        }
    }
}
