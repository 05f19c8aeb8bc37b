//! # Application Configuration
//!
//! The front-end has no runtime environment to read from, so configuration is
//! baked in at build time: every field has a default for Avalanche C-Chain and
//! the `DEX_*` variables below override them when set while compiling.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DEX_ROUTER_ADDRESS` | [`Config::router_address`] |
//! | `DEX_CHAIN_ID` | [`Config::chain_id`] |
//! | `DEX_CHAIN_NAME` | [`Config::chain_name`] |
//! | `DEX_QUOTE_DEBOUNCE_MS` | [`Config::quote_debounce_ms`] |
//! | `DEX_SLIPPAGE_BPS` | [`Config::slippage_bps`] |
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use shared::config::{config, init_config};
//!
//! if let Err(e) = init_config() {
//!     log::error!("Invalid build configuration, using defaults: {}", e);
//! }
//! let router = config().router_address;
//! ```

use std::sync::OnceLock;

use alloy_primitives::{address, Address};

/// YakRouter deployment on Avalanche C-Chain.
pub const DEFAULT_ROUTER_ADDRESS: Address = address!("0xc4729e56b831d74bbc18797e0e17a295fa77488c");
pub const DEFAULT_CHAIN_ID: u64 = 43114;
pub const DEFAULT_QUOTE_DEBOUNCE_MS: u32 = 500;
pub const DEFAULT_FEE_BPS: u16 = 30;
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Front-end configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Aggregator router queried for no-split quotes
    pub router_address: Address,

    /// Chain the router is deployed on; a wallet on another chain is flagged
    pub chain_id: u64,

    pub chain_name: String,

    /// Index into the token list for the "You pay" input
    pub default_pay_token: usize,

    /// Index into the token list for the "You receive" input
    pub default_receive_token: usize,

    /// Quiet period after the last input change before a quote is requested
    pub quote_debounce_ms: u32,

    /// Displayed swap fee in basis points
    pub fee_bps: u16,

    /// Displayed slippage tolerance in basis points
    pub slippage_bps: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            router_address: DEFAULT_ROUTER_ADDRESS,
            chain_id: DEFAULT_CHAIN_ID,
            chain_name: "Avalanche C-Chain".to_string(),
            default_pay_token: 0,
            default_receive_token: 1,
            quote_debounce_ms: DEFAULT_QUOTE_DEBOUNCE_MS,
            fee_bps: DEFAULT_FEE_BPS,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
        }
    }
}

impl Config {
    /// Load overrides captured from the build environment.
    pub fn from_build_env() -> Result<Self, String> {
        Self::from_lookup(|key| match key {
            "DEX_ROUTER_ADDRESS" => option_env!("DEX_ROUTER_ADDRESS"),
            "DEX_CHAIN_ID" => option_env!("DEX_CHAIN_ID"),
            "DEX_CHAIN_NAME" => option_env!("DEX_CHAIN_NAME"),
            "DEX_QUOTE_DEBOUNCE_MS" => option_env!("DEX_QUOTE_DEBOUNCE_MS"),
            "DEX_SLIPPAGE_BPS" => option_env!("DEX_SLIPPAGE_BPS"),
            _ => None,
        })
    }

    /// Build a config from defaults plus whatever `lookup` returns.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(value) = lookup("DEX_ROUTER_ADDRESS") {
            config.router_address = value
                .trim()
                .parse()
                .map_err(|e| format!("DEX_ROUTER_ADDRESS must be a 20-byte hex address: {}", e))?;
        }
        if let Some(value) = lookup("DEX_CHAIN_ID") {
            config.chain_id = value
                .trim()
                .parse()
                .map_err(|e| format!("DEX_CHAIN_ID must be a valid number: {}", e))?;
        }
        if let Some(value) = lookup("DEX_CHAIN_NAME") {
            config.chain_name = value.trim().to_string();
        }
        if let Some(value) = lookup("DEX_QUOTE_DEBOUNCE_MS") {
            config.quote_debounce_ms = value
                .trim()
                .parse()
                .map_err(|e| format!("DEX_QUOTE_DEBOUNCE_MS must be a valid number: {}", e))?;
        }
        if let Some(value) = lookup("DEX_SLIPPAGE_BPS") {
            config.slippage_bps = value
                .trim()
                .parse()
                .map_err(|e| format!("DEX_SLIPPAGE_BPS must be a valid number: {}", e))?;
        }

        Ok(config)
    }

    /// Validate values against the token list and sane UI ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.router_address == Address::ZERO {
            return Err("Router address must not be the zero address".to_string());
        }
        if self.chain_id == 0 {
            return Err("Chain id must be non-zero".to_string());
        }

        let token_count = crate::tokens::token_list().len();
        if self.default_pay_token >= token_count || self.default_receive_token >= token_count {
            return Err(format!("Default token indices must be below {}", token_count));
        }
        if self.default_pay_token == self.default_receive_token {
            return Err("Default pay and receive tokens must differ".to_string());
        }

        if self.quote_debounce_ms > 10_000 {
            return Err("Quote debounce must be at most 10000ms".to_string());
        }
        if self.slippage_bps == 0 || self.slippage_bps > 5_000 {
            return Err("Slippage must be between 1 and 5000 bps".to_string());
        }

        Ok(())
    }
}

/// Global configuration instance.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate and install the build configuration.
///
/// # Errors
///
/// Returns an error if an override does not parse, validation fails, or the
/// config was already initialized (including implicitly through [`config()`]).
pub fn init_config() -> Result<(), String> {
    let config = Config::from_build_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// The global configuration, falling back to [`Config::default`] when
/// [`init_config()`] was not called or failed.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Render basis points as a percentage, e.g. `30` → `"0.30%"`.
pub fn format_bps(bps: u16) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}
