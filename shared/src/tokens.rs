//! # Token List
//!
//! The tradable tokens are a compiled-in table (`data/tokens.json`), parsed
//! once on first use. Widgets hold `&'static Token` references into it, so
//! selecting a token never copies it.

use alloy_primitives::Address;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::DEFAULT_DECIMALS;

const TOKENS_JSON: &str = include_str!("../data/tokens.json");

static TOKENS: Lazy<Vec<Token>> = Lazy::new(|| {
    serde_json::from_str(TOKENS_JSON).expect("data/tokens.json must be a valid token list")
});

fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

/// A tradable ERC-20 token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Contract address on the configured chain
    pub address: Address,

    /// Ticker symbol shown on the token button (e.g. `USDC`)
    pub code: String,

    pub name: String,

    /// Icon path relative to the site root
    pub icon: String,

    /// Reference USD price, used as the exchange rate for USD equivalents
    pub price: Decimal,

    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

/// All tokens, in display order.
pub fn token_list() -> &'static [Token] {
    &TOKENS
}

/// Token at `index`, falling back to the first entry when out of range.
pub fn token_at(index: usize) -> &'static Token {
    let tokens = token_list();
    tokens.get(index).unwrap_or(&tokens[0])
}

pub fn find_by_address(address: &Address) -> Option<&'static Token> {
    token_list().iter().find(|token| token.address == *address)
}

/// Tokens whose code or name contains `filter`, ignoring case.
///
/// An empty filter returns the whole list.
pub fn filter_tokens(filter: &str) -> Vec<&'static Token> {
    let filter = filter.trim().to_lowercase();
    token_list()
        .iter()
        .filter(|token| {
            filter.is_empty()
                || token.code.to_lowercase().contains(&filter)
                || token.name.to_lowercase().contains(&filter)
        })
        .collect()
}
