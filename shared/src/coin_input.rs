//! # Coin Input Model
//!
//! State behind one amount field + token button. The web component owns a
//! `CoinInputModel` per instance and renders from it.

use rust_decimal::Decimal;

use crate::amount::{format_fixed2, is_decimal_input, parse_decimal};
use crate::tokens::{token_at, Token};

/// What the field shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// User typed amount.
    Editable,
    /// Read-only display of an externally supplied value.
    Display(Option<Decimal>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinInputModel {
    token: &'static Token,
    amount: String,
    mode: InputMode,
}

impl CoinInputModel {
    /// Editable input starting on the token at `token_index`.
    pub fn new(token_index: usize) -> Self {
        Self { token: token_at(token_index), amount: String::new(), mode: InputMode::Editable }
    }

    /// Read-only input rendering `value`.
    pub fn display(token_index: usize, value: Option<Decimal>) -> Self {
        Self { token: token_at(token_index), amount: String::new(), mode: InputMode::Display(value) }
    }

    pub fn token(&self) -> &'static Token {
        self.token
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.mode, InputMode::Display(_))
    }

    /// Apply the field's would-be new value.
    ///
    /// Returns `false`, leaving the amount untouched, when the value is not a
    /// decimal or the input is read-only.
    pub fn try_set_amount(&mut self, candidate: &str) -> bool {
        if self.is_disabled() || !is_decimal_input(candidate) {
            return false;
        }
        self.amount = candidate.to_string();
        true
    }

    /// Select `token`. Returns `false` if it was already selected.
    pub fn select_token(&mut self, token: &'static Token) -> bool {
        if std::ptr::eq(self.token, token) {
            return false;
        }
        self.token = token;
        true
    }

    pub fn set_display_value(&mut self, value: Option<Decimal>) {
        self.mode = InputMode::Display(value);
    }

    /// Text for the amount field.
    pub fn amount_text(&self) -> String {
        match &self.mode {
            InputMode::Editable => self.amount.clone(),
            InputMode::Display(Some(value)) => format_fixed2(*value),
            InputMode::Display(None) => String::new(),
        }
    }

    /// Amount multiplied by the token's exchange rate, two decimals.
    ///
    /// `rate` overrides the token's reference price when given.
    pub fn usd_value(&self, rate: Option<Decimal>) -> String {
        let rate = rate.or(Some(self.token.price)).filter(|r| !r.is_zero());
        let amount = match &self.mode {
            InputMode::Editable => parse_decimal(&self.amount),
            InputMode::Display(value) => *value,
        };
        match (amount, rate) {
            (Some(amount), Some(rate)) => amount
                .checked_mul(rate)
                .map(format_fixed2)
                .unwrap_or_else(|| "0.00".to_string()),
            _ => "0.00".to_string(),
        }
    }

    pub fn usd_text(&self, rate: Option<Decimal>) -> String {
        format!("${}", self.usd_value(rate))
    }
}
