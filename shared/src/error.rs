//! # Error Types
//!
//! Every fallible operation in the swap flow returns one of these `thiserror`
//! enums. The front-end never panics on them: wallet errors are shown in the
//! navbar, quote errors are logged and shown as the quote status while the
//! previous quote stays on screen.
//!
//! ## Error Categories
//!
//! - [`AmountError`]: the typed amount cannot be turned into base units
//! - [`WalletError`]: the injected provider is missing, refused, or failed
//! - [`QuoteError`]: anything that stops a router quote from being produced
//!
//! ## Error Conversion
//!
//! `AmountError` and `WalletError` convert into `QuoteError` with `?`:
//!
//! ```rust
//! use shared::error::{AmountError, QuoteError};
//!
//! fn check(input: &str) -> Result<(), QuoteError> {
//!     if input.is_empty() {
//!         return Err(AmountError::Empty.into());
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(check("").unwrap_err().to_string(), "Invalid amount: amount is empty");
//! ```

use thiserror::Error;

/// Reasons a typed amount cannot be converted to base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    Malformed(String),

    /// More fractional digits than the token supports.
    #[error("at most {decimals} decimal places are supported")]
    TooManyDecimals { decimals: u8 },

    #[error("amount does not fit in 256 bits")]
    Overflow,
}

/// Wallet provider errors.
///
/// `NotInstalled` and `Rejected` are shown to the user rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No injected `window.ethereum` object.
    #[error("No browser wallet found")]
    NotInstalled,

    /// The user dismissed or refused the authorization prompt.
    #[error("Wallet request rejected: {0}")]
    Rejected(String),

    #[error("Wallet returned no accounts")]
    NoAccounts,

    /// Any other provider failure (RPC error, malformed response).
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

/// Errors produced while fetching a router quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The `eth_call` itself failed (revert, network, provider).
    #[error("Router call failed: {0}")]
    Call(String),

    /// The call returned data that is not a `Query` tuple.
    #[error("Could not decode router response: {0}")]
    Decode(String),
}

/// EIP-1193 error code for a user-rejected request.
pub const USER_REJECTED_CODE: i64 = 4001;

impl WalletError {
    /// Classify a provider error from its EIP-1193 code and message.
    pub fn from_provider(code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some(USER_REJECTED_CODE) => WalletError::Rejected(message),
            _ => WalletError::Provider(message),
        }
    }
}
