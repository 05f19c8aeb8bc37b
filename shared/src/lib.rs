//! # Swap Domain Library
//!
//! Everything the swap front-end does that is not DOM glue lives here, so it
//! can be unit tested natively and reused by the `dex-web` wasm crate.
//!
//! ## Structure
//!
//! - **[`tokens`]** / **[`venues`]**: compiled-in token list and adapter → venue table
//! - **[`amount`]**: decimal input validation, base-unit conversion, display rounding
//! - **[`wallet`]**: the EIP-1193 provider seam and wallet connection flow
//! - **[`router`]**: the aggregator router ABI and the [`router::RouterQuoter`] seam
//! - **[`quote`]**: swap intent, quote fetching and last-request-wins bookkeeping
//! - **[`coin_input`]** / **[`overlay`]**: state models behind the page widgets
//! - **[`config`]**: build-time configuration
//! - **[`error`]**: error types
//! - **[`utils`]**: address formatting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shared::quote::{fetch_quote, SwapIntent};
//! use shared::router::ProviderRouter;
//! use shared::tokens::token_list;
//! # async fn run<P: shared::wallet::Eip1193>(provider: P) -> Result<(), shared::error::QuoteError> {
//! let tokens = token_list();
//! let intent = SwapIntent::new(&tokens[0], &tokens[1], "1.5");
//! let router = ProviderRouter::new(provider, shared::config::config().router_address);
//! let quote = fetch_quote(&router, &intent).await?;
//! println!("{} via {:?}", quote.amount_out, quote.venue_name);
//! # Ok(())
//! # }
//! ```

pub mod amount;
pub mod coin_input;
pub mod config;
pub mod error;
pub mod overlay;
pub mod quote;
pub mod router;
pub mod tokens;
pub mod utils;
pub mod venues;
pub mod wallet;

pub use error::{AmountError, QuoteError, WalletError};
pub use quote::{Quote, QuoteStatus, QuoteTracker, SwapIntent};
pub use tokens::Token;
pub use utils::*;
