//! # Quote Fetching
//!
//! A [`SwapIntent`] (pay token, receive token, typed amount) is turned into a
//! [`Quote`] by [`fetch_quote`]. The page keeps the current quote in a
//! [`QuoteTracker`], which enforces two rules:
//!
//! - **all or nothing**: amount out, adapter and venue are one [`Quote`]
//!   value, replaced together or not at all; a failed request leaves the
//!   previous quote in place.
//! - **last request wins**: every request takes a [`QuoteTicket`]; answers
//!   carrying anything but the newest ticket are dropped, so a slow early
//!   response can never overwrite a newer one.
//!
//! ```rust
//! use shared::quote::{Quote, QuoteTracker};
//! use alloy_primitives::Address;
//!
//! let mut tracker = QuoteTracker::default();
//! let slow = tracker.begin();
//! let fast = tracker.begin();
//!
//! let quote = |amount: &str| Quote { amount_out: amount.into(), adapter: Address::ZERO, venue_name: None };
//! assert!(tracker.commit(fast, quote("2.0")));
//! assert!(!tracker.commit(slow, quote("1.0")));
//! assert_eq!(tracker.quote().unwrap().amount_out, "2.0");
//! ```

use alloy_primitives::Address;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::amount::{parse_decimal, parse_units, format_units};
use crate::error::{AmountError, QuoteError};
use crate::router::RouterQuoter;
use crate::tokens::Token;
use crate::venues::venue_name;

/// What the user asked to trade. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapIntent {
    pub token_in: &'static Token,
    pub token_out: &'static Token,
    /// Raw text of the amount field; empty or a valid decimal
    pub amount_in: String,
}

impl SwapIntent {
    pub fn new(token_in: &'static Token, token_out: &'static Token, amount_in: impl Into<String>) -> Self {
        Self { token_in, token_out, amount_in: amount_in.into() }
    }

    /// Whether there is an amount to quote at all.
    ///
    /// Only an empty or separator-only field is unquotable. Amounts that are
    /// typed but unusable (too many decimals, too large) are quotable and
    /// fail with an [`AmountError`] so the page can show why.
    pub fn is_quotable(&self) -> bool {
        !matches!(
            parse_units(&self.amount_in, self.token_in.decimals),
            Err(AmountError::Empty)
        )
    }

    /// Swap pay and receive tokens, keeping the typed amount.
    pub fn flipped(&self) -> Self {
        Self {
            token_in: self.token_out,
            token_out: self.token_in,
            amount_in: self.amount_in.clone(),
        }
    }
}

/// A router answer in display form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
    /// Human decimal amount of `token_out`, e.g. `"2.0"`
    pub amount_out: String,
    pub adapter: Address,
    /// `None` when the adapter is not in the venue table
    pub venue_name: Option<String>,
}

impl Quote {
    pub fn amount_out_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.amount_out)
    }
}

/// Fetch a no-split quote for `intent`.
///
/// Amounts are converted with each token's own decimals.
pub async fn fetch_quote<R>(router: &R, intent: &SwapIntent) -> Result<Quote, QuoteError>
where
    R: RouterQuoter + ?Sized,
{
    let amount_in = parse_units(&intent.amount_in, intent.token_in.decimals)?;
    let answer = router
        .query_no_split(amount_in, intent.token_in.address, intent.token_out.address)
        .await?;

    Ok(Quote {
        amount_out: format_units(answer.amount_out, intent.token_out.decimals),
        adapter: answer.adapter,
        venue_name: venue_name(&answer.adapter).map(str::to_string),
    })
}

/// Status line shown under the swap form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum QuoteStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Sequence number handed out by [`QuoteTracker::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuoteTicket(u64);

/// Current quote plus request sequencing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteTracker {
    quote: Option<Quote>,
    status: QuoteStatus,
    latest: u64,
}

impl QuoteTracker {
    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn status(&self) -> &QuoteStatus {
        &self.status
    }

    /// The quote, only while it answers the current request.
    pub fn ready_quote(&self) -> Option<&Quote> {
        match self.status {
            QuoteStatus::Ready => self.quote.as_ref(),
            _ => None,
        }
    }

    /// Start a request. Any ticket issued earlier becomes stale.
    pub fn begin(&mut self) -> QuoteTicket {
        self.latest += 1;
        self.status = QuoteStatus::Loading;
        log::debug!("Quote request #{} started", self.latest);
        QuoteTicket(self.latest)
    }

    pub fn is_current(&self, ticket: QuoteTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Store a successful answer. Returns `false` if the ticket was stale.
    pub fn commit(&mut self, ticket: QuoteTicket, quote: Quote) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Dropping stale quote #{} (latest #{})", ticket.0, self.latest);
            return false;
        }
        self.quote = Some(quote);
        self.status = QuoteStatus::Ready;
        true
    }

    /// Record a failure, keeping the previous quote. Returns `false` if the
    /// ticket was stale.
    pub fn fail(&mut self, ticket: QuoteTicket, error: &QuoteError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        log::warn!("Quote #{} failed: {}", ticket.0, error);
        self.status = QuoteStatus::Failed(error.to_string());
        true
    }

    /// Settle `ticket` with the outcome of [`fetch_quote`].
    pub fn settle(&mut self, ticket: QuoteTicket, result: Result<Quote, QuoteError>) -> bool {
        match result {
            Ok(quote) => self.commit(ticket, quote),
            Err(e) => self.fail(ticket, &e),
        }
    }

    /// Invalidate in-flight requests without touching the quote, e.g. when
    /// the amount field is cleared.
    pub fn cancel(&mut self) {
        self.latest += 1;
        self.status = QuoteStatus::Idle;
    }

    /// Decide what to do after `intent` or the wallet connection changed.
    ///
    /// Returns the ticket for a router request, or `None` when no request
    /// should be sent:
    /// - wallet not connected, or nothing typed: in-flight requests are
    ///   cancelled and the status goes back to idle
    /// - unusable amount: the status becomes `Failed` with the amount error
    pub fn prepare(&mut self, intent: &SwapIntent, wallet_connected: bool) -> Option<QuoteTicket> {
        if !wallet_connected || !intent.is_quotable() {
            self.cancel();
            return None;
        }

        let ticket = self.begin();
        if let Err(e) = parse_units(&intent.amount_in, intent.token_in.decimals) {
            self.fail(ticket, &QuoteError::Amount(e));
            return None;
        }
        Some(ticket)
    }
}

/// Begin a request on `tracker`, fetch, and settle it.
///
/// Convenience for callers that own the tracker across the await; the web
/// page splits these steps around its debounce timer instead.
pub async fn refresh_quote<R>(tracker: &mut QuoteTracker, router: &R, intent: &SwapIntent) -> bool
where
    R: RouterQuoter + ?Sized,
{
    let ticket = tracker.begin();
    let result = fetch_quote(router, intent).await;
    tracker.settle(ticket, result)
}

/// Derived numbers shown below the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapSummary {
    /// `"1 WAVAX = 17.25 USDC"`, `None` without a usable quote
    pub rate: Option<String>,
    pub venue: Option<String>,
    pub fee: String,
    pub slippage: String,
}

impl SwapSummary {
    pub fn new(intent: &SwapIntent, quote: Option<&Quote>, fee_bps: u16, slippage_bps: u16) -> Self {
        Self {
            rate: quote.and_then(|q| exchange_rate(intent, q)),
            venue: quote.and_then(|q| q.venue_name.clone()),
            fee: crate::config::format_bps(fee_bps),
            slippage: crate::config::format_bps(slippage_bps),
        }
    }
}

/// `amountOut / amountIn`, rounded to six places with trailing zeros trimmed.
pub fn exchange_rate(intent: &SwapIntent, quote: &Quote) -> Option<String> {
    let amount_in = parse_decimal(&intent.amount_in)?;
    let amount_out = quote.amount_out_decimal()?;
    let rate = amount_out.checked_div(amount_in)?;
    let rate = rate
        .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    Some(format!("1 {} = {} {}", intent.token_in.code, rate, intent.token_out.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token_list;

    fn quote(amount: &str) -> Quote {
        Quote { amount_out: amount.to_string(), adapter: Address::ZERO, venue_name: None }
    }

    fn intent(amount: &str) -> SwapIntent {
        let tokens = token_list();
        SwapIntent::new(&tokens[0], &tokens[1], amount)
    }

    #[test]
    fn test_stale_commit_is_dropped() {
        let mut tracker = QuoteTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.is_current(first));
        assert!(tracker.commit(second, quote("2.0")));
        assert!(!tracker.commit(first, quote("1.0")));
        assert_eq!(tracker.quote(), Some(&quote("2.0")));
        assert_eq!(tracker.status(), &QuoteStatus::Ready);
    }

    #[test]
    fn test_failure_keeps_previous_quote() {
        let mut tracker = QuoteTracker::default();
        let ok = tracker.begin();
        tracker.commit(ok, quote("3.5"));

        let failing = tracker.begin();
        assert!(tracker.fail(failing, &QuoteError::Call("execution reverted".to_string())));
        assert_eq!(tracker.quote(), Some(&quote("3.5")));
        assert_eq!(
            tracker.status(),
            &QuoteStatus::Failed("Router call failed: execution reverted".to_string())
        );
    }

    #[test]
    fn test_stale_failure_does_not_touch_status() {
        let mut tracker = QuoteTracker::default();
        let old = tracker.begin();
        let new = tracker.begin();
        tracker.commit(new, quote("1.0"));

        assert!(!tracker.fail(old, &QuoteError::Decode("bad".to_string())));
        assert_eq!(tracker.status(), &QuoteStatus::Ready);
    }

    #[test]
    fn test_cancel_invalidates_in_flight_request() {
        let mut tracker = QuoteTracker::default();
        let ticket = tracker.begin();
        tracker.cancel();

        assert!(!tracker.commit(ticket, quote("9.0")));
        assert_eq!(tracker.quote(), None);
        assert_eq!(tracker.status(), &QuoteStatus::Idle);
    }

    #[test]
    fn test_intent_quotable() {
        assert!(intent("1").is_quotable());
        assert!(intent("0.5").is_quotable());
        assert!(!intent("").is_quotable());
        assert!(!intent(".").is_quotable());
    }

    fn usdc_in(amount: &str) -> SwapIntent {
        let usdc = token_list().iter().find(|t| t.code == "USDC").unwrap();
        SwapIntent::new(usdc, &token_list()[0], amount)
    }

    #[test]
    fn test_prepare_requests_valid_amount() {
        let mut tracker = QuoteTracker::default();
        let ticket = tracker.prepare(&intent("1.5"), true).unwrap();
        assert!(tracker.is_current(ticket));
        assert_eq!(tracker.status(), &QuoteStatus::Loading);
    }

    #[test]
    fn test_prepare_reports_excess_decimals() {
        let mut tracker = QuoteTracker::default();
        let ok = tracker.begin();
        tracker.commit(ok, quote("3.5"));

        assert_eq!(tracker.prepare(&usdc_in("1.1234567"), true), None);
        assert_eq!(
            tracker.status(),
            &QuoteStatus::Failed("Invalid amount: at most 6 decimal places are supported".to_string())
        );
        assert_eq!(tracker.quote(), Some(&quote("3.5")));
    }

    #[test]
    fn test_prepare_reports_overflow() {
        let mut tracker = QuoteTracker::default();
        assert_eq!(tracker.prepare(&intent(&"9".repeat(80)), true), None);
        assert_eq!(
            tracker.status(),
            &QuoteStatus::Failed("Invalid amount: amount does not fit in 256 bits".to_string())
        );
    }

    #[test]
    fn test_prepare_empty_amount_goes_idle() {
        let mut tracker = QuoteTracker::default();
        let in_flight = tracker.prepare(&intent("2"), true).unwrap();

        assert_eq!(tracker.prepare(&intent(""), true), None);
        assert_eq!(tracker.status(), &QuoteStatus::Idle);
        assert!(!tracker.commit(in_flight, quote("1.0")));
    }

    #[test]
    fn test_disconnect_hides_rate_for_new_amount() {
        let mut tracker = QuoteTracker::default();
        let ticket = tracker.prepare(&intent("1"), true).unwrap();
        tracker.commit(ticket, quote("2.0"));

        // wallet disconnected, then a new amount typed
        let typed = intent("4");
        assert_eq!(tracker.prepare(&typed, false), None);
        assert_eq!(tracker.status(), &QuoteStatus::Idle);

        assert_eq!(tracker.ready_quote(), None);
        assert_eq!(SwapSummary::new(&typed, tracker.ready_quote(), 30, 50).rate, None);
    }

    #[test]
    fn test_flipped_intent() {
        let original = intent("4");
        let flipped = original.flipped();
        assert!(std::ptr::eq(flipped.token_in, original.token_out));
        assert!(std::ptr::eq(flipped.token_out, original.token_in));
        assert_eq!(flipped.amount_in, "4");
    }

    #[test]
    fn test_exchange_rate() {
        let rate = exchange_rate(&intent("2"), &quote("34.5")).unwrap();
        assert_eq!(rate, "1 WAVAX = 17.25 USDC");

        let rate = exchange_rate(&intent("3"), &quote("1.0")).unwrap();
        assert_eq!(rate, "1 WAVAX = 0.333333 USDC");

        assert_eq!(exchange_rate(&intent(""), &quote("1.0")), None);
        assert_eq!(exchange_rate(&intent("0"), &quote("1.0")), None);
    }

    #[test]
    fn test_summary() {
        let mut q = quote("34.5");
        q.venue_name = Some("Trader Joe".to_string());
        let summary = SwapSummary::new(&intent("2"), Some(&q), 30, 50);

        assert_eq!(summary.rate.as_deref(), Some("1 WAVAX = 17.25 USDC"));
        assert_eq!(summary.venue.as_deref(), Some("Trader Joe"));
        assert_eq!(summary.fee, "0.30%");
        assert_eq!(summary.slippage, "0.50%");

        let empty = SwapSummary::new(&intent("2"), None, 30, 50);
        assert_eq!(empty.rate, None);
        assert_eq!(empty.venue, None);
    }
}
