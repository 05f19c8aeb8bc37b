//! # Quote Flow Tests
//!
//! End-to-end behaviour of intent → router → tracker with a mocked router.

use std::cell::{Cell, RefCell};

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use futures::executor::block_on;

use shared::error::QuoteError;
use shared::quote::{fetch_quote, refresh_quote, Quote, QuoteStatus, QuoteTracker, SwapIntent};
use shared::router::{RouterQuote, RouterQuoter};
use shared::tokens::{token_list, Token};

const TRADER_JOE_ADAPTER: &str = "0xDB66686Ac8bEA67400CF9E5DD6c8849575B90148";

fn eighteen_decimal_pair() -> (&'static Token, &'static Token) {
    let mut it = token_list().iter().filter(|t| t.decimals == 18);
    (it.next().unwrap(), it.next().unwrap())
}

fn exp10(n: u64) -> U256 {
    U256::from(10u64).pow(U256::from(n))
}

/// Router returning a fixed answer and remembering what it was asked.
struct MockRouter {
    answer: Result<RouterQuote, QuoteError>,
    last_request: RefCell<Option<(U256, Address, Address)>>,
    calls: Cell<usize>,
}

impl MockRouter {
    fn answering(answer: Result<RouterQuote, QuoteError>) -> Self {
        Self { answer, last_request: RefCell::new(None), calls: Cell::new(0) }
    }
}

#[async_trait(?Send)]
impl RouterQuoter for MockRouter {
    async fn query_no_split(
        &self,
        amount_in: U256,
        token_in: Address,
        token_out: Address,
    ) -> Result<RouterQuote, QuoteError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some((amount_in, token_in, token_out));
        self.answer.clone()
    }
}

#[test]
fn test_quote_commits_amount_adapter_and_venue_together() {
    let (a, b) = eighteen_decimal_pair();
    let adapter: Address = TRADER_JOE_ADAPTER.parse().unwrap();
    let router = MockRouter::answering(Ok(RouterQuote { amount_out: U256::from(2u64) * exp10(18), adapter }));

    let mut tracker = QuoteTracker::default();
    let intent = SwapIntent::new(a, b, "1");
    assert!(block_on(refresh_quote(&mut tracker, &router, &intent)));

    assert_eq!(
        tracker.quote(),
        Some(&Quote {
            amount_out: "2.0".to_string(),
            adapter,
            venue_name: Some("Trader Joe".to_string()),
        })
    );
    assert_eq!(tracker.status(), &QuoteStatus::Ready);

    let (amount_in, token_in, token_out) = router.last_request.borrow().unwrap();
    assert_eq!(amount_in, exp10(18));
    assert_eq!(token_in, a.address);
    assert_eq!(token_out, b.address);
}

#[test]
fn test_router_failure_retains_previous_quote() {
    let (a, b) = eighteen_decimal_pair();
    let adapter: Address = TRADER_JOE_ADAPTER.parse().unwrap();
    let good = MockRouter::answering(Ok(RouterQuote { amount_out: exp10(18), adapter }));
    let bad = MockRouter::answering(Err(QuoteError::Call("execution reverted".to_string())));

    let mut tracker = QuoteTracker::default();
    block_on(refresh_quote(&mut tracker, &good, &SwapIntent::new(a, b, "1")));
    let before = tracker.quote().cloned();

    block_on(refresh_quote(&mut tracker, &bad, &SwapIntent::new(a, b, "5")));

    assert_eq!(tracker.quote().cloned(), before);
    assert!(matches!(tracker.status(), QuoteStatus::Failed(msg) if msg.contains("execution reverted")));
}

#[test]
fn test_unknown_adapter_has_no_venue() {
    let (a, b) = eighteen_decimal_pair();
    let router = MockRouter::answering(Ok(RouterQuote { amount_out: exp10(17), adapter: Address::ZERO }));

    let quote = block_on(fetch_quote(&router, &SwapIntent::new(a, b, "0.25"))).unwrap();
    assert_eq!(quote.amount_out, "0.1");
    assert_eq!(quote.venue_name, None);
}

#[test]
fn test_token_decimals_are_respected() {
    let usdc = token_list().iter().find(|t| t.code == "USDC").unwrap();
    let wavax = token_list().iter().find(|t| t.code == "WAVAX").unwrap();
    let router = MockRouter::answering(Ok(RouterQuote {
        amount_out: U256::from(34_500_000u64),
        adapter: Address::ZERO,
    }));

    let quote = block_on(fetch_quote(&router, &SwapIntent::new(wavax, usdc, "2"))).unwrap();
    assert_eq!(quote.amount_out, "34.5");
    assert_eq!(router.last_request.borrow().unwrap().0, U256::from(2u64) * exp10(18));
}

#[test]
fn test_invalid_amount_never_reaches_router() {
    let (a, b) = eighteen_decimal_pair();
    let router = MockRouter::answering(Ok(RouterQuote { amount_out: U256::ZERO, adapter: Address::ZERO }));

    let err = block_on(fetch_quote(&router, &SwapIntent::new(a, b, "."))).unwrap_err();
    assert!(matches!(err, QuoteError::Amount(_)));
    assert_eq!(router.calls.get(), 0);
}

#[test]
fn test_out_of_order_responses_keep_newest() {
    let (a, b) = eighteen_decimal_pair();
    let adapter: Address = TRADER_JOE_ADAPTER.parse().unwrap();
    let slow = MockRouter::answering(Ok(RouterQuote { amount_out: exp10(18), adapter }));
    let fast = MockRouter::answering(Ok(RouterQuote { amount_out: U256::from(3u64) * exp10(18), adapter }));

    let mut tracker = QuoteTracker::default();
    let first = tracker.begin();
    let second = tracker.begin();

    let newest = block_on(fetch_quote(&fast, &SwapIntent::new(a, b, "3")));
    assert!(tracker.settle(second, newest));

    let stale = block_on(fetch_quote(&slow, &SwapIntent::new(a, b, "1")));
    assert!(!tracker.settle(first, stale));

    assert_eq!(tracker.quote().unwrap().amount_out, "3.0");
}
