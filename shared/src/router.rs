//! # Aggregator Router
//!
//! The router exposes a read-only best-price lookup that routes the whole
//! trade through a single adapter:
//!
//! ```text
//! queryNoSplit(uint256 amountIn, address tokenIn, address tokenOut)
//!     returns (Query { address adapter; address tokenIn; address tokenOut; uint256 amountOut })
//! ```
//!
//! [`RouterQuoter`] is the seam the quote fetcher talks to. [`ProviderRouter`]
//! implements it by ABI-encoding the call and sending it as an `eth_call`
//! through any [`Eip1193`] provider.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolType};
use async_trait::async_trait;

use crate::error::QuoteError;
use crate::wallet::Eip1193;

sol! {
    /// Best single-adapter route found by the router.
    struct Query {
        address adapter;
        address tokenIn;
        address tokenOut;
        uint256 amountOut;
    }

    function queryNoSplit(uint256 amountIn, address tokenIn, address tokenOut) external view returns (Query memory);
}

/// Router answer in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouterQuote {
    pub amount_out: U256,
    pub adapter: Address,
}

impl From<Query> for RouterQuote {
    fn from(query: Query) -> Self {
        Self { amount_out: query.amountOut, adapter: query.adapter }
    }
}

/// Anything that can answer a no-split quote.
#[async_trait(?Send)]
pub trait RouterQuoter {
    async fn query_no_split(
        &self,
        amount_in: U256,
        token_in: Address,
        token_out: Address,
    ) -> Result<RouterQuote, QuoteError>;
}

/// Calldata for `queryNoSplit(amountIn, tokenIn, tokenOut)`.
pub fn encode_query_no_split(amount_in: U256, token_in: Address, token_out: Address) -> Bytes {
    queryNoSplitCall { amountIn: amount_in, tokenIn: token_in, tokenOut: token_out }
        .abi_encode()
        .into()
}

/// Decode the `Query` tuple returned by `queryNoSplit`.
pub fn decode_query_no_split(data: &[u8]) -> Result<RouterQuote, QuoteError> {
    if data.is_empty() {
        // eth_call against an address without code returns "0x"
        return Err(QuoteError::Decode("empty response, is the router address correct?".to_string()));
    }
    <Query as SolType>::abi_decode(data)
        .map(RouterQuote::from)
        .map_err(|e| QuoteError::Decode(e.to_string()))
}

/// [`RouterQuoter`] that reaches the router contract through a wallet provider.
pub struct ProviderRouter<P> {
    provider: P,
    router: Address,
}

impl<P: Eip1193> ProviderRouter<P> {
    pub fn new(provider: P, router: Address) -> Self {
        Self { provider, router }
    }

    pub fn router_address(&self) -> Address {
        self.router
    }
}

#[async_trait(?Send)]
impl<P: Eip1193> RouterQuoter for ProviderRouter<P> {
    async fn query_no_split(
        &self,
        amount_in: U256,
        token_in: Address,
        token_out: Address,
    ) -> Result<RouterQuote, QuoteError> {
        let calldata = encode_query_no_split(amount_in, token_in, token_out);
        let response = self
            .provider
            .eth_call(self.router, calldata)
            .await
            .map_err(|e| QuoteError::Call(e.to_string()))?;
        decode_query_no_split(&response)
    }
}
