//! Payment Gateway
//!
//! Abstraction over the payment-orchestration service. The checkout flow only
//! ever talks to a [`PaymentGateway`], so the HTTP client can be swapped for
//! the scripted [`MockGateway`] in tests and dry runs.

mod http;
mod mock;

pub use http::HttpGateway;
pub use mock::{MockGateway, MockReply};

use async_trait::async_trait;

use crate::error::Result;
use crate::order::{OrderRequest, OrderToken, OrderTrackingId};

/// Payment-orchestration service client (Strategy pattern)
///
/// Futures are `Send` everywhere except in the browser, where the HTTP
/// client is single-threaded.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PaymentGateway {
    /// Obtain a token for a single checkout attempt.
    ///
    /// Fails with [`CheckoutError::Token`](crate::CheckoutError::Token) when
    /// the service answers without a usable token.
    async fn fetch_token(&self) -> Result<OrderToken>;

    /// Submit an order and return its tracking identifier.
    ///
    /// Fails with [`CheckoutError::Order`](crate::CheckoutError::Order) when
    /// the service answers without one.
    async fn submit_order(&self, token: &OrderToken, order: &OrderRequest) -> Result<OrderTrackingId>;

    /// Gateway name, for logs
    fn name(&self) -> &str;
}
