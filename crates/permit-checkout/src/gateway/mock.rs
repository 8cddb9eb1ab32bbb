//! Mock Gateway
//!
//! Scripted payment gateway for tests and offline dry runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::PaymentGateway;
use crate::error::{CheckoutError, Result};
use crate::order::{OrderRequest, OrderToken, OrderTrackingId};

/// Scripted answer for one endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockReply {
    /// 2xx with the expected field set to this value
    Value(String),
    /// 2xx without the expected field
    Missing,
    /// Non-2xx, optionally with an `error` payload
    Rejected { status: u16, payload: Option<String> },
}

impl MockReply {
    pub fn value(v: impl Into<String>) -> Self {
        MockReply::Value(v.into())
    }

    fn resolve<T>(&self, parse: impl FnOnce(&str) -> Option<T>, missing: CheckoutError) -> Result<T> {
        match self {
            MockReply::Value(v) => parse(v).ok_or(missing),
            MockReply::Missing => Err(missing),
            MockReply::Rejected { status, payload } => Err(CheckoutError::Api {
                status: *status,
                payload: payload.clone(),
            }),
        }
    }
}

/// Mock gateway with scripted replies and call accounting
pub struct MockGateway {
    token: MockReply,
    order: MockReply,
    /// When set, order submission waits until the gate is opened
    order_gate: Option<CancellationToken>,
    token_calls: AtomicUsize,
    order_calls: AtomicUsize,
    orders: Mutex<Vec<OrderRequest>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Succeeds with token `mock-token` and tracking id `MOCK-TRACKING`
    pub fn new() -> Self {
        Self {
            token: MockReply::value("mock-token"),
            order: MockReply::value("MOCK-TRACKING"),
            order_gate: None,
            token_calls: AtomicUsize::new(0),
            order_calls: AtomicUsize::new(0),
            orders: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_token(mut self, reply: MockReply) -> Self {
        self.token = reply;
        self
    }

    #[must_use]
    pub fn with_order(mut self, reply: MockReply) -> Self {
        self.order = reply;
        self
    }

    /// Hold order submissions until `gate` is cancelled
    #[must_use]
    pub fn with_order_gate(mut self, gate: CancellationToken) -> Self {
        self.order_gate = Some(gate);
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    /// Orders received so far, in submission order
    pub fn orders(&self) -> Vec<OrderRequest> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentGateway for MockGateway {
    async fn fetch_token(&self) -> Result<OrderToken> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.token.resolve(|v| OrderToken::new(v), CheckoutError::Token)
    }

    async fn submit_order(&self, _token: &OrderToken, order: &OrderRequest) -> Result<OrderTrackingId> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order.clone());

        if let Some(gate) = &self.order_gate {
            gate.cancelled().await;
        }

        self.order.resolve(|v| OrderTrackingId::new(v), CheckoutError::Order)
    }

    fn name(&self) -> &str {
        "MockGateway"
    }
}
