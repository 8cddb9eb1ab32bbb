//! HTTP Gateway
//!
//! `reqwest` client for the payment-orchestration service. Timeouts are left
//! to the client defaults.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use super::PaymentGateway;
use crate::config::GatewayConfig;
use crate::error::{CheckoutError, Result};
use crate::order::{OrderRequest, OrderToken, OrderTrackingId, SubmitOrderBody};

/// Payment gateway speaking JSON over HTTP
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing client
    pub fn with_client(client: Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(GatewayConfig::from_env())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentGateway for HttpGateway {
    async fn fetch_token(&self) -> Result<OrderToken> {
        debug!(url = %self.config.token_url(), "Requesting token");
        let response = self.client.get(self.config.token_url()).send().await?;
        let data = read_json(response).await?;

        data.get("token")
            .and_then(Value::as_str)
            .and_then(OrderToken::new)
            .ok_or(CheckoutError::Token)
    }

    async fn submit_order(&self, token: &OrderToken, order: &OrderRequest) -> Result<OrderTrackingId> {
        let body = SubmitOrderBody { token, order_data: order };
        let response = self
            .client
            .post(self.config.order_url())
            .json(&body)
            .send()
            .await?;
        let data = read_json(response).await?;
        debug!(response = %data, "Order response");

        data.get("order_tracking_id")
            .and_then(Value::as_str)
            .and_then(OrderTrackingId::new)
            .ok_or(CheckoutError::Order)
    }

    fn name(&self) -> &str {
        "HttpGateway"
    }
}

/// Decode a JSON body, turning non-2xx responses into [`CheckoutError::Api`].
///
/// A 2xx body that is not JSON decodes to `Value::Null`, so the caller sees a
/// missing field rather than a transport error.
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        let text = response.text().await?;
        return Ok(serde_json::from_str::<Value>(&text).unwrap_or_default());
    }

    let payload = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|data| data.get("error").and_then(Value::as_str).map(str::to_string));

    Err(CheckoutError::Api {
        status: status.as_u16(),
        payload,
    })
}
