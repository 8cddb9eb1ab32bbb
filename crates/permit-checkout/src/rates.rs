//! Exchange Rates
//!
//! USD rate table from a public API. Nothing in the fee path reads it: the
//! modal fetches it once on mount and only logs the outcome.

use std::collections::HashMap;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CheckoutError, Result};

/// Latest USD-based rates
pub const EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Rate table keyed by ISO code
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub base: String,
    #[serde(default)]
    pub date: Option<String>,
    pub rates: HashMap<String, Decimal>,
}

impl ExchangeRates {
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(&code.to_ascii_uppercase()).copied()
    }
}

/// Fetch a rate table from `url`
pub async fn fetch_exchange_rates(client: &Client, url: &str) -> Result<ExchangeRates> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CheckoutError::Api {
            status: status.as_u16(),
            payload: None,
        });
    }
    Ok(response.json().await?)
}

/// Fetch [`EXCHANGE_RATE_URL`] and discard the result
pub async fn prefetch_exchange_rates(client: &Client) {
    match fetch_exchange_rates(client, EXCHANGE_RATE_URL).await {
        Ok(rates) => debug!(base = %rates.base, currencies = rates.rates.len(), "Exchange rates fetched"),
        Err(e) => warn!(error = %e, "Error fetching exchange rates"),
    }
}
