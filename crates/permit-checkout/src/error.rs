//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Message shown when nothing more specific is available
pub const FALLBACK_MESSAGE: &str = "Payment failed";

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Token endpoint answered without a usable token
    #[error("Failed to get token")]
    Token,

    /// Order endpoint answered without a tracking identifier
    #[error("No order tracking ID received")]
    Order,

    /// Transport-level failure (DNS, TLS, timeout, undecodable body, ...)
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The service returned a non-2xx status code
    #[error("Request failed with status code {status}")]
    Api {
        status: u16,
        /// `error` field of the response body, if the service sent one
        payload: Option<String>,
    },

    /// A submission is already in flight
    #[error("A payment is already being processed")]
    AlreadyInFlight,

    /// The owning surface went away mid-flight
    #[error("Checkout cancelled")]
    Cancelled,

    /// The hosted payment page could not be opened
    #[error("Navigation failed: {0}")]
    Navigation(String),
}

impl CheckoutError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Network(_) => true,
            CheckoutError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Message surfaced to the user.
    ///
    /// Server-provided error text wins, then the error's own message, then
    /// [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        let payload = match self {
            CheckoutError::Api { payload, .. } => payload.as_deref(),
            _ => None,
        };
        pick_message(payload, &self.to_string())
    }
}

fn pick_message(payload: Option<&str>, own: &str) -> String {
    payload
        .filter(|p| !p.trim().is_empty())
        .or_else(|| Some(own).filter(|m| !m.trim().is_empty()))
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}
