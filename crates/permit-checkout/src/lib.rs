//! # permit-checkout
//!
//! Checkout orchestration for the work-permit application fee.
//!
//! ## Flow
//!
//! ```text
//! CheckoutFlow ── GET  /api/get-token ────▶ payment service ── token
//!              ── POST /api/submit-order ─▶ payment service ── order_tracking_id
//!              ── navigate ──▶ hosted payment page ?OrderTrackingId=...
//! ```
//!
//! The selected currency labels the order; the amount is always
//! [`BASE_FEE`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use permit_checkout::{CheckoutFlow, CurrencyCode, GatewayConfig, HttpGateway};
//!
//! let config = GatewayConfig::from_env();
//! let flow = CheckoutFlow::new(HttpGateway::new(config.clone()), config);
//!
//! let outcome = flow
//!     .submit_payment(&CurrencyCode::new("KES"), &navigator, |state| render(state))
//!     .await;
//! ```

mod checkout;
mod config;
mod currency;
mod error;
mod gateway;
mod navigator;
mod order;
mod rates;
mod state;

pub use checkout::{CheckoutFlow, SubmitOutcome};
pub use config::{DEFAULT_API_URL, DEFAULT_IPN_URL, GatewayConfig, HOSTED_PAYMENT_PAGE};
pub use currency::{
    BASE_FEE, CURRENCIES, CurrencyCode, CurrencyOption, convert_amount, find_currency, format_fee,
};
pub use error::{CheckoutError, FALLBACK_MESSAGE, Result};
pub use gateway::{HttpGateway, MockGateway, MockReply, PaymentGateway};
pub use navigator::{Navigator, RecordingNavigator};
pub use order::{BillingAddress, OrderRequest, OrderToken, OrderTrackingId, generate_order_id};
pub use rates::{EXCHANGE_RATE_URL, ExchangeRates, fetch_exchange_rates, prefetch_exchange_rates};
pub use state::{ModalState, SubmissionState};
