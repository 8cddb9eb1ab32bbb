//! Order Data Model

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::currency::{BASE_FEE, CurrencyCode};

/// Prefix of generated order identifiers
pub const ORDER_ID_PREFIX: &str = "visa_expert_";

/// Description sent with every order
pub const ORDER_DESCRIPTION: &str = "Work Permit Application Fee";

/// Merchant branch name
pub const ORDER_BRANCH: &str = "Visa Expert";

/// Opaque credential authorising one order submission
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderToken(String);

impl OrderToken {
    /// `None` for an empty token
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for OrderToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderToken({} chars)", self.0.len())
    }
}

/// Identifier addressing the hosted payment page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderTrackingId(String);

impl OrderTrackingId {
    /// `None` for an empty identifier
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Billing details attached to an order.
///
/// Every field is a string; empty strings are sent as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub email_address: String,
    pub phone_number: String,
    pub country_code: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub line_1: String,
    pub line_2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub zip_code: String,
}

impl BillingAddress {
    /// Fixed customer details used for every application
    pub fn placeholder() -> Self {
        Self {
            email_address: "customer@example.com".into(),
            phone_number: "0700000000".into(),
            country_code: "KE".into(),
            first_name: "Customer".into(),
            middle_name: String::new(),
            last_name: "Name".into(),
            line_1: "Nairobi".into(),
            line_2: String::new(),
            city: "Nairobi".into(),
            state: String::new(),
            postal_code: String::new(),
            zip_code: String::new(),
        }
    }
}

/// Order submitted to the payment-orchestration service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: String,
    pub currency: CurrencyCode,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub callback_url: String,
    pub notification_id: String,
    pub branch: String,
    pub billing_address: BillingAddress,
}

impl OrderRequest {
    /// Fresh application-fee order in the given currency.
    ///
    /// The amount is always [`BASE_FEE`]; `currency` only labels it.
    pub fn application_fee(currency: &CurrencyCode, config: &GatewayConfig) -> Self {
        Self {
            id: generate_order_id(),
            currency: currency.clone(),
            amount: BASE_FEE,
            description: ORDER_DESCRIPTION.into(),
            callback_url: config.ipn_url.clone(),
            notification_id: String::new(),
            branch: ORDER_BRANCH.into(),
            billing_address: BillingAddress::placeholder(),
        }
    }
}

/// Order identifier from the current time in milliseconds.
///
/// Two submissions in the same millisecond collide.
pub fn generate_order_id() -> String {
    format!("{ORDER_ID_PREFIX}{}", Utc::now().timestamp_millis())
}

/// Body of `POST /api/submit-order`
#[derive(Debug, Serialize)]
pub struct SubmitOrderBody<'a> {
    pub token: &'a OrderToken,
    #[serde(rename = "orderData")]
    pub order_data: &'a OrderRequest,
}
