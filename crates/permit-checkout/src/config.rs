//! Gateway Configuration

/// Default payment-orchestration service
pub const DEFAULT_API_URL: &str = "https://visa-api.netlify.app";

/// Default instant payment notification endpoint
pub const DEFAULT_IPN_URL: &str = "https://visa-api.netlify.app/api/ipn";

/// Hosted payment page the user is sent to after a successful order
pub const HOSTED_PAYMENT_PAGE: &str = "https://pay.pesapal.com/iframe/PesapalIframe3/Index";

/// Payment gateway configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Payment-orchestration service base URL, without trailing slash
    pub base_url: String,

    /// `callback_url` sent with every order
    pub ipn_url: String,

    /// Hosted payment page base URL
    pub redirect_base: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            ipn_url: DEFAULT_IPN_URL.into(),
            redirect_base: HOSTED_PAYMENT_PAGE.into(),
        }
    }
}

impl GatewayConfig {
    /// Build with a specific service base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            ..Default::default()
        }
    }

    /// Replace the service base URL
    #[must_use]
    pub fn with_base(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base(base_url.into());
        self
    }

    /// Read `PERMIT_API_URL` and `PERMIT_IPN_URL`.
    ///
    /// Runtime variables take precedence over values baked in at compile
    /// time; the WASM build only ever sees the latter.
    pub fn from_env() -> Self {
        let base_url = lookup("PERMIT_API_URL", option_env!("PERMIT_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let ipn_url = lookup("PERMIT_IPN_URL", option_env!("PERMIT_IPN_URL"))
            .unwrap_or_else(|| DEFAULT_IPN_URL.into());

        Self {
            base_url: normalize_base(base_url),
            ipn_url,
            ..Default::default()
        }
    }

    /// `GET` endpoint issuing order tokens
    pub fn token_url(&self) -> String {
        format!("{}/api/get-token", self.base_url)
    }

    /// `POST` endpoint accepting orders
    pub fn order_url(&self) -> String {
        format!("{}/api/submit-order", self.base_url)
    }

    /// Hosted payment page for a tracking identifier.
    ///
    /// The identifier is inserted verbatim.
    pub fn redirect_url(&self, order_tracking_id: &str) -> String {
        format!("{}?OrderTrackingId={}", self.redirect_base, order_tracking_id)
    }
}

fn lookup(key: &str, baked: Option<&'static str>) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| baked.map(str::to_string))
        .filter(|v| !v.trim().is_empty())
}

fn normalize_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
