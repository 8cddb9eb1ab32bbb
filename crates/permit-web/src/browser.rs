//! Browser Integration

use permit_checkout::{CheckoutError, CheckoutFlow, HttpGateway, Navigator, Result};

/// Navigates by replacing the current document
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| CheckoutError::Navigation("no window available".into()))?;
        window
            .location()
            .set_href(url)
            .map_err(|e| CheckoutError::Navigation(format!("{e:?}")))
    }
}

/// Checkout flow against the configured payment service
pub fn checkout_flow() -> CheckoutFlow<HttpGateway> {
    let gateway = HttpGateway::from_env();
    let config = gateway.config().clone();
    tracing::debug!(api_url = %config.base_url, "Payment service");
    CheckoutFlow::new(gateway, config)
}
