//! Checkout Orchestration
//!
//! Token acquisition, order submission, then redirect to the hosted payment
//! page. Each step runs only after the previous one succeeded.
//!
//! ```text
//!   Idle ──submit──▶ Loading ──failure──▶ Error(msg) ──submit──▶ Loading
//!                       │
//!                       └──success──▶ navigate away (not observed)
//! ```

use std::future::Future;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::{Either, select};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::currency::CurrencyCode;
use crate::error::{CheckoutError, Result};
use crate::gateway::PaymentGateway;
use crate::navigator::Navigator;
use crate::order::OrderRequest;
use crate::state::SubmissionState;

/// How a call to [`CheckoutFlow::submit_payment`] ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The navigator was sent to this URL
    Redirected(String),
    /// State moved to `Error` with this message
    Failed(String),
    /// Another submission was already in flight; nothing happened
    Rejected,
    /// The flow was cancelled; no state change, no navigation
    Cancelled,
}

/// One-at-a-time checkout driver tied to the lifetime of its owner
pub struct CheckoutFlow<G> {
    gateway: G,
    config: GatewayConfig,
    in_flight: AtomicBool,
    cancel: CancellationToken,
}

impl<G: PaymentGateway> CheckoutFlow<G> {
    pub fn new(gateway: G, config: GatewayConfig) -> Self {
        Self {
            gateway,
            config,
            in_flight: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Token to cancel from elsewhere, e.g. an unmount hook
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop acting on any in-flight or future submission
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run a full checkout attempt for `currency`.
    ///
    /// `on_state` sees `Loading` first and, on failure, `Error(msg)`. A
    /// successful attempt ends at `navigator` and leaves the state at
    /// `Loading`.
    pub async fn submit_payment<N>(
        &self,
        currency: &CurrencyCode,
        navigator: &N,
        mut on_state: impl FnMut(SubmissionState),
    ) -> SubmitOutcome
    where
        N: Navigator + ?Sized,
    {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Payment already in flight, ignoring submit");
            return SubmitOutcome::Rejected;
        };
        if self.cancel.is_cancelled() {
            return SubmitOutcome::Cancelled;
        }

        on_state(SubmissionState::Loading);
        info!(currency = %currency, gateway = self.gateway.name(), "Submitting payment");

        let result = match self.checkout(currency).await {
            Ok(url) if self.cancel.is_cancelled() => {
                debug!(url = %url, "Cancelled before redirect");
                return SubmitOutcome::Cancelled;
            }
            Ok(url) => {
                info!(url = %url, "Redirecting to hosted payment page");
                navigator.navigate(&url).map(|()| url)
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(url) => SubmitOutcome::Redirected(url),
            Err(CheckoutError::Cancelled) => {
                debug!("Checkout cancelled mid-flight");
                SubmitOutcome::Cancelled
            }
            Err(e) => {
                let message = e.user_message();
                warn!(error = %e, retryable = e.is_retryable(), "Payment error");
                on_state(SubmissionState::Error(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Token, then order; returns the hosted payment page URL
    pub async fn checkout(&self, currency: &CurrencyCode) -> Result<String> {
        debug!("Getting token");
        let token = self.until_cancelled(self.gateway.fetch_token()).await?;
        debug!(?token, "Token received");

        let order = OrderRequest::application_fee(currency, &self.config);
        debug!(?order, "Submitting order");
        let tracking_id = self
            .until_cancelled(self.gateway.submit_order(&token, &order))
            .await?;
        debug!(order_tracking_id = tracking_id.as_str(), "Order submitted");

        Ok(self.config.redirect_url(tracking_id.as_str()))
    }

    async fn until_cancelled<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let cancelled = pin!(self.cancel.cancelled());
        match select(pin!(fut), cancelled).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(CheckoutError::Cancelled),
        }
    }
}

/// Holds the in-flight latch until dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::currency::BASE_FEE;
    use crate::gateway::{HttpGateway, MockGateway, MockReply};
    use crate::navigator::RecordingNavigator;
    use crate::state::ModalState;

    const PAGE: &str = "https://pay.pesapal.com/iframe/PesapalIframe3/Index?OrderTrackingId=";

    fn flow(gateway: MockGateway) -> CheckoutFlow<MockGateway> {
        CheckoutFlow::new(gateway, GatewayConfig::default())
    }

    async fn run(
        flow: &CheckoutFlow<MockGateway>,
        currency: &str,
        navigator: &RecordingNavigator,
    ) -> (SubmitOutcome, Vec<SubmissionState>) {
        let mut states = Vec::new();
        let outcome = flow
            .submit_payment(&CurrencyCode::new(currency), navigator, |s| states.push(s))
            .await;
        (outcome, states)
    }

    async fn wait_for_order_call(flow: &CheckoutFlow<MockGateway>) {
        for _ in 0..200 {
            if flow.gateway().order_calls() > 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("order submission never started");
    }

    #[tokio::test]
    async fn test_successful_checkout_redirects() {
        let flow = flow(MockGateway::new()
            .with_token(MockReply::value("abc"))
            .with_order(MockReply::value("T123")));
        let navigator = RecordingNavigator::new();

        let (outcome, states) = run(&flow, "USD", &navigator).await;

        let expected = format!("{PAGE}T123");
        assert_eq!(outcome, SubmitOutcome::Redirected(expected.clone()));
        assert_eq!(navigator.visited(), vec![expected]);
        assert_eq!(states, vec![SubmissionState::Loading]);
        assert!(!flow.is_in_flight());
    }

    #[tokio::test]
    async fn test_missing_token_skips_order() {
        let flow = flow(MockGateway::new().with_token(MockReply::Missing));
        let navigator = RecordingNavigator::new();

        let (outcome, states) = run(&flow, "USD", &navigator).await;

        assert_eq!(outcome, SubmitOutcome::Failed("Failed to get token".into()));
        assert_eq!(
            states,
            vec![SubmissionState::Loading, SubmissionState::Error("Failed to get token".into())]
        );
        assert_eq!(flow.gateway().order_calls(), 0);
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_missing_tracking_id() {
        let flow = flow(MockGateway::new().with_order(MockReply::Missing));
        let navigator = RecordingNavigator::new();

        let (outcome, states) = run(&flow, "USD", &navigator).await;

        assert_eq!(outcome, SubmitOutcome::Failed("No order tracking ID received".into()));
        assert_eq!(states.last(), Some(&SubmissionState::Error("No order tracking ID received".into())));
        assert_eq!(flow.gateway().token_calls(), 1);
        assert_eq!(flow.gateway().order_calls(), 1);
        assert!(navigator.last().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint() {
        let config = GatewayConfig::with_base_url("http://127.0.0.1:1");
        let flow = CheckoutFlow::new(HttpGateway::new(config.clone()), config);
        let navigator = RecordingNavigator::new();

        let mut states = Vec::new();
        let outcome = flow
            .submit_payment(&CurrencyCode::default(), &navigator, |s| states.push(s))
            .await;

        let message = match outcome {
            SubmitOutcome::Failed(message) => message,
            other => panic!("expected failure, got {other:?}"),
        };
        assert!(!message.is_empty());
        assert_eq!(states, vec![SubmissionState::Loading, SubmissionState::Error(message)]);
        assert!(navigator.visited().is_empty());
        assert!(!flow.is_in_flight());
    }

    #[tokio::test]
    async fn test_modal_disabled_while_in_flight() {
        let gate = CancellationToken::new();
        let flow = Arc::new(flow(MockGateway::new()
            .with_order(MockReply::Missing)
            .with_order_gate(gate.clone())));
        let modal = Arc::new(Mutex::new(ModalState::default()));
        assert!(modal.lock().unwrap().can_submit());

        let pending = tokio::spawn({
            let flow = flow.clone();
            let modal = modal.clone();
            async move {
                let navigator = RecordingNavigator::new();
                let currency = modal.lock().unwrap().currency.clone();
                flow.submit_payment(&currency, &navigator, move |s| modal.lock().unwrap().apply(s))
                    .await
            }
        });
        wait_for_order_call(&flow).await;
        assert!(!modal.lock().unwrap().can_submit());

        gate.cancel();
        assert!(matches!(pending.await.unwrap(), SubmitOutcome::Failed(_)));

        let modal = modal.lock().unwrap();
        assert!(modal.can_submit());
        assert_eq!(modal.submission.error(), Some("No order tracking ID received"));
    }

    #[tokio::test]
    async fn test_server_error_payload_surfaces() {
        let flow = flow(MockGateway::new().with_order(MockReply::Rejected {
            status: 422,
            payload: Some("Currency not enabled".into()),
        }));
        let navigator = RecordingNavigator::new();

        let (outcome, _) = run(&flow, "EGP", &navigator).await;
        assert_eq!(outcome, SubmitOutcome::Failed("Currency not enabled".into()));
    }

    #[tokio::test]
    async fn test_currency_labels_but_never_changes_amount() {
        let flow = flow(MockGateway::new());
        let navigator = RecordingNavigator::new();

        run(&flow, "KES", &navigator).await;
        run(&flow, "JPY", &navigator).await;

        let orders = flow.gateway().orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].currency.as_str(), "KES");
        assert_eq!(orders[1].currency.as_str(), "JPY");
        assert!(orders.iter().all(|o| o.amount == BASE_FEE));
    }

    #[tokio::test]
    async fn test_retry_after_error() {
        let flow = flow(MockGateway::new().with_token(MockReply::Missing));
        let navigator = RecordingNavigator::new();

        run(&flow, "USD", &navigator).await;
        let (outcome, states) = run(&flow, "USD", &navigator).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(states[0], SubmissionState::Loading);
        assert_eq!(flow.gateway().token_calls(), 2);
    }

    #[tokio::test]
    async fn test_double_submit_rejected() {
        let gate = CancellationToken::new();
        let flow = Arc::new(flow(MockGateway::new().with_order_gate(gate.clone())));
        let navigator = Arc::new(RecordingNavigator::new());

        let first = tokio::spawn({
            let flow = flow.clone();
            let navigator = navigator.clone();
            async move {
                flow.submit_payment(&CurrencyCode::default(), navigator.as_ref(), |_| {})
                    .await
            }
        });
        wait_for_order_call(&flow).await;
        assert!(flow.is_in_flight());

        let (second, states) = run(&flow, "USD", &navigator).await;
        assert_eq!(second, SubmitOutcome::Rejected);
        assert!(states.is_empty());
        assert_eq!(flow.gateway().token_calls(), 1);

        gate.cancel();
        let first = first.await.unwrap();
        assert_eq!(first, SubmitOutcome::Redirected(format!("{PAGE}MOCK-TRACKING")));
        assert!(!flow.is_in_flight());
    }

    #[tokio::test]
    async fn test_cancel_mid_flight_is_silent() {
        let gate = CancellationToken::new();
        let flow = Arc::new(flow(MockGateway::new().with_order_gate(gate)));
        let navigator = Arc::new(RecordingNavigator::new());
        let states = Arc::new(Mutex::new(Vec::new()));

        let pending = tokio::spawn({
            let flow = flow.clone();
            let navigator = navigator.clone();
            let states = states.clone();
            async move {
                flow.submit_payment(&CurrencyCode::default(), navigator.as_ref(), move |s| {
                    states.lock().unwrap().push(s);
                })
                .await
            }
        });
        wait_for_order_call(&flow).await;

        flow.cancel();
        assert_eq!(pending.await.unwrap(), SubmitOutcome::Cancelled);
        assert_eq!(*states.lock().unwrap(), vec![SubmissionState::Loading]);
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_flow_does_nothing() {
        let flow = flow(MockGateway::new());
        flow.cancellation_token().cancel();
        let navigator = RecordingNavigator::new();

        let (outcome, states) = run(&flow, "USD", &navigator).await;

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert!(states.is_empty());
        assert_eq!(flow.gateway().token_calls(), 0);
    }
}
