//! permit-checkout CLI
//!
//! Drives the checkout flow from a terminal. Navigation prints the hosted
//! payment page URL instead of opening it.

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use permit_checkout::{
    BASE_FEE, CURRENCIES, CheckoutFlow, CurrencyCode, EXCHANGE_RATE_URL, GatewayConfig,
    HttpGateway, MockGateway, Navigator, PaymentGateway, SubmissionState, SubmitOutcome,
    fetch_exchange_rates, format_fee,
};

use crate::cli::{Cli, Command};

/// Prints the redirect target to stdout
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, url: &str) -> permit_checkout::Result<()> {
        println!("{url}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before reading RUST_LOG and clap env defaults
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Pay { currency, api_url, dry_run } => {
            let config = GatewayConfig::from_env().with_base(api_url);
            if dry_run {
                tracing::info!("Dry run: using in-memory gateway");
                pay(CheckoutFlow::new(MockGateway::new(), config), &currency).await
            } else {
                pay(CheckoutFlow::new(HttpGateway::new(config.clone()), config), &currency).await
            }
        }
        Command::Currencies => {
            for option in CURRENCIES {
                let fee = format_fee(BASE_FEE, &CurrencyCode::new(option.code));
                println!("{:<28} {fee}", option.label());
            }
            Ok(())
        }
        Command::Rates => {
            let rates = fetch_exchange_rates(&reqwest::Client::new(), EXCHANGE_RATE_URL)
                .await
                .context("fetching exchange rates")?;
            let mut codes: Vec<_> = rates.rates.iter().collect();
            codes.sort_by(|a, b| a.0.cmp(b.0));
            for (code, rate) in codes {
                println!("{code} {rate}");
            }
            Ok(())
        }
    }
}

async fn pay<G: PaymentGateway>(flow: CheckoutFlow<G>, currency: &CurrencyCode) -> anyhow::Result<()> {
    let outcome = flow
        .submit_payment(currency, &StdoutNavigator, |state| match state {
            SubmissionState::Loading => tracing::info!("Processing payment..."),
            SubmissionState::Error(msg) => tracing::error!("{msg}"),
            SubmissionState::Idle => {}
        })
        .await;

    match outcome {
        SubmitOutcome::Redirected(_) => Ok(()),
        SubmitOutcome::Failed(msg) => bail!(msg),
        SubmitOutcome::Rejected => bail!("a payment is already in flight"),
        SubmitOutcome::Cancelled => bail!("checkout cancelled"),
    }
}
