//! Command-Line Arguments

use clap::{Parser, Subcommand};
use permit_checkout::{CurrencyCode, DEFAULT_API_URL};

#[derive(Debug, Parser)]
#[command(name = "permit-checkout", version, about = "Work-permit application fee checkout")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run token, order and redirect; print the hosted payment page URL
    Pay {
        /// ISO 4217 code labelling the order
        #[arg(short, long, default_value = "USD")]
        currency: CurrencyCode,

        /// Payment-orchestration service
        #[arg(long, env = "PERMIT_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Use a scripted in-memory gateway instead of the network
        #[arg(long)]
        dry_run: bool,
    },

    /// List selectable currencies and the fee shown for each
    Currencies,

    /// Fetch the USD exchange-rate table
    Rates,
}
