//! Vendo CLI
//!
//! Command-line interface for the Vendo compute marketplace. Runs the
//! dispatch engine in-process, either as a scripted demo or as an
//! interactive shell.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vendo_engine::SelectionPolicy;

#[derive(Parser)]
#[command(name = "vendo")]
#[command(about = "Vendo compute marketplace CLI", long_about = None)]
struct Cli {
    /// Public key used when submitting jobs and posting user reviews
    #[arg(long, env = "VENDO_USER_KEY", default_value = "user_public_key")]
    user_key: String,

    /// Public key used when registering providers and posting responses
    #[arg(long, env = "VENDO_PROVIDER_KEY", default_value = "provider_public_key")]
    provider_key: String,

    /// Override the number of parallel dispatch workers
    #[arg(long)]
    workers: Option<usize>,

    /// Override the provider selection policy (round_robin | least_loaded)
    #[arg(long)]
    policy: Option<SelectionPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendo_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        user_key: cli.user_key,
        provider_key: cli.provider_key,
        workers: cli.workers,
        policy: cli.policy,
    };

    handle_command(cli.command, &config).await
}
