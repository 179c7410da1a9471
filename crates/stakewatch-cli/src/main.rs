//! # stakewatch CLI
//!
//! Entry point for the `stakewatch` binary.
//!
//! Prompts for (or takes) a Solana wallet address, looks up its liquid and
//! staked balances and prints them as a table or JSON.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod report;

/// stakewatch — report liquid and staked SOL for a wallet address.
#[derive(Parser)]
#[command(name = "stakewatch", version, about)]
struct Cli {
    /// Wallet address (43 or 44 characters). Prompted for when omitted.
    #[arg(long, short)]
    address: Option<String>,

    /// JSON-RPC endpoint URL (default: Solana mainnet-beta).
    #[arg(long, env = "STAKEWATCH_RPC_URL")]
    rpc_url: Option<String>,

    /// Deadline in seconds for the whole lookup (default: 10).
    #[arg(long)]
    timeout: Option<u64>,

    /// Path to config.yaml (default: ~/.stakewatch/config.yaml if present).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries only the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = commands::balance::run(commands::balance::BalanceArgs {
        address: cli.address,
        rpc_url: cli.rpc_url,
        timeout_secs: cli.timeout,
        config: cli.config,
        json: cli.json,
    })
    .await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
