//! `stakewatch` balance lookup.
//!
//! Resolves config, obtains an address, runs both RPC calls under one
//! deadline and prints the report. Ctrl+C cancels the lookup.

use std::io::{BufReader, Write};
use std::path::PathBuf;

use stakewatch_core::{validate_address, Config, Endpoint};
use stakewatch_solana::{AccountInfoResolver, CallScope, RpcTransport};

use crate::commands::util::prompt_address_blocking;
use crate::report::BalanceReport;

/// Options collected from the command line.
#[derive(Debug, Default)]
pub struct BalanceArgs {
    pub address: Option<String>,
    pub rpc_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// Merges CLI overrides on top of the loaded config and validates it.
pub fn effective_config(args: &BalanceArgs) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = &args.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

/// Run the balance lookup.
pub async fn run(args: BalanceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = effective_config(&args)?;

    let address = match &args.address {
        Some(address) => validate_address(address.trim())?.to_string(),
        None => {
            prompt_address_blocking(BufReader::new(std::io::stdin()), std::io::stdout()).await?
        }
    };

    tracing::info!("querying {} for {address}", config.rpc_url);
    let transport = RpcTransport::new(Endpoint::new(config.rpc_url.clone()))?;
    let resolver = AccountInfoResolver::new(transport);

    let (scope, canceller) = CallScope::with_timeout(config.timeout());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let snapshot = resolver.resolve(&address, &scope).await?;

    let report = BalanceReport::new(&address, &snapshot);
    let rendered = if args.json {
        let mut json = report.to_json()?;
        json.push('\n');
        json
    } else {
        report.to_table()
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
