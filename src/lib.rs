//! # stakewatch
//!
//! Reports the liquid and staked SOL balance of a wallet address by querying
//! a single Solana JSON-RPC endpoint.
//!
//! This crate re-exports the workspace libraries under one name.

pub use stakewatch_core;
pub use stakewatch_solana;

pub use stakewatch_core::{BalanceSnapshot, Config, Endpoint};
pub use stakewatch_solana::{AccountInfoResolver, CallScope, RpcTransport};

/// Returns the library version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
