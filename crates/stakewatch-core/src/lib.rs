//! # stakewatch-core
//!
//! Core types shared across stakewatch crates: configuration, the shared
//! RPC endpoint handle, address validation and lamport/SOL conversion.

pub mod address;
pub mod config;
pub mod endpoint;
pub mod units;

pub use address::{validate_address, AddressError};
pub use config::{Config, ConfigError};
pub use endpoint::{Endpoint, DEFAULT_RPC_URL};
pub use units::{lamports_to_sol, BalanceSnapshot, LAMPORTS_PER_SOL};
