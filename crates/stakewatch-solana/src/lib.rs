//! # stakewatch-solana
//!
//! Solana JSON-RPC plumbing for balance lookups.
//!
//! ## Modules
//!
//! - [`transport`] — single-shot JSON-RPC over HTTP bounded by a [`CallScope`]
//! - [`stake`] — sums delegated stake from `getProgramAccounts` results
//! - [`resolver`] — combines both calls into a [`BalanceSnapshot`]
//! - [`scope`] — deadline and cancellation shared by one lookup
//!
//! [`BalanceSnapshot`]: stakewatch_core::BalanceSnapshot

pub mod error;
pub mod resolver;
pub mod scope;
pub mod stake;
pub mod transport;

// Re-export key types for convenience.
pub use error::{ResolveError, SolanaRpcError};
pub use resolver::AccountInfoResolver;
pub use scope::{CallScope, Canceller};
pub use stake::sum_delegated_stake;
pub use transport::{RawResult, RpcSend, RpcTransport};
