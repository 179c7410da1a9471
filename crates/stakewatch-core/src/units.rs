//! Lamport/SOL conversion and the balance snapshot produced by a lookup.

use serde::{Deserialize, Serialize};

/// Number of lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Converts lamports to SOL as a display value.
///
/// Precision is lost above 2^53 lamports.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Liquid and staked balances of one address, in SOL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Spendable balance held directly by the account.
    pub liquid: f64,
    /// Sum of active delegations from stake accounts tied to the address.
    pub staked: f64,
}

impl BalanceSnapshot {
    /// Liquid plus staked.
    pub fn total(&self) -> f64 {
        self.liquid + self.staked
    }
}
