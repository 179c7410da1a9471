//! Balance resolution for a wallet address.
//!
//! Issues `getAccountInfo` then `getProgramAccounts` (stake program, filtered
//! on the authority field) under one [`CallScope`], and converts both amounts
//! to SOL. Either call failing fails the whole lookup.

use serde::{Deserialize, Serialize};
use stakewatch_core::{lamports_to_sol, BalanceSnapshot, LAMPORTS_PER_SOL};
use tracing::{debug, info};

use crate::error::{ResolveError, SolanaRpcError};
use crate::scope::CallScope;
use crate::stake::sum_delegated_stake;
use crate::transport::{RpcSend, RpcTransport};

/// Native stake program id.
pub const STAKE_PROGRAM_ID: &str = "Stake11111111111111111111111111111111111111";

/// Byte offset of the staker authority in stake account data.
pub const STAKE_AUTHORITY_OFFSET: usize = 12;

pub const GET_ACCOUNT_INFO: &str = "getAccountInfo";
pub const GET_PROGRAM_ACCOUNTS: &str = "getProgramAccounts";

const JSON_PARSED: &str = "jsonParsed";

#[derive(Debug, Serialize)]
struct AccountInfoConfig {
    encoding: &'static str,
}

#[derive(Debug, Serialize)]
struct ProgramAccountsConfig<'a> {
    encoding: &'static str,
    filters: [Filter<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Filter<'a> {
    memcmp: Memcmp<'a>,
}

#[derive(Debug, Serialize)]
struct Memcmp<'a> {
    offset: usize,
    bytes: &'a str,
}

#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    /// `null` when the address has no system account.
    value: Option<AccountValue>,
}

#[derive(Debug, Deserialize)]
struct AccountValue {
    lamports: f64,
}

/// Resolves liquid and staked balances through an [`RpcSend`] transport.
#[derive(Debug, Clone)]
pub struct AccountInfoResolver<T = RpcTransport> {
    transport: T,
}

impl<T: RpcSend> AccountInfoResolver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up the balances of `address`.
    ///
    /// The two calls run in order and share `scope`'s absolute deadline.
    /// No partial result is returned.
    pub async fn resolve(
        &self,
        address: &str,
        scope: &CallScope,
    ) -> Result<BalanceSnapshot, ResolveError> {
        let lamports = self
            .fetch_lamports(address, scope)
            .await
            .map_err(|e| ResolveError::new(GET_ACCOUNT_INFO, e))?;

        let stake = self
            .fetch_delegated_stake(address, scope)
            .await
            .map_err(|e| ResolveError::new(GET_PROGRAM_ACCOUNTS, e))?;

        let snapshot = BalanceSnapshot {
            liquid: lamports / LAMPORTS_PER_SOL as f64,
            staked: lamports_to_sol(stake),
        };
        info!(
            %address,
            liquid = snapshot.liquid,
            staked = snapshot.staked,
            "resolved balances"
        );
        Ok(snapshot)
    }

    async fn fetch_lamports(
        &self,
        address: &str,
        scope: &CallScope,
    ) -> Result<f64, SolanaRpcError> {
        let params = (
            address,
            AccountInfoConfig {
                encoding: JSON_PARSED,
            },
        );
        let raw = self.transport.send(GET_ACCOUNT_INFO, &params, scope).await?;
        let result: AccountInfoResult = raw.decode()?;
        // An unfunded address still may have authority over stake accounts.
        let lamports = result.value.map_or(0.0, |value| value.lamports);
        debug!(%address, lamports, "fetched account info");
        Ok(lamports)
    }

    async fn fetch_delegated_stake(
        &self,
        address: &str,
        scope: &CallScope,
    ) -> Result<u64, SolanaRpcError> {
        let params = (
            STAKE_PROGRAM_ID,
            ProgramAccountsConfig {
                encoding: JSON_PARSED,
                filters: [Filter {
                    memcmp: Memcmp {
                        offset: STAKE_AUTHORITY_OFFSET,
                        bytes: address,
                    },
                }],
            },
        );
        let raw = self
            .transport
            .send(GET_PROGRAM_ACCOUNTS, &params, scope)
            .await?;
        let total = sum_delegated_stake(&raw)?;
        debug!(%address, lamports = total, "summed delegated stake");
        Ok(total)
    }
}
