//! Delegated stake aggregation over `getProgramAccounts` results.
//!
//! Only accounts whose parsed type is `"delegated"` count. Their
//! `info.stake.delegation.stake` string must parse as a `u64`; a single bad
//! amount fails the whole sum.

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::trace;

use crate::error::SolanaRpcError;
use crate::transport::{RawResult, Result};

/// Parsed stake account type that carries an active delegation.
pub const DELEGATED: &str = "delegated";

#[derive(Debug, Deserialize)]
struct KeyedAccount {
    account: Account,
}

#[derive(Debug, Deserialize)]
struct Account {
    data: AccountData,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    parsed: ParsedAccount,
}

#[derive(Debug, Deserialize)]
struct ParsedAccount {
    /// Absent `type` reads as empty, i.e. not delegated.
    #[serde(rename = "type", default)]
    kind: String,
    /// Left undecoded until the type is known: non-delegated states use
    /// different shapes.
    #[serde(default)]
    info: Option<Box<RawValue>>,
}

#[derive(Debug, Deserialize)]
struct DelegatedInfo {
    stake: Option<StakeState>,
}

#[derive(Debug, Deserialize)]
struct StakeState {
    delegation: Delegation,
}

#[derive(Debug, Deserialize)]
struct Delegation {
    stake: String,
}

/// Sums the delegated stake, in lamports, of a raw `getProgramAccounts`
/// result.
pub fn sum_delegated_stake(raw: &RawResult) -> Result<u64> {
    let accounts: Vec<KeyedAccount> = raw.decode()?;

    let mut total: u64 = 0;
    for account in accounts {
        let parsed = account.account.data.parsed;
        if parsed.kind != DELEGATED {
            trace!(kind = %parsed.kind, "skipping stake account");
            continue;
        }

        let amount = delegation_amount(parsed.info.as_deref())?;
        let stake = amount
            .parse::<u64>()
            .map_err(|e| SolanaRpcError::ValueParse {
                value: amount.clone(),
                reason: e.to_string(),
            })?;
        total = total
            .checked_add(stake)
            .ok_or_else(|| SolanaRpcError::ValueParse {
                value: amount,
                reason: "total stake overflows u64".into(),
            })?;
    }
    Ok(total)
}

fn delegation_amount(info: Option<&RawValue>) -> Result<String> {
    let missing = || SolanaRpcError::ValueParse {
        value: String::new(),
        reason: "delegated account has no delegation stake".into(),
    };
    let info = info.ok_or_else(missing)?;
    let info: DelegatedInfo =
        serde_json::from_str(info.get()).map_err(|e| SolanaRpcError::ValueParse {
            value: info.get().to_owned(),
            reason: e.to_string(),
        })?;
    info.stake
        .map(|state| state.delegation.stake)
        .ok_or_else(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delegated(stake: &str) -> serde_json::Value {
        json!({
            "account": {
                "data": {
                    "parsed": {
                        "info": {
                            "meta": {"rentExemptReserve": "2282880"},
                            "stake": {
                                "creditsObserved": 1234,
                                "delegation": {
                                    "activationEpoch": "123",
                                    "deactivationEpoch": "18446744073709551615",
                                    "stake": stake,
                                    "voter": "Vote111111111111111111111111111111111111111"
                                }
                            }
                        },
                        "type": "delegated"
                    },
                    "program": "stake",
                    "space": 200
                },
                "lamports": 500000000u64
            },
            "pubkey": "TESTPUBKEY"
        })
    }

    fn initialized() -> serde_json::Value {
        json!({
            "account": {
                "data": {
                    "parsed": {
                        "info": {"meta": {"rentExemptReserve": "2282880"}, "stake": null},
                        "type": "initialized"
                    }
                }
            },
            "pubkey": "INITPUBKEY"
        })
    }

    fn raw(accounts: serde_json::Value) -> RawResult {
        RawResult::from_json(&accounts.to_string()).unwrap()
    }

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(sum_delegated_stake(&raw(json!([]))).unwrap(), 0);
    }

    #[test]
    fn sums_delegated_records() {
        let accounts = json!([delegated("500000000"), delegated("250000000")]);
        assert_eq!(sum_delegated_stake(&raw(accounts)).unwrap(), 750_000_000);
    }

    #[test]
    fn other_states_contribute_zero() {
        let accounts = json!([delegated("300000000"), initialized()]);
        assert_eq!(sum_delegated_stake(&raw(accounts)).unwrap(), 300_000_000);
    }

    #[test]
    fn other_states_without_info_are_fine() {
        let accounts = json!([{
            "account": {"data": {"parsed": {"type": "uninitialized"}}}
        }]);
        assert_eq!(sum_delegated_stake(&raw(accounts)).unwrap(), 0);
    }

    #[test]
    fn non_numeric_stake_fails_whole_call() {
        let accounts = json!([delegated("100"), delegated("lots")]);
        let err = sum_delegated_stake(&raw(accounts)).unwrap_err();
        match err {
            SolanaRpcError::ValueParse { value, .. } => assert_eq!(value, "lots"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn record_without_type_is_skipped() {
        let accounts = json!([
            {"account": {"data": {"parsed": {"info": {}}}}},
            delegated("200000000")
        ]);
        assert_eq!(sum_delegated_stake(&raw(accounts)).unwrap(), 200_000_000);
    }

    #[test]
    fn delegated_without_stake_fails() {
        let accounts = json!([{
            "account": {"data": {"parsed": {"type": "delegated", "info": {"meta": {}}}}}
        }]);
        let err = sum_delegated_stake(&raw(accounts)).unwrap_err();
        assert!(matches!(err, SolanaRpcError::ValueParse { .. }));
    }

    #[test]
    fn max_single_stake_is_accepted() {
        let accounts = json!([delegated("18446744073709551615")]);
        assert_eq!(sum_delegated_stake(&raw(accounts)).unwrap(), u64::MAX);
    }

    #[test]
    fn overflowing_total_is_reported() {
        let accounts = json!([delegated("18446744073709551615"), delegated("1")]);
        let err = sum_delegated_stake(&raw(accounts)).unwrap_err();
        assert!(matches!(err, SolanaRpcError::ValueParse { .. }));
    }

    #[test]
    fn non_array_payload_is_protocol_error() {
        let err = sum_delegated_stake(&raw(json!({"value": []}))).unwrap_err();
        assert!(matches!(err, SolanaRpcError::ProtocolParse { .. }));
    }
}
