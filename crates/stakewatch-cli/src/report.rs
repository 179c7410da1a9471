//! Report rendering for a resolved balance.

use serde::Serialize;
use stakewatch_core::BalanceSnapshot;

const UNIT: &str = "SOL";

/// JSON form of the report.
#[derive(Debug, Serialize)]
pub struct BalanceReport<'a> {
    pub address: &'a str,
    pub current_balance: f64,
    pub staked_balance: f64,
    pub total_balance: f64,
    pub unit: &'static str,
}

impl<'a> BalanceReport<'a> {
    pub fn new(address: &'a str, snapshot: &BalanceSnapshot) -> Self {
        Self {
            address,
            current_balance: snapshot.liquid,
            staked_balance: snapshot.staked,
            total_balance: snapshot.total(),
            unit: UNIT,
        }
    }

    /// Two-column `Category | Value` table.
    pub fn to_table(&self) -> String {
        let rows = [
            ("Address", self.address.to_string()),
            ("Current Balance", format_sol(self.current_balance)),
            ("Staked Balance", format_sol(self.staked_balance)),
            ("Total Balance", format_sol(self.total_balance)),
        ];
        let width = rows
            .iter()
            .map(|(category, _)| category.len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        out.push_str(&format!("{:<width$} | Value\n", "Category"));
        out.push_str(&format!("{:<width$} | -----\n", "--------"));
        for (category, value) in rows {
            out.push_str(&format!("{category:<width$} | {value}\n"));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_sol(amount: f64) -> String {
    format!("{amount:.9} {UNIT}")
}
