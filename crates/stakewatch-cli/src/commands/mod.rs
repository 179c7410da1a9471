//! CLI subcommand implementations.

pub mod balance;
pub mod util;
