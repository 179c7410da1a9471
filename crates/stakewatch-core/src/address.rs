//! Wallet address checks applied before any RPC call is made.
//!
//! Only the length is checked. Base58 decoding is left to the RPC node.

use thiserror::Error;

/// Accepted lengths of a base58-encoded Solana public key.
pub const ADDRESS_LENGTHS: [usize; 2] = [43, 44];

/// Errors from address validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid address length: {0} (expected 43 or 44 bytes)")]
    InvalidLength(usize),
}

/// Returns the address unchanged if it is 43 or 44 bytes long.
pub fn validate_address(address: &str) -> Result<&str, AddressError> {
    let len = address.len();
    if ADDRESS_LENGTHS.contains(&len) {
        Ok(address)
    } else {
        Err(AddressError::InvalidLength(len))
    }
}
