//! Aequitas mining address validation.
//!
//! Addresses have the form `aeq1<payload>` where the payload is Base58.
//! The checksum embedded in real wallet addresses is not checked here: the
//! simulator only needs to reject obviously malformed input before mining.

use thiserror::Error;

/// Human-readable prefix of every mainnet address, including the separator.
pub const ADDRESS_PREFIX: &str = "aeq1";

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Address validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("address must start with `aeq1`")]
    InvalidPrefix,
    #[error("address has no payload after the prefix")]
    MissingPayload,
    #[error("invalid Base58 character: {0}")]
    InvalidBase58Char(char),
}

/// Validate a mining address and return it trimmed.
pub fn validate_address(address: &str) -> Result<&str, AddressError> {
    let trimmed = address.trim();

    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }

    let payload = trimmed
        .strip_prefix(ADDRESS_PREFIX)
        .ok_or(AddressError::InvalidPrefix)?;

    if payload.is_empty() {
        return Err(AddressError::MissingPayload);
    }

    if let Some(c) = payload.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
        return Err(AddressError::InvalidBase58Char(c));
    }

    Ok(trimmed)
}
