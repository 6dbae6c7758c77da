//! Error type shared by the mining library.

use thiserror::Error;

use crate::address::AddressError;

/// Errors surfaced by the mining library.
///
/// Cancellation is not an error: it is reported through
/// [`MiningOutcome::Cancelled`](crate::mining::MiningOutcome::Cancelled).
#[derive(Debug, Error)]
pub enum MinerError {
    /// Difficulty must be at least 1.
    #[error("invalid difficulty {0}: must be at least 1")]
    InvalidDifficulty(u64),

    /// The block header must contain at least one byte.
    #[error("block header must not be empty")]
    EmptyHeader,

    #[error("invalid mining address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every nonce in the search range was hashed without meeting the target.
    #[error("nonce space exhausted after {hashes} hashes without a solution")]
    NoSolutionFound { hashes: u64 },

    #[error("solution submission failed: {0}")]
    Submission(String),
}

pub type MinerResult<T> = Result<T, MinerError>;
