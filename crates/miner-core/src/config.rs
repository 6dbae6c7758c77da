//! Simulation parameters and the miner configuration built from them.

use serde::{Deserialize, Serialize};

use crate::address::validate_address;
use crate::block::DEFAULT_HEADER;
use crate::error::{MinerError, MinerResult};
use crate::hash::MIXING_ROUNDS;

/// Reward address used when none is given.
pub const DEFAULT_ADDRESS: &str = "aeq1qrp3uqu76r8re3u4sh5re6sh8sh8sh1";

/// Default target difficulty (one solution per million hashes on average).
pub const DEFAULT_DIFFICULTY: u64 = 1_000_000;

/// Hashes between two progress reports.
pub const PROGRESS_INTERVAL: u64 = 50;

/// Upper bound (inclusive) of the random starting nonce chosen by the shell.
pub const MAX_RANDOM_START_NONCE: u64 = 1_000_000;

/// Working memory the real GPU algorithm would require, shown in the banner.
pub const SIMULATED_VRAM_GB: u32 = 6;

/// Digest family used by the chained hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha3,
    Sha256,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha3 => "AequiHash (GPU optimized)",
            HashAlgorithm::Sha256 => "ChainedSha256",
        }
    }
}

/// Everything a mining run needs besides the starting nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Reward address shown in the banner and passed to the submitter.
    pub address: String,
    pub difficulty: u64,
    /// Block header as hex.
    pub header_hex: String,
    pub progress_interval: u64,
    pub mixing_rounds: usize,
    /// Worker threads; 1 runs the single-threaded loop.
    pub threads: usize,
    pub algorithm: HashAlgorithm,
}

impl Default for MinerConfig {
    fn default() -> Self {
        MinerConfig {
            address: DEFAULT_ADDRESS.to_string(),
            difficulty: DEFAULT_DIFFICULTY,
            header_hex: hex::encode(DEFAULT_HEADER),
            progress_interval: PROGRESS_INTERVAL,
            mixing_rounds: MIXING_ROUNDS,
            threads: 1,
            algorithm: HashAlgorithm::Sha3,
        }
    }
}

impl MinerConfig {
    /// Validate configuration
    pub fn validate(&self) -> MinerResult<()> {
        validate_address(&self.address)?;

        if self.difficulty == 0 {
            return Err(MinerError::InvalidDifficulty(self.difficulty));
        }

        self.header()?;

        if self.progress_interval == 0 {
            return Err(MinerError::InvalidConfig(
                "progress interval must be at least 1".into(),
            ));
        }

        if self.threads == 0 {
            return Err(MinerError::InvalidConfig("at least one thread is required".into()));
        }

        Ok(())
    }

    /// Decode the configured header.
    pub fn header(&self) -> MinerResult<crate::block::BlockHeader> {
        crate::block::BlockHeader::from_hex(&self.header_hex)
    }
}
