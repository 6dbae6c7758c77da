//! Core proof-of-work logic for the Aequitas mining simulator.
//!
//! This crate provides:
//! - A chained SHA3 hash standing in for the memory-hard AequiHash
//! - Difficulty to 256-bit target conversion
//! - The single-threaded search loop with cooperative cancellation
//! - A multi-threaded search over a partitioned nonce space
//! - Throughput statistics, configuration and a stubbed submitter

pub mod address;
pub mod bench;
pub mod block;
pub mod cancel;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod hash;
pub mod mining;
pub mod parallel;
pub mod stats;
pub mod submit;

pub use address::{validate_address, AddressError};
pub use bench::benchmark;
pub use block::BlockHeader;
pub use cancel::CancelToken;
pub use config::{HashAlgorithm, MinerConfig};
pub use difficulty::{difficulty_to_target, hash_meets_target, hash_value, verify};
pub use error::{MinerError, MinerResult};
pub use hash::{AequiHashLight, ChainedSha256, Hash, PowHasher};
pub use mining::{MiningLoop, MiningObserver, MiningOutcome, NoopObserver, Solution};
pub use parallel::{NonceRange, ParallelMiner};
pub use primitive_types::U256;
pub use stats::{format_hashrate, format_uptime, MiningStats, Progress};
pub use submit::{SolutionSubmitter, StubSubmitter};
