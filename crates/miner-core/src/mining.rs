//! The proof-of-work search loop.
//!
//! A [`MiningLoop`] is built once per run: construction derives the target
//! from the difficulty, so an invalid difficulty is reported before any
//! hashing happens. [`MiningLoop::run`] then hashes consecutive nonces until
//! a digest is at or below the target, the nonce space runs out, or the
//! caller cancels.

use primitive_types::U256;
use tracing::{debug, info};

use crate::block::BlockHeader;
use crate::cancel::CancelToken;
use crate::config::PROGRESS_INTERVAL;
use crate::difficulty::{difficulty_to_target, hash_meets_target, hash_value};
use crate::error::{MinerError, MinerResult};
use crate::hash::{to_hex, Hash, PowHasher};
use crate::stats::{MiningStats, Progress};

/// Receives periodic progress reports from a running search.
pub trait MiningObserver {
    fn on_progress(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> MiningObserver for F {
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MiningObserver for NoopObserver {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// A winning nonce together with its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The nonce that was hashed to produce `hash` (not the next candidate).
    pub nonce: u64,
    pub hash: Hash,
    /// `hash` read as a big-endian integer.
    pub value: U256,
}

impl Solution {
    pub fn new(nonce: u64, hash: Hash) -> Self {
        Solution {
            nonce,
            hash,
            value: hash_value(&hash),
        }
    }

    pub fn hash_hex(&self) -> String {
        to_hex(&self.hash)
    }
}

/// How a search ended, other than by error.
#[derive(Debug, Clone, PartialEq)]
pub enum MiningOutcome {
    Solved {
        solution: Solution,
        progress: Progress,
    },
    /// Stopped through the [`CancelToken`]. Carries statistics only.
    Cancelled { progress: Progress },
}

impl MiningOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            MiningOutcome::Solved { solution, .. } => Some(solution),
            MiningOutcome::Cancelled { .. } => None,
        }
    }

    pub fn progress(&self) -> &Progress {
        match self {
            MiningOutcome::Solved { progress, .. } | MiningOutcome::Cancelled { progress } => {
                progress
            }
        }
    }
}

/// Search state that is fixed for a run.
#[derive(Debug, Clone)]
pub struct MiningLoop<H> {
    hasher: H,
    header: BlockHeader,
    difficulty: u64,
    target: U256,
    progress_interval: u64,
}

impl<H: PowHasher> MiningLoop<H> {
    /// Fails with [`MinerError::InvalidDifficulty`] if `difficulty` is 0.
    pub fn new(hasher: H, header: BlockHeader, difficulty: u64) -> MinerResult<Self> {
        let target = difficulty_to_target(difficulty)?;
        Ok(MiningLoop {
            hasher,
            header,
            difficulty,
            target,
            progress_interval: PROGRESS_INTERVAL,
        })
    }

    /// Report progress every `interval` hashes instead of the default 50.
    /// An interval of 0 is treated as 1.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn difficulty(&self) -> u64 {
        self.difficulty
    }

    pub fn target(&self) -> U256 {
        self.target
    }

    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    /// Hash a single nonce and return a solution if it meets the target.
    #[inline]
    pub fn try_nonce(&self, nonce: u64) -> Option<Solution> {
        let hash = self.hasher.hash(self.header.as_bytes(), nonce);
        if hash_meets_target(&hash, &self.target) {
            Some(Solution::new(nonce, hash))
        } else {
            None
        }
    }

    /// Search upward from `start_nonce`.
    ///
    /// The cancel token is checked before every hash. Progress is reported
    /// after every `progress_interval`-th hash, before the solved check, so
    /// a solving hash that lands on a multiple is also reported.
    pub fn run<O>(
        &self,
        start_nonce: u64,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> MinerResult<MiningOutcome>
    where
        O: MiningObserver + ?Sized,
    {
        debug!(
            "searching from nonce {} with {} (difficulty {}, target {:#x})",
            start_nonce,
            self.hasher.name(),
            self.difficulty,
            self.target
        );

        let header = self.header.as_bytes();
        let mut stats = MiningStats::new(start_nonce);
        let mut nonce = start_nonce;

        loop {
            if cancel.is_cancelled() {
                info!("mining cancelled after {} hashes", stats.hash_count());
                return Ok(MiningOutcome::Cancelled {
                    progress: stats.snapshot(),
                });
            }

            let hash = self.hasher.hash(header, nonce);

            let next = nonce.checked_add(1);
            stats.record(next.unwrap_or(nonce));

            if stats.hash_count() % self.progress_interval == 0 {
                observer.on_progress(&stats.snapshot());
            }

            if hash_meets_target(&hash, &self.target) {
                info!(
                    "solution found at nonce {} after {} hashes ({:.0} H/s)",
                    nonce,
                    stats.hash_count(),
                    stats.hashrate()
                );
                return Ok(MiningOutcome::Solved {
                    solution: Solution::new(nonce, hash),
                    progress: stats.snapshot(),
                });
            }

            nonce = match next {
                Some(next) => next,
                None => {
                    return Err(MinerError::NoSolutionFound {
                        hashes: stats.hash_count(),
                    })
                }
            };
        }
    }
}
