//! Raw hashing throughput measurement.

use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::hash::PowHasher;
use crate::stats::{MiningStats, Progress};

/// Hashes checked between two clock reads.
const BATCH: u64 = 1_000;

/// Hash sequential nonces for `duration` (or until cancelled) without
/// checking any target, and return the final statistics.
pub fn benchmark<H: PowHasher + ?Sized>(
    hasher: &H,
    header: &[u8],
    duration: Duration,
    cancel: &CancelToken,
) -> Progress {
    let started = Instant::now();
    let mut stats = MiningStats::new(0);
    let mut nonce = 0u64;

    while started.elapsed() < duration && !cancel.is_cancelled() {
        for _ in 0..BATCH {
            std::hint::black_box(hasher.hash(header, nonce));
            nonce = nonce.wrapping_add(1);
            stats.record(nonce);
        }
    }

    stats.snapshot()
}
