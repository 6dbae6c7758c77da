//! Multi-threaded search over a partitioned nonce space.
//!
//! Each worker owns a contiguous slice of the nonce range and calls the
//! shared hasher independently. Workers only share an atomic hash counter
//! and a stop flag; progress reports are delivered to the observer on the
//! calling thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::error::{MinerError, MinerResult};
use crate::hash::PowHasher;
use crate::mining::{MiningLoop, MiningObserver, MiningOutcome, Solution};
use crate::stats::Progress;

/// An inclusive, non-empty range of nonces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceRange {
    start: u64,
    end: u64,
}

impl NonceRange {
    /// Returns `None` if `start > end`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(NonceRange { start, end })
    }

    /// Everything from `start` up to `u64::MAX`.
    pub fn from_start(start: u64) -> Self {
        NonceRange {
            start,
            end: u64::MAX,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of nonces in the range. Needs 65 bits for the full space.
    pub fn len(&self) -> u128 {
        self.end as u128 - self.start as u128 + 1
    }

    pub fn contains(&self, nonce: u64) -> bool {
        self.start <= nonce && nonce <= self.end
    }

    /// Split into at most `parts` contiguous, non-overlapping sub-ranges
    /// covering this range. The last part absorbs the remainder.
    pub fn split(&self, parts: usize) -> Vec<NonceRange> {
        let parts = (parts.max(1) as u128).min(self.len());
        let size = self.len() / parts;

        (0..parts)
            .map(|i| {
                let start = self.start as u128 + i * size;
                let end = if i == parts - 1 {
                    self.end as u128
                } else {
                    start + size - 1
                };
                NonceRange {
                    start: start as u64,
                    end: end as u64,
                }
            })
            .collect()
    }
}

enum WorkerEvent {
    Progress { hash_count: u64, next_nonce: u64 },
    Solved(Solution),
}

/// Runs a [`MiningLoop`] on several threads.
#[derive(Debug)]
pub struct ParallelMiner<H> {
    inner: MiningLoop<H>,
    threads: usize,
}

impl<H: PowHasher> ParallelMiner<H> {
    /// `threads` is clamped to at least 1.
    pub fn new(inner: MiningLoop<H>, threads: usize) -> Self {
        ParallelMiner {
            inner,
            threads: threads.max(1),
        }
    }

    pub fn inner(&self) -> &MiningLoop<H> {
        &self.inner
    }

    /// Search `range` with all workers.
    ///
    /// Progress is reported each time the aggregate hash count reaches a
    /// multiple of the loop's progress interval. With several workers the
    /// reports can arrive slightly out of order. The first solution found
    /// stops every worker.
    pub fn run<O>(
        &self,
        range: NonceRange,
        cancel: &CancelToken,
        observer: &mut O,
    ) -> MinerResult<MiningOutcome>
    where
        O: MiningObserver + ?Sized,
    {
        let started = Instant::now();
        let parts = range.split(self.threads);
        let hashes = AtomicU64::new(0);
        let stop = AtomicBool::new(false);

        info!(
            "starting {} workers over nonces {}..={}",
            parts.len(),
            range.start,
            range.end
        );

        let mut solution = None;
        let mut last_nonce = range.start;

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel();

            for (id, part) in parts.iter().copied().enumerate() {
                let tx = tx.clone();
                let hashes = &hashes;
                let stop = &stop;
                scope.spawn(move || {
                    debug!("worker {} searching {}..={}", id, part.start, part.end);
                    self.search(part, cancel, hashes, stop, &tx);
                    debug!("worker {} stopped", id);
                });
            }
            drop(tx);

            for event in rx {
                match event {
                    WorkerEvent::Progress {
                        hash_count,
                        next_nonce,
                    } => {
                        last_nonce = next_nonce;
                        observer.on_progress(&Progress::new(
                            hash_count,
                            next_nonce,
                            started.elapsed(),
                        ));
                    }
                    WorkerEvent::Solved(found) => {
                        last_nonce = found.nonce.saturating_add(1);
                        solution = Some(found);
                    }
                }
            }
        });

        let progress = Progress::new(
            hashes.load(Ordering::SeqCst),
            last_nonce,
            started.elapsed(),
        );

        match solution {
            Some(solution) => {
                info!(
                    "solution found at nonce {} after {} hashes",
                    solution.nonce, progress.hash_count
                );
                Ok(MiningOutcome::Solved { solution, progress })
            }
            None if cancel.is_cancelled() => {
                info!("mining cancelled after {} hashes", progress.hash_count);
                Ok(MiningOutcome::Cancelled { progress })
            }
            None => Err(MinerError::NoSolutionFound {
                hashes: progress.hash_count,
            }),
        }
    }

    fn search(
        &self,
        part: NonceRange,
        cancel: &CancelToken,
        hashes: &AtomicU64,
        stop: &AtomicBool,
        tx: &mpsc::Sender<WorkerEvent>,
    ) {
        let interval = self.inner.progress_interval();
        let mut nonce = part.start;

        loop {
            if stop.load(Ordering::Relaxed) || cancel.is_cancelled() {
                return;
            }

            let found = self.inner.try_nonce(nonce);
            let count = hashes.fetch_add(1, Ordering::Relaxed) + 1;

            if count % interval == 0 {
                let _ = tx.send(WorkerEvent::Progress {
                    hash_count: count,
                    next_nonce: nonce.saturating_add(1),
                });
            }

            if let Some(found) = found {
                // Only the first finder reports.
                if !stop.swap(true, Ordering::SeqCst) {
                    let _ = tx.send(WorkerEvent::Solved(found));
                }
                return;
            }

            if nonce == part.end {
                return;
            }
            nonce += 1;
        }
    }
}
