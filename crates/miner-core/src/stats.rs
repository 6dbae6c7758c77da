//! Mining statistics.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Run-scoped counters owned by the mining loop.
#[derive(Debug, Clone)]
pub struct MiningStats {
    /// Total hashes computed.
    hash_count: u64,
    /// Next nonce to be tried.
    current_nonce: u64,
    started: Instant,
}

impl MiningStats {
    /// Start counting from `start_nonce`, with the clock starting now.
    pub fn new(start_nonce: u64) -> Self {
        MiningStats {
            hash_count: 0,
            current_nonce: start_nonce,
            started: Instant::now(),
        }
    }

    /// Record one hash attempt; `next_nonce` is the following candidate.
    #[inline]
    pub fn record(&mut self, next_nonce: u64) {
        self.hash_count += 1;
        self.current_nonce = next_nonce;
    }

    pub fn hash_count(&self) -> u64 {
        self.hash_count
    }

    pub fn current_nonce(&self) -> u64 {
        self.current_nonce
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Hashes per second since the start. Zero until time has passed.
    pub fn hashrate(&self) -> f64 {
        hashrate(self.hash_count, self.elapsed())
    }

    pub fn snapshot(&self) -> Progress {
        Progress::new(self.hash_count, self.current_nonce, self.elapsed())
    }
}

/// A point-in-time view of the search, emitted as a progress event and as
/// the final summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Hashes per second.
    pub hashrate: f64,
    pub hash_count: u64,
    /// Next nonce to be tried.
    pub current_nonce: u64,
    pub elapsed_secs: f64,
}

impl Progress {
    pub fn new(hash_count: u64, current_nonce: u64, elapsed: Duration) -> Self {
        Progress {
            hashrate: hashrate(hash_count, elapsed),
            hash_count,
            current_nonce,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs)
    }
}

fn hashrate(hashes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        hashes as f64 / secs
    } else {
        0.0
    }
}

/// Format hashrate for display.
pub fn format_hashrate(hashrate: f64) -> String {
    if hashrate >= 1_000_000_000.0 {
        format!("{:.2} GH/s", hashrate / 1_000_000_000.0)
    } else if hashrate >= 1_000_000.0 {
        format!("{:.2} MH/s", hashrate / 1_000_000.0)
    } else if hashrate >= 1_000.0 {
        format!("{:.2} KH/s", hashrate / 1_000.0)
    } else {
        format!("{:.2} H/s", hashrate)
    }
}

/// Format an uptime as `"{h}h {m}m {s}s"`.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    format!("{}h {}m {}s", hours, mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_creation() {
        let stats = MiningStats::new(77);
        assert_eq!(stats.hash_count(), 0);
        assert_eq!(stats.current_nonce(), 77);
    }

    #[test]
    fn test_record() {
        let mut stats = MiningStats::new(10);
        stats.record(11);
        stats.record(12);
        assert_eq!(stats.hash_count(), 2);
        assert_eq!(stats.current_nonce(), 12);

        let snap = stats.snapshot();
        assert_eq!(snap.hash_count, 2);
        assert_eq!(snap.current_nonce, 12);
        assert!(snap.hashrate >= 0.0);
    }

    #[test]
    fn test_zero_elapsed_hashrate() {
        let progress = Progress::new(50, 0, Duration::ZERO);
        assert_eq!(progress.hashrate, 0.0);

        let progress = Progress::new(50, 0, Duration::from_secs(2));
        assert_eq!(progress.hashrate, 25.0);
    }

    #[test]
    fn test_hashrate_formatting() {
        assert_eq!(format_hashrate(500.0), "500.00 H/s");
        assert_eq!(format_hashrate(5000.0), "5.00 KH/s");
        assert_eq!(format_hashrate(5_000_000.0), "5.00 MH/s");
        assert_eq!(format_hashrate(5_000_000_000.0), "5.00 GH/s");
    }

    #[test]
    fn test_uptime_formatting() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn test_progress_json() {
        let progress = Progress::new(100, 1_000_100, Duration::from_secs(4));
        let json = serde_json::to_value(progress).unwrap();
        assert_eq!(json["hash_count"], 100);
        assert_eq!(json["current_nonce"], 1_000_100);
        assert_eq!(json["hashrate"], 25.0);
    }
}
