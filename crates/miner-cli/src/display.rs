//! Terminal output: banner, progress line, solution and summaries.

use std::io::Write;

use colored::*;
use miner_core::{
    config::SIMULATED_VRAM_GB,
    difficulty::{expected_hashes, format_difficulty},
    format_hashrate, format_uptime, MinerConfig, MiningObserver, Progress, Solution,
};
use serde::Serialize;

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

/// One JSON line per event in `--json` mode.
#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    Progress(&'a Progress),
    Solved {
        nonce: u64,
        hash: String,
        value: String,
        submitted: bool,
    },
    Cancelled(&'a Progress),
    Benchmark(&'a Progress),
}

fn emit(event: &Event<'_>) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(err) => tracing::error!("failed to encode event: {}", err),
    }
}

pub fn print_banner(config: &MinerConfig, start_nonce: u64) {
    println!("{}", RULE.bright_cyan());
    println!(
        "   {}",
        format!("AEQUITAS MINING SIMULATOR (v{})", env!("CARGO_PKG_VERSION")).bold()
    );
    println!("{}", RULE.bright_cyan());
    println!("Algorithm: {}", config.algorithm.name().bright_yellow());
    println!("VRAM Min: {} GB (Simulation)", SIMULATED_VRAM_GB);
    println!("{}", THIN_RULE.bright_cyan());
    println!("Mining with address: {}", config.address.green());
    println!(
        "Target Difficulty: {} ({})",
        config.difficulty,
        format_difficulty(config.difficulty)
    );
    println!("Expected hashes per block: ~{:.0}", expected_hashes(config.difficulty));
    println!("Threads: {} | Start nonce: {}", config.threads, start_nonce);
    println!("Mining started... Press Ctrl+C to stop.\n");
}

/// Prints a progress report every time the loop emits one.
pub struct Reporter {
    json: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Reporter { json }
    }
}

impl MiningObserver for Reporter {
    fn on_progress(&mut self, progress: &Progress) {
        if self.json {
            emit(&Event::Progress(progress));
            return;
        }

        print!(
            "\rHashrate: {:.2} H/s | Hashes: {} | Nonce: {}",
            progress.hashrate, progress.hash_count, progress.current_nonce
        );
        if let Err(err) = std::io::stdout().flush() {
            tracing::debug!("failed to flush progress line: {}", err);
        }
    }
}

pub fn print_solution(solution: &Solution, submitted: bool, json: bool) {
    if json {
        emit(&Event::Solved {
            nonce: solution.nonce,
            hash: solution.hash_hex(),
            value: solution.value.to_string(),
            submitted,
        });
        return;
    }

    println!("\n\n{}", "[SOLVED] SOLUTION FOUND!".bright_green().bold());
    println!("Nonce: {}", solution.nonce);
    println!("Hash:  {}", solution.hash_hex());
    println!("Result: {}", solution.value);
    println!("{}", THIN_RULE);
    if submitted {
        println!("{}", "Submission to node: SUCCESS!".green());
    } else {
        println!("{}", "Submission to node: FAILED".red());
    }
}

pub fn print_cancelled(progress: &Progress, json: bool) {
    if json {
        emit(&Event::Cancelled(progress));
        return;
    }

    println!("\n\n{}", "Mining stopped by user.".yellow());
    print_summary(progress);
}

pub fn print_benchmark(progress: &Progress, algorithm: &str, json: bool) {
    if json {
        emit(&Event::Benchmark(progress));
        return;
    }

    println!("{}", "Benchmark Results:".bold());
    println!("{}", RULE);
    println!("  Algorithm:    {}", algorithm);
    print_summary(progress);
    println!("{}", RULE);
}

fn print_summary(progress: &Progress) {
    println!("  Total Hashes: {}", progress.hash_count);
    println!("  Hashrate:     {}", format_hashrate(progress.hashrate));
    println!("  Uptime:       {}", format_uptime(progress.elapsed()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_progress_event_json() {
        let progress = Progress::new(50, 1_050, Duration::from_secs(2));
        let line = serde_json::to_value(Event::Progress(&progress)).unwrap();
        assert_eq!(line["event"], "progress");
        assert_eq!(line["hash_count"], 50);
        assert_eq!(line["current_nonce"], 1_050);
    }

    #[test]
    fn test_solved_event_json() {
        let solution = Solution::new(7, [0u8; 32]);
        let line = serde_json::to_value(Event::Solved {
            nonce: solution.nonce,
            hash: solution.hash_hex(),
            value: solution.value.to_string(),
            submitted: true,
        })
        .unwrap();
        assert_eq!(line["event"], "solved");
        assert_eq!(line["value"], "0");
        assert_eq!(line["hash"], "0".repeat(64));
    }
}
