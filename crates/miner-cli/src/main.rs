use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use miner_core::{
    bench, config::MAX_RANDOM_START_NONCE, AequiHashLight, CancelToken, ChainedSha256,
    HashAlgorithm, MinerConfig, MiningLoop, MiningOutcome, NonceRange, ParallelMiner, PowHasher,
    SolutionSubmitter, StubSubmitter,
};
use rand::Rng;
use tokio::signal;
use tracing::*;

mod cli;
mod display;
mod log;

use cli::{Cli, Command};
use display::Reporter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_log(cli.verbose);

    let config = cli.mining.to_config();
    config.validate().context("invalid miner configuration")?;
    debug!("configuration: {:?}", config);

    let cancel = CancelToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("ctrl+c received, stopping");
                    cancel.cancel();
                }
                Err(err) => error!("failed to listen for Ctrl+C: {}", err),
            }
        }
    });

    let json = cli.mining.json;
    match cli.command.unwrap_or(Command::Mine) {
        Command::Mine => {
            let start_nonce = cli
                .mining
                .start_nonce
                .unwrap_or_else(|| rand::thread_rng().gen_range(0..=MAX_RANDOM_START_NONCE));
            mine(config, start_nonce, cancel, json).await
        }
        Command::Benchmark { duration } => {
            run_benchmark(config, Duration::from_secs(duration), cancel, json).await
        }
    }
}

fn build_hasher(config: &MinerConfig) -> Box<dyn PowHasher> {
    match config.algorithm {
        HashAlgorithm::Sha3 => Box::new(AequiHashLight::new(config.mixing_rounds)),
        HashAlgorithm::Sha256 => Box::new(ChainedSha256::new(config.mixing_rounds)),
    }
}

async fn mine(
    config: MinerConfig,
    start_nonce: u64,
    cancel: CancelToken,
    json: bool,
) -> Result<()> {
    let miner = MiningLoop::new(build_hasher(&config), config.header()?, config.difficulty)?
        .with_progress_interval(config.progress_interval);

    if !json {
        display::print_banner(&config, start_nonce);
    }

    let threads = config.threads;
    let outcome = tokio::task::spawn_blocking(move || {
        let mut reporter = Reporter::new(json);
        if threads > 1 {
            ParallelMiner::new(miner, threads).run(
                NonceRange::from_start(start_nonce),
                &cancel,
                &mut reporter,
            )
        } else {
            miner.run(start_nonce, &cancel, &mut reporter)
        }
    })
    .await
    .context("mining task panicked")??;

    match outcome {
        MiningOutcome::Solved { solution, .. } => {
            let submitted = match StubSubmitter.submit(&solution, &config.address) {
                Ok(()) => true,
                Err(err) => {
                    error!("{}", err);
                    false
                }
            };
            display::print_solution(&solution, submitted, json);
        }
        MiningOutcome::Cancelled { progress } => {
            display::print_cancelled(&progress, json);
        }
    }

    Ok(())
}

async fn run_benchmark(
    config: MinerConfig,
    duration: Duration,
    cancel: CancelToken,
    json: bool,
) -> Result<()> {
    let hasher = build_hasher(&config);
    let header = config.header()?;

    if !json {
        println!("Running benchmark for {} seconds...\n", duration.as_secs());
    }

    let algorithm = hasher.name();
    let progress = tokio::task::spawn_blocking(move || {
        bench::benchmark(&hasher, header.as_bytes(), duration, &cancel)
    })
    .await
    .context("benchmark task panicked")?;

    display::print_benchmark(&progress, algorithm, json);
    Ok(())
}
