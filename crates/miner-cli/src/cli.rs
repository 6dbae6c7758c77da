use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use miner_core::{
    config::{DEFAULT_ADDRESS, DEFAULT_DIFFICULTY, PROGRESS_INTERVAL},
    hash::MIXING_ROUNDS,
    HashAlgorithm, MinerConfig,
};

/// Aequitas mining simulator
#[derive(Parser, Debug)]
#[command(name = "aequitas-miner")]
#[command(version, about = "Aequitas proof-of-work mining simulator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub mining: MiningArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a solution (default)
    Mine,

    /// Measure raw hashing throughput
    Benchmark {
        /// Duration in seconds
        #[arg(long, value_name = "SECS", default_value_t = 10)]
        duration: u64,
    },
}

#[derive(ClapArgs, Debug)]
pub struct MiningArgs {
    /// Reward address
    #[arg(short, long, value_name = "ADDRESS", default_value = DEFAULT_ADDRESS, global = true)]
    pub address: String,

    /// Target difficulty (at least 1)
    #[arg(
        short,
        long,
        value_name = "DIFFICULTY",
        default_value_t = DEFAULT_DIFFICULTY,
        global = true
    )]
    pub difficulty: u64,

    /// Block header as hex (defaults to the genesis simulation header)
    #[arg(long, value_name = "HEX", global = true)]
    pub header: Option<String>,

    /// Starting nonce (random in 0..=1000000 if omitted)
    #[arg(short, long, value_name = "NONCE", global = true)]
    pub start_nonce: Option<u64>,

    /// Worker threads
    #[arg(short, long, value_name = "THREADS", default_value_t = 1, global = true)]
    pub threads: usize,

    /// Hashes between progress reports
    #[arg(long, value_name = "HASHES", default_value_t = PROGRESS_INTERVAL, global = true)]
    pub interval: u64,

    /// Mixing rounds after the initial digest
    #[arg(long, value_name = "ROUNDS", default_value_t = MIXING_ROUNDS, global = true)]
    pub rounds: usize,

    /// Digest family
    #[arg(long, value_enum, default_value_t = Algo::Sha3, global = true)]
    pub algo: Algo,

    /// Print progress and results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algo {
    Sha3,
    Sha256,
}

impl From<Algo> for HashAlgorithm {
    fn from(algo: Algo) -> Self {
        match algo {
            Algo::Sha3 => HashAlgorithm::Sha3,
            Algo::Sha256 => HashAlgorithm::Sha256,
        }
    }
}

impl MiningArgs {
    /// Apply the command line on top of the built-in defaults.
    pub fn to_config(&self) -> MinerConfig {
        let mut config = MinerConfig {
            address: self.address.clone(),
            difficulty: self.difficulty,
            progress_interval: self.interval,
            mixing_rounds: self.rounds,
            threads: self.threads,
            algorithm: self.algo.into(),
            ..MinerConfig::default()
        };
        if let Some(header) = &self.header {
            config.header_hex = header.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config() {
        let cli = Cli::parse_from(["aequitas-miner"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.mining.to_config(), MinerConfig::default());
        assert!(cli.mining.start_nonce.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "aequitas-miner",
            "mine",
            "--difficulty",
            "5",
            "--threads",
            "4",
            "--algo",
            "sha256",
            "--header",
            "abcd",
            "--start-nonce",
            "9",
        ]);
        let config = cli.mining.to_config();
        assert!(matches!(cli.command, Some(Command::Mine)));
        assert_eq!(config.difficulty, 5);
        assert_eq!(config.threads, 4);
        assert_eq!(config.algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.header_hex, "abcd");
        assert_eq!(cli.mining.start_nonce, Some(9));
    }

    #[test]
    fn test_benchmark_subcommand() {
        let cli = Cli::parse_from(["aequitas-miner", "benchmark", "--duration", "3"]);
        assert!(matches!(cli.command, Some(Command::Benchmark { duration: 3 })));
    }
}
