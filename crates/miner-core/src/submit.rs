//! Hand-off of found solutions to a node.

use tracing::info;

use crate::error::MinerResult;
use crate::mining::Solution;

/// Delivers a solution on behalf of `address`.
pub trait SolutionSubmitter {
    fn submit(&self, solution: &Solution, address: &str) -> MinerResult<()>;
}

/// Accepts every solution without any network traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubSubmitter;

impl SolutionSubmitter for StubSubmitter {
    fn submit(&self, solution: &Solution, address: &str) -> MinerResult<()> {
        info!(
            nonce = solution.nonce,
            hash = %solution.hash_hex(),
            address,
            "submitting solution to node (stub)"
        );
        Ok(())
    }
}
