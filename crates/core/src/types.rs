//! Common protocol types

use serde::{Deserialize, Serialize};

/// 32-byte digest type
pub type Hash = [u8; 32];

/// Account address (20 bytes)
pub type Address = [u8; 20];

/// L2 block number
pub type BlockNumber = u64;

/// Wall-clock timestamp in seconds
pub type Timestamp = u64;

/// Index of a checkpoint output in the output oracle
pub type OutputIndex = u64;

/// The all-zero digest, used as the "absent" sentinel for output roots
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Checkpoint output as recorded by the output oracle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointOutput {
    /// Commitment over the L2 state at the checkpoint boundary
    pub output_root: Hash,
    /// L2 block number the output commits to
    pub l2_block_number: BlockNumber,
    /// Time the output was submitted
    pub timestamp: Timestamp,
    /// Validator that submitted the output
    pub submitter: Address,
}
