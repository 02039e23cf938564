//! Core logic for the Colosseum fault-dispute protocol
//!
//! This crate contains the pure parts of the protocol that are shared between:
//! - The challenge coordinator
//! - Off-chain drivers (challenger/asserter agents, the simulator)

pub mod challenge;
pub mod hashing;
pub mod proof;
pub mod rlp;
pub mod segments;
pub mod status;
pub mod types;

pub use challenge::{Challenge, Party};
pub use proof::{BlockHeaderRlps, OutputRootProof, PublicInput, PublicInputProof};
pub use segments::InvalidLengths;
pub use status::ChallengeStatus;
pub use types::*;

/// Predeployed L2 account whose storage root is committed into every output
/// root (0x4200000000000000000000000000000000000003).
pub const L2_TO_L1_MESSAGE_PASSER: types::Address = [
    0x42, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x03,
];
