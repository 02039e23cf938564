//! Coordinator error taxonomy
//!
//! Every variant rejects the operation without mutating state. Timeouts are
//! not errors; they surface as statuses.

use thiserror::Error;

use colosseum_core::segments::InvalidLengths;
use colosseum_core::{ChallengeStatus, OutputIndex};

/// Rejection of a coordinator operation
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("output {0} is already finalized")]
    OutputFinalized(OutputIndex),
    #[error("invalid output index {index}: {reason}")]
    InvalidIndex {
        index: OutputIndex,
        reason: &'static str,
    },
    #[error("a challenge for output {0} is already active")]
    AlreadyActive(OutputIndex),
    #[error("bad segments: {0}")]
    BadSegments(&'static str),
    #[error("not the caller's turn (status {status:?})")]
    WrongTurn { status: ChallengeStatus },
    #[error("proof rejected: {0}")]
    ProofRejected(&'static str),
    #[error("public input digest was already verified")]
    Replay,
    #[error("caller is not the security council")]
    NotCouncil,
    #[error("challenge is not in the proven state")]
    NotProven,
}

/// Rejection of a coordinator configuration at construction
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Lengths(#[from] InvalidLengths),
    #[error("configured submission interval {configured} does not match the oracle's {oracle}")]
    IntervalMismatch { configured: u64, oracle: u64 },
}
