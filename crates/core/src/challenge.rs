//! Per-challenge state record

use serde::{Deserialize, Serialize};

use crate::types::{Address, BlockNumber, Hash, Timestamp, ZERO_ADDRESS, ZERO_HASH};

/// The two sides of a dispute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    /// Validator that submitted the disputed output
    Asserter,
    /// Account that opened the dispute
    Challenger,
}

/// State of a single challenge, keyed by output index in the coordinator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Validator that submitted the disputed output
    pub asserter: Address,
    /// Account that opened the dispute
    pub challenger: Address,
    /// Output-root waypoints submitted for the current turn
    pub segments: Vec<Hash>,
    /// L2 block number of the first segment (inclusive)
    pub seg_start: BlockNumber,
    /// Total L2-block span the segments cover
    pub seg_size: u64,
    /// 1-based turn counter; odd turns end with a challenger submission,
    /// even turns with an asserter submission. 0 encodes absence.
    pub turn: u32,
    /// Deadline for the actor whose move is next
    pub timeout_at: Timestamp,
    /// Replacement root once a proof succeeds; zero otherwise
    pub output_root: Hash,
    /// Set by the council approval step; permanent tombstone
    pub approved: bool,
}

impl Challenge {
    /// A freshly opened challenge at turn 1 (the challenger's opening
    /// submission).
    pub fn opened(
        asserter: Address,
        challenger: Address,
        segments: Vec<Hash>,
        seg_start: BlockNumber,
        seg_size: u64,
        timeout_at: Timestamp,
    ) -> Self {
        Self {
            asserter,
            challenger,
            segments,
            seg_start,
            seg_size,
            turn: 1,
            timeout_at,
            output_root: ZERO_HASH,
            approved: false,
        }
    }

    /// The record left behind after council approval. Keeps the replacement
    /// root for observers; everything else is cleared. The `approved` flag
    /// permanently blocks re-challenging the slot.
    pub fn tombstone(output_root: Hash) -> Self {
        Self {
            asserter: ZERO_ADDRESS,
            challenger: ZERO_ADDRESS,
            segments: Vec::new(),
            seg_start: 0,
            seg_size: 0,
            turn: 0,
            timeout_at: 0,
            output_root,
            approved: true,
        }
    }

    /// The party whose submission is expected next. The challenger moves on
    /// even turns.
    pub fn next_party(&self) -> Party {
        if self.turn % 2 == 0 {
            Party::Challenger
        } else {
            Party::Asserter
        }
    }

    /// Which side of this challenge `addr` is on, if any
    pub fn party_of(&self, addr: &Address) -> Option<Party> {
        if *addr == self.challenger {
            Some(Party::Challenger)
        } else if *addr == self.asserter {
            Some(Party::Asserter)
        } else {
            None
        }
    }

    /// Whether `addr` participates in this challenge
    pub fn is_related(&self, addr: &Address) -> bool {
        self.party_of(addr).is_some()
    }
}
