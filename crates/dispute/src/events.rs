//! Emitted event records

use serde::{Deserialize, Serialize};

use colosseum_core::types::{Address, Hash, OutputIndex, Timestamp};

/// Observable protocol events, recorded in order by the coordinator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ChallengeCreated {
        output_index: OutputIndex,
        asserter: Address,
        challenger: Address,
        timeout_at: Timestamp,
    },
    Bisected {
        output_index: OutputIndex,
        turn: u32,
        timeout_at: Timestamp,
    },
    Proven {
        output_index: OutputIndex,
        output_root: Hash,
        public_input_hash: Hash,
    },
    Approved {
        output_index: OutputIndex,
        output_root: Hash,
    },
    Deleted {
        output_index: OutputIndex,
    },
}
