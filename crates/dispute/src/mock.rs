//! In-memory collaborators
//!
//! Reference implementations of the collaborator traits, backing the
//! simulator and the test suite. They model just enough behavior for the
//! dispute protocol: the oracle stores and replaces outputs, the bond pool
//! doubles on re-challenge, the council records validation requests, and
//! the ZK verifier's verdict is toggleable.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use colosseum_core::types::{Address, BlockNumber, CheckpointOutput, Hash, OutputIndex, Timestamp};

use crate::traits::{BlockClock, BondPool, OutputOracle, SecurityCouncil, ZkVerifier};

/// Output oracle backed by a map
#[derive(Clone, Debug, Default)]
pub struct MemoryOracle {
    interval: u64,
    outputs: BTreeMap<OutputIndex, CheckpointOutput>,
    finalized: BTreeSet<OutputIndex>,
}

impl MemoryOracle {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            outputs: BTreeMap::new(),
            finalized: BTreeSet::new(),
        }
    }

    /// Record a checkpoint output at `index`
    pub fn record(
        &mut self,
        index: OutputIndex,
        output_root: Hash,
        l2_block_number: BlockNumber,
        submitter: Address,
    ) {
        self.outputs.insert(
            index,
            CheckpointOutput {
                output_root,
                l2_block_number,
                timestamp: 0,
                submitter,
            },
        );
    }

    /// Mark the output at `index` finalized
    pub fn finalize(&mut self, index: OutputIndex) {
        self.finalized.insert(index);
    }
}

impl OutputOracle for MemoryOracle {
    fn submission_interval(&self) -> u64 {
        self.interval
    }

    fn is_finalized(&self, index: OutputIndex) -> bool {
        self.finalized.contains(&index)
    }

    fn l2_output(&self, index: OutputIndex) -> Option<CheckpointOutput> {
        self.outputs.get(&index).cloned()
    }

    fn replace_l2_output(&mut self, index: OutputIndex, new_root: Hash, submitter: Address) {
        if let Some(output) = self.outputs.get_mut(&index) {
            output.output_root = new_root;
            output.submitter = submitter;
        }
    }
}

/// Bond pool that doubles the escrow on every repeat bid for an index
#[derive(Clone, Debug)]
pub struct MemoryBondPool {
    min_bond: u128,
    bonds: HashMap<OutputIndex, u128>,
    bidders: HashMap<OutputIndex, Address>,
}

impl MemoryBondPool {
    pub fn new(min_bond: u128) -> Self {
        Self {
            min_bond,
            bonds: HashMap::new(),
            bidders: HashMap::new(),
        }
    }

    /// Escrowed amount for `index`, if any bid was placed
    pub fn bond_of(&self, index: OutputIndex) -> Option<u128> {
        self.bonds.get(&index).copied()
    }

    /// Last bidder for `index`
    pub fn bidder_of(&self, index: OutputIndex) -> Option<Address> {
        self.bidders.get(&index).copied()
    }
}

impl BondPool for MemoryBondPool {
    fn increase_bond(&mut self, bidder: Address, index: OutputIndex) {
        let bond = self
            .bonds
            .get(&index)
            .map(|amount| amount * 2)
            .unwrap_or(self.min_bond);
        self.bonds.insert(index, bond);
        self.bidders.insert(index, bidder);
    }
}

/// A validation request scheduled with the council
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRequest {
    pub output_root: Hash,
    pub l2_block_number: BlockNumber,
    pub output_index: OutputIndex,
}

/// Council that records requests for the host to act on later. The queued
/// callback model keeps approval outside the proving transaction.
#[derive(Clone, Debug, Default)]
pub struct RecordingCouncil {
    pub requests: Vec<ValidationRequest>,
}

impl SecurityCouncil for RecordingCouncil {
    fn request_validation(
        &mut self,
        output_root: Hash,
        l2_block_number: BlockNumber,
        index: OutputIndex,
    ) {
        self.requests.push(ValidationRequest {
            output_root,
            l2_block_number,
            output_index: index,
        });
    }
}

/// ZK verifier with a fixed, toggleable verdict
#[derive(Clone, Debug)]
pub struct StaticZkVerifier {
    accept: Cell<bool>,
    calls: Cell<usize>,
}

impl StaticZkVerifier {
    pub fn accepting() -> Self {
        Self {
            accept: Cell::new(true),
            calls: Cell::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: Cell::new(false),
            calls: Cell::new(0),
        }
    }

    pub fn set_accept(&self, accept: bool) {
        self.accept.set(accept);
    }

    /// How many proofs were submitted for verification
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ZkVerifier for StaticZkVerifier {
    fn verify(&self, _proof: &[u8], _pair: &[u8], _public_input_hash: &Hash) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.accept.get()
    }
}

/// Hand-driven clock; clones share the same instant
#[derive(Clone, Debug)]
pub struct ManualClock(Rc<Cell<Timestamp>>);

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self(Rc::new(Cell::new(now)))
    }

    pub fn advance(&self, seconds: u64) {
        self.0.set(self.0.get() + seconds);
    }

    pub fn set(&self, now: Timestamp) {
        self.0.set(now);
    }
}

impl BlockClock for ManualClock {
    fn now(&self) -> Timestamp {
        self.0.get()
    }
}
