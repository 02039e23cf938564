//! Collaborator interfaces
//!
//! The coordinator reaches every external system through one of these
//! narrow traits, injected at construction. Production hosts wire them to
//! the real oracle and verifier backends; tests and the simulator use the
//! in-memory versions from [`crate::mock`].

use colosseum_core::types::{Address, BlockNumber, CheckpointOutput, Hash, OutputIndex, Timestamp};

/// The checkpoint-output oracle
pub trait OutputOracle {
    /// L2 blocks covered by one checkpoint output
    fn submission_interval(&self) -> u64;
    /// Whether the output has passed its finalization window
    fn is_finalized(&self, index: OutputIndex) -> bool;
    /// The recorded output, if one exists at `index`
    fn l2_output(&self, index: OutputIndex) -> Option<CheckpointOutput>;
    /// Replace a faulty output with the proven root, crediting `submitter`
    fn replace_l2_output(&mut self, index: OutputIndex, new_root: Hash, submitter: Address);
}

/// Validator bond escrow
pub trait BondPool {
    /// Escrow a bond for `bidder` on `index`. Repeat calls for the same
    /// index double the required amount.
    fn increase_bond(&mut self, bidder: Address, index: OutputIndex);
}

/// The security-council multisig
pub trait SecurityCouncil {
    /// Schedule a council vote on a proven output. On success the council
    /// invokes `approve_challenge` for `index` from its own address.
    fn request_validation(&mut self, output_root: Hash, l2_block_number: BlockNumber, index: OutputIndex);
}

/// Opaque zero-knowledge proof verifier
pub trait ZkVerifier {
    fn verify(&self, proof: &[u8], pair: &[u8], public_input_hash: &Hash) -> bool;
}

/// Merkle-trie inclusion-proof verifier
pub trait TrieVerifier {
    fn verify_inclusion_proof(
        &self,
        key: &Hash,
        value: &[u8],
        proof: &[Hash],
        root: &Hash,
    ) -> bool;
}

/// Authoritative block-time source, read once per operation
pub trait BlockClock {
    fn now(&self) -> Timestamp;
}
