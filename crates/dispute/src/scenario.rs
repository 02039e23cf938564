//! Canned dispute worlds
//!
//! Builds a coordinator over the in-memory collaborators together with a
//! fully consistent fault witness: a passer account sitting in a real trie
//! under the source state root, a header whose reassembled hash links the
//! boundary proofs, and a bisection script that steers the dispute onto
//! that witness. The simulator and the scenario tests both drive disputes
//! through this module.

use colosseum_core::hashing;
use colosseum_core::rlp;
use colosseum_core::types::{Address, Hash, OutputIndex, ZERO_HASH};
use colosseum_core::{
    BlockHeaderRlps, OutputRootProof, PublicInput, PublicInputProof, L2_TO_L1_MESSAGE_PASSER,
};
use colosseum_trie::SparseTrie;

use crate::colosseum::Colosseum;
use crate::config::Config;
use crate::error::{ChallengeError, ConfigError};
use crate::mock::{ManualClock, MemoryBondPool, MemoryOracle, RecordingCouncil, StaticZkVerifier};
use crate::traits::OutputOracle;
use crate::verifier::KeccakTrieVerifier;

/// Coordinator instantiated over the in-memory collaborators
pub type SimColosseum = Colosseum<
    MemoryOracle,
    MemoryBondPool,
    RecordingCouncil,
    StaticZkVerifier,
    KeccakTrieVerifier,
    ManualClock,
>;

pub const ASSERTER: Address = [0xaa; 20];
pub const CHALLENGER: Address = [0xbb; 20];
pub const COUNCIL: Address = [0xcc; 20];
pub const MIN_BOND: u128 = 1;

/// Position of the proven segment pair within the final-turn segments
pub const PROOF_POS: u32 = 1;

/// Deterministic fixture digest
pub fn label(s: &str) -> Hash {
    hashing::keccak256(s.as_bytes())
}

/// A dispute world: the coordinator, a shared clock handle, and a valid
/// fault witness for the disputed outputs
pub struct Scenario {
    pub colosseum: SimColosseum,
    pub clock: ManualClock,
    /// The primary disputed output
    pub output_index: OutputIndex,
    /// Root the challenger proves should replace the faulty one
    pub replacement_root: Hash,
    pub proof: PublicInputProof,
    pub zk_proof: Vec<u8>,
    pub pair: Vec<u8>,
    /// Digest of the source output-root preimage
    pub src_hash: Hash,
    /// Digest of the destination output-root preimage
    pub dst_hash: Hash,
}

impl Scenario {
    /// Build the devnet world: five recorded outputs (index 3 and 4 faulty),
    /// an accepting ZK verifier, and the clock at t=1000.
    pub fn bootstrap() -> Result<Self, ConfigError> {
        let config = Config {
            security_council: COUNCIL,
            ..Config::default()
        };
        let clock = ManualClock::new(1_000);

        let dst_state_root = label("dst-state-root");
        let passer_storage_root = label("passer-storage-root");

        let rlps = header_rlps();
        let mut public_input = PublicInput {
            block_hash: ZERO_HASH,
            parent_hash: label("src-block-hash"),
            number: 14,
            timestamp: 1_028,
            gas_limit: 30_000_000,
            base_fee: 1_000_000_000,
            transactions_root: label("transactions-root"),
            state_root: dst_state_root,
            withdrawals_root: label("withdrawals-root"),
            tx_hashes: vec![label("tx-0"), label("tx-1")],
        };
        // The header digest is the destination block's hash; it does not
        // cover the block_hash field itself.
        let next_block_hash = hashing::hash_block_header(&public_input, &rlps);
        public_input.block_hash = next_block_hash;

        let mut proof = PublicInputProof {
            src_output_root_proof: OutputRootProof {
                version: ZERO_HASH,
                // Patched below once the trie root is known.
                state_root: ZERO_HASH,
                message_passer_storage_root: label("src-passer-storage-root"),
                block_hash: label("src-block-hash"),
                next_block_hash,
            },
            dst_output_root_proof: OutputRootProof {
                version: ZERO_HASH,
                state_root: dst_state_root,
                message_passer_storage_root: passer_storage_root,
                block_hash: next_block_hash,
                next_block_hash: label("dst-next-block-hash"),
            },
            public_input,
            rlps,
            l2_to_l1_message_passer_balance: 0,
            l2_to_l1_message_passer_code_hash: label("passer-code-hash"),
            merkle_proof: Vec::new(),
        };

        let key = hashing::keccak256(&L2_TO_L1_MESSAGE_PASSER);
        let mut trie = SparseTrie::new();
        trie.insert(key, hashing::keccak256(&proof.passer_account()));
        proof.src_output_root_proof.state_root = trie.root();
        proof.merkle_proof = trie.prove(&key).expect("passer leaf was just inserted");

        let src_hash = hashing::hash_output_root_proof(&proof.src_output_root_proof);
        let dst_hash = hashing::hash_output_root_proof(&proof.dst_output_root_proof);

        let mut oracle = MemoryOracle::new(config.submission_interval);
        oracle.record(0, label("output-0"), 0, ASSERTER);
        oracle.record(1, label("output-1"), 6, ASSERTER);
        oracle.record(2, label("output-2"), 12, ASSERTER);
        oracle.record(3, label("faulty-output-3"), 18, ASSERTER);
        oracle.record(4, label("faulty-output-4"), 24, ASSERTER);

        let colosseum = Colosseum::new(
            config,
            oracle,
            MemoryBondPool::new(MIN_BOND),
            RecordingCouncil::default(),
            StaticZkVerifier::accepting(),
            KeccakTrieVerifier,
            clock.clone(),
        )?;

        Ok(Self {
            colosseum,
            clock,
            output_index: 3,
            replacement_root: label("replacement-root"),
            proof,
            zk_proof: vec![0u8; 256],
            pair: vec![0u8; 64],
            src_hash,
            dst_hash,
        })
    }

    /// The challenger's turn-1 segments for the output at `index`
    pub fn opening_segments(&self, index: OutputIndex) -> Vec<Hash> {
        vec![self.committed_root(index), label("opening-tail")]
    }

    /// Scripted `(caller, position, segments)` bisections that collapse the
    /// dispute at `index` onto the fault witness: the final turn carries the
    /// source digest at position [`PROOF_POS`].
    pub fn bisection_script(&self, index: OutputIndex) -> Vec<(Address, u32, Vec<Hash>)> {
        let root = self.committed_root(index);
        vec![
            (ASSERTER, 0, vec![root, label("turn2-tail")]),
            (
                CHALLENGER,
                0,
                vec![root, label("turn3-mid"), label("turn3-tail")],
            ),
            (
                ASSERTER,
                0,
                vec![root, self.src_hash, label("turn4-gap"), label("turn4-tail")],
            ),
        ]
    }

    /// Open the dispute at `index` with the scripted opening segments
    pub fn open(&mut self, index: OutputIndex) -> Result<(), ChallengeError> {
        let segments = self.opening_segments(index);
        self.colosseum.create_challenge(CHALLENGER, index, segments)
    }

    /// Run the scripted bisections at `index` to collapse
    pub fn run_bisections(&mut self, index: OutputIndex) -> Result<(), ChallengeError> {
        for (caller, pos, segments) in self.bisection_script(index) {
            self.colosseum.bisect(caller, index, pos, segments)?;
        }
        Ok(())
    }

    /// Submit the fault proof for `index`
    pub fn prove(&mut self, index: OutputIndex) -> Result<(), ChallengeError> {
        self.colosseum.prove_fault(
            CHALLENGER,
            index,
            self.replacement_root,
            PROOF_POS,
            &self.proof,
            &self.zk_proof,
            &self.pair,
        )
    }

    fn committed_root(&self, index: OutputIndex) -> Hash {
        self.colosseum
            .oracle()
            .l2_output(index)
            .map(|output| output.output_root)
            .unwrap_or(ZERO_HASH)
    }
}

fn header_rlps() -> BlockHeaderRlps {
    let mut uncle_hash = Vec::new();
    rlp::encode_hash(&mut uncle_hash, &label("uncle-hash"));
    let mut coinbase = Vec::new();
    rlp::encode_bytes(&mut coinbase, &[0u8; 20]);
    let mut receipts_root = Vec::new();
    rlp::encode_hash(&mut receipts_root, &label("receipts-root"));
    let mut logs_bloom = Vec::new();
    rlp::encode_bytes(&mut logs_bloom, &[0u8; 256]);
    let mut gas_used = Vec::new();
    rlp::encode_uint(&mut gas_used, 42_000);
    let mut mix_hash = Vec::new();
    rlp::encode_hash(&mut mix_hash, &label("mix-hash"));
    let mut nonce = Vec::new();
    rlp::encode_bytes(&mut nonce, &[0u8; 8]);
    BlockHeaderRlps {
        uncle_hash,
        coinbase,
        receipts_root,
        logs_bloom,
        difficulty: vec![0x80],
        gas_used,
        extra_data: vec![0x80],
        mix_hash,
        nonce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colosseum_core::ChallengeStatus;

    #[test]
    fn test_bootstrap_world_is_consistent() {
        let scenario = Scenario::bootstrap().unwrap();
        // The witness anchors: header digest links the boundary proofs.
        assert_eq!(
            hashing::hash_block_header(&scenario.proof.public_input, &scenario.proof.rlps),
            scenario.proof.src_output_root_proof.next_block_hash,
        );
        assert_eq!(
            scenario.proof.src_output_root_proof.next_block_hash,
            scenario.proof.dst_output_root_proof.block_hash,
        );
        assert_eq!(scenario.colosseum.get_status(3), ChallengeStatus::None);
    }

    #[test]
    fn test_script_satisfies_anchoring() {
        let mut scenario = Scenario::bootstrap().unwrap();
        let index = scenario.output_index;
        scenario.open(index).unwrap();
        scenario.run_bisections(index).unwrap();
        assert_eq!(
            scenario.colosseum.get_status(index),
            ChallengeStatus::ReadyToProve
        );
    }
}
