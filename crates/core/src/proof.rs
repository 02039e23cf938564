//! Fault-proof witness bundles

use serde::{Deserialize, Serialize};

use crate::rlp;
use crate::types::{BlockNumber, Hash, Timestamp};

/// Preimage of an output root
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRootProof {
    /// Output-root version selector
    pub version: Hash,
    /// L2 state root at the committed block
    pub state_root: Hash,
    /// Storage root of the L2-to-L1 message passer at the committed block
    pub message_passer_storage_root: Hash,
    /// Hash of the committed block
    pub block_hash: Hash,
    /// Hash of the block following the committed one
    pub next_block_hash: Hash,
}

/// Header fields the ZK public input commits to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInput {
    pub block_hash: Hash,
    pub parent_hash: Hash,
    pub number: BlockNumber,
    pub timestamp: Timestamp,
    pub gas_limit: u64,
    pub base_fee: u64,
    pub transactions_root: Hash,
    pub state_root: Hash,
    pub withdrawals_root: Hash,
    /// Hashes of the block's transactions, padded with the dummy hash up to
    /// the configured maximum when digested
    pub tx_hashes: Vec<Hash>,
}

/// Supplementary header fields, already RLP-encoded by the submitter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderRlps {
    pub uncle_hash: Vec<u8>,
    pub coinbase: Vec<u8>,
    pub receipts_root: Vec<u8>,
    pub logs_bloom: Vec<u8>,
    pub difficulty: Vec<u8>,
    pub gas_used: Vec<u8>,
    pub extra_data: Vec<u8>,
    pub mix_hash: Vec<u8>,
    pub nonce: Vec<u8>,
}

/// Everything `prove_fault` needs besides the ZK proof itself
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInputProof {
    /// Preimage of the committed-valid boundary segment
    pub src_output_root_proof: OutputRootProof,
    /// Preimage of the disputed boundary segment
    pub dst_output_root_proof: OutputRootProof,
    pub public_input: PublicInput,
    pub rlps: BlockHeaderRlps,
    /// Balance of the message passer account under the destination state
    pub l2_to_l1_message_passer_balance: u128,
    /// Code hash of the message passer account
    pub l2_to_l1_message_passer_code_hash: Hash,
    /// Sibling path proving the passer account's inclusion
    pub merkle_proof: Vec<Hash>,
}

impl PublicInputProof {
    /// RLP account leaf for the message passer: nonce 0, the witnessed
    /// balance and code hash, and the destination proof's storage root.
    pub fn passer_account(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        rlp::encode_uint(&mut payload, 0);
        rlp::encode_uint128(&mut payload, self.l2_to_l1_message_passer_balance);
        rlp::encode_hash(
            &mut payload,
            &self.dst_output_root_proof.message_passer_storage_root,
        );
        rlp::encode_hash(&mut payload, &self.l2_to_l1_message_passer_code_hash);
        rlp::wrap_list(&payload)
    }
}
