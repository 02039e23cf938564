//! Keccak digests over protocol structures

use tiny_keccak::{Hasher, Keccak};

use crate::proof::{BlockHeaderRlps, OutputRootProof, PublicInput};
use crate::rlp;
use crate::types::Hash;

/// Compute keccak256 of a byte slice
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Digest of an output-root preimage
pub fn hash_output_root_proof(proof: &OutputRootProof) -> Hash {
    let mut hasher = Keccak::v256();
    hasher.update(&proof.version);
    hasher.update(&proof.state_root);
    hasher.update(&proof.message_passer_storage_root);
    hasher.update(&proof.block_hash);
    hasher.update(&proof.next_block_hash);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Reassembles the block header from the public-input fields plus the
/// pre-encoded slices and hashes it. The result must match the hash of the
/// block following the committed-valid boundary.
pub fn hash_block_header(public_input: &PublicInput, rlps: &BlockHeaderRlps) -> Hash {
    let mut payload = Vec::with_capacity(640);
    rlp::encode_hash(&mut payload, &public_input.parent_hash);
    payload.extend_from_slice(&rlps.uncle_hash);
    payload.extend_from_slice(&rlps.coinbase);
    rlp::encode_hash(&mut payload, &public_input.state_root);
    rlp::encode_hash(&mut payload, &public_input.transactions_root);
    payload.extend_from_slice(&rlps.receipts_root);
    payload.extend_from_slice(&rlps.logs_bloom);
    payload.extend_from_slice(&rlps.difficulty);
    rlp::encode_uint(&mut payload, public_input.number);
    rlp::encode_uint(&mut payload, public_input.gas_limit);
    payload.extend_from_slice(&rlps.gas_used);
    rlp::encode_uint(&mut payload, public_input.timestamp);
    payload.extend_from_slice(&rlps.extra_data);
    payload.extend_from_slice(&rlps.mix_hash);
    payload.extend_from_slice(&rlps.nonce);
    rlp::encode_uint(&mut payload, public_input.base_fee);
    rlp::encode_hash(&mut payload, &public_input.withdrawals_root);
    keccak256(&rlp::wrap_list(&payload))
}

/// Digest fed to the ZK verifier. Commits to the source state root, the
/// scalar header fields, and the transaction hashes padded with
/// `dummy_hashes`. The transactions root itself is deliberately left out of
/// the commitment.
pub fn hash_public_input(
    prev_state_root: &Hash,
    public_input: &PublicInput,
    dummy_hashes: &[Hash],
) -> Hash {
    let mut hasher = Keccak::v256();
    hasher.update(prev_state_root);
    hasher.update(&public_input.state_root);
    hasher.update(&public_input.withdrawals_root);
    hasher.update(&public_input.block_hash);
    hasher.update(&public_input.parent_hash);
    hasher.update(&public_input.number.to_be_bytes());
    hasher.update(&public_input.timestamp.to_be_bytes());
    hasher.update(&public_input.base_fee.to_be_bytes());
    hasher.update(&public_input.gas_limit.to_be_bytes());
    for tx_hash in &public_input.tx_hashes {
        hasher.update(tx_hash);
    }
    for dummy in dummy_hashes {
        hasher.update(dummy);
    }
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Padding hashes standing in for absent transactions
pub fn generate_dummy_hashes(dummy_hash: &Hash, n: usize) -> Vec<Hash> {
    vec![*dummy_hash; n]
}
