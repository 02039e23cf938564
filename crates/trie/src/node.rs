//! Node hashing and per-depth empty-subtree digests

use tiny_keccak::{Hasher, Keccak};

use crate::DEPTH;

const LEAF_TAG: u8 = 0x00;
const BRANCH_TAG: u8 = 0x01;

/// Digest of a leaf node
pub fn hash_leaf(key: &[u8; 32], value: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(&[LEAF_TAG]);
    hasher.update(key);
    hasher.update(value);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Digest of a branch node
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(&[BRANCH_TAG]);
    hasher.update(left);
    hasher.update(right);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Bit of `key` selecting the child at `depth` (most significant bit first)
pub fn key_bit(key: &[u8; 32], depth: usize) -> bool {
    (key[depth / 8] >> (7 - depth % 8)) & 1 == 1
}

/// Empty-subtree digest for every depth, index 0 being the empty root.
/// The empty leaf slot is keccak256 of the empty string.
pub fn default_hashes() -> Vec<[u8; 32]> {
    let mut defaults = vec![[0u8; 32]; DEPTH + 1];
    let mut hasher = Keccak::v256();
    let mut empty = [0u8; 32];
    hasher.update(&[]);
    hasher.finalize(&mut empty);
    defaults[DEPTH] = empty;
    for depth in (0..DEPTH).rev() {
        let child = defaults[depth + 1];
        defaults[depth] = hash_pair(&child, &child);
    }
    defaults
}
