//! Inclusion-proof verification

use crate::node::{hash_leaf, hash_pair, key_bit};
use crate::DEPTH;

/// Verifies that `value` sits at `key` under `root`.
///
/// `siblings` is the fixed-length run produced by [`crate::SparseTrie::prove`],
/// ordered from the leaf's neighbor upward.
pub fn verify_inclusion(
    root: &[u8; 32],
    key: &[u8; 32],
    value: &[u8; 32],
    siblings: &[[u8; 32]],
) -> bool {
    if siblings.len() != DEPTH {
        return false;
    }
    let mut acc = hash_leaf(key, value);
    for (i, sibling) in siblings.iter().enumerate() {
        let depth = DEPTH - 1 - i;
        acc = if key_bit(key, depth) {
            hash_pair(sibling, &acc)
        } else {
            hash_pair(&acc, sibling)
        };
    }
    acc == *root
}
