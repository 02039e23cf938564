//! Trie construction and proof generation

use std::collections::BTreeMap;

use crate::node::{default_hashes, hash_leaf, hash_pair, key_bit};
use crate::DEPTH;

/// In-memory sparse Merkle trie.
///
/// Leaves are kept sorted by key; node digests are derived on demand by
/// recursing over the key-ordered slice, so only populated branches are ever
/// visited.
#[derive(Clone, Debug)]
pub struct SparseTrie {
    leaves: BTreeMap<[u8; 32], [u8; 32]>,
    defaults: Vec<[u8; 32]>,
}

impl SparseTrie {
    pub fn new() -> Self {
        Self {
            leaves: BTreeMap::new(),
            defaults: default_hashes(),
        }
    }

    /// Insert or replace a leaf
    pub fn insert(&mut self, key: [u8; 32], value: [u8; 32]) {
        self.leaves.insert(key, value);
    }

    /// Value stored at `key`, if any
    pub fn get(&self, key: &[u8; 32]) -> Option<[u8; 32]> {
        self.leaves.get(key).copied()
    }

    /// Root digest over all leaves
    pub fn root(&self) -> [u8; 32] {
        let entries: Vec<(&[u8; 32], &[u8; 32])> = self.leaves.iter().collect();
        self.subtree(0, &entries)
    }

    /// Sibling run for `key`, ordered from the leaf's neighbor up to the
    /// root's child. Returns `None` for absent keys.
    pub fn prove(&self, key: &[u8; 32]) -> Option<Vec<[u8; 32]>> {
        self.leaves.get(key)?;
        let mut entries: Vec<(&[u8; 32], &[u8; 32])> = self.leaves.iter().collect();
        let mut siblings = Vec::with_capacity(DEPTH);
        for depth in 0..DEPTH {
            let split = entries.partition_point(|(k, _)| !key_bit(k, depth));
            let (zeros, ones) = entries.split_at(split);
            let (taken, sibling) = if key_bit(key, depth) {
                (ones, zeros)
            } else {
                (zeros, ones)
            };
            siblings.push(self.subtree(depth + 1, sibling));
            entries = taken.to_vec();
        }
        siblings.reverse();
        Some(siblings)
    }

    fn subtree(&self, depth: usize, entries: &[(&[u8; 32], &[u8; 32])]) -> [u8; 32] {
        if entries.is_empty() {
            return self.defaults[depth];
        }
        if depth == DEPTH {
            // Keys are unique, so a populated leaf slot holds exactly one entry.
            let (key, value) = entries[0];
            return hash_leaf(key, value);
        }
        let split = entries.partition_point(|(k, _)| !key_bit(k, depth));
        let left = self.subtree(depth + 1, &entries[..split]);
        let right = self.subtree(depth + 1, &entries[split..]);
        hash_pair(&left, &right)
    }
}

impl Default for SparseTrie {
    fn default() -> Self {
        Self::new()
    }
}
