//! Keccak sparse Merkle trie
//!
//! A fixed-depth (256-level) binary trie keyed by 32-byte digests, used to
//! witness account inclusion under a state root. Keys map directly to paths,
//! so proofs are a fixed-length sibling run and verification needs no node
//! decoding.

mod node;
mod proof;
mod trie;

pub use node::{hash_leaf, hash_pair};
pub use proof::verify_inclusion;
pub use trie::SparseTrie;

/// Trie depth: one level per key bit
pub const DEPTH: usize = 256;
