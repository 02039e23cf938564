//! Trie-backed inclusion-proof verification

use colosseum_core::hashing::keccak256;
use colosseum_core::types::Hash;

use crate::traits::TrieVerifier;

/// Verifies account inclusion against a [`colosseum_trie::SparseTrie`]
/// state root. Leaves store the keccak digest of the account encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeccakTrieVerifier;

impl TrieVerifier for KeccakTrieVerifier {
    fn verify_inclusion_proof(
        &self,
        key: &Hash,
        value: &[u8],
        proof: &[Hash],
        root: &Hash,
    ) -> bool {
        colosseum_trie::verify_inclusion(root, key, &keccak256(value), proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colosseum_trie::SparseTrie;

    #[test]
    fn test_verify_against_trie_root() {
        let account = b"account-encoding".to_vec();
        let key = keccak256(b"account-key");

        let mut trie = SparseTrie::new();
        trie.insert(key, keccak256(&account));
        let root = trie.root();
        let proof = trie.prove(&key).unwrap();

        let verifier = KeccakTrieVerifier;
        assert!(verifier.verify_inclusion_proof(&key, &account, &proof, &root));
        assert!(!verifier.verify_inclusion_proof(&key, b"tampered", &proof, &root));
        assert!(!verifier.verify_inclusion_proof(&key, &account, &proof, &keccak256(b"bad")));
    }
}
