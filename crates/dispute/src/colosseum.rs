//! Challenge coordinator
//!
//! One serialized, transactional entry point per protocol operation. Every
//! operation reads the clock once, validates before mutating, and either
//! commits all of its effects or rejects with a [`ChallengeError`] and
//! leaves state untouched.

use std::collections::{HashMap, HashSet};

use tracing::info;

use colosseum_core::types::{Address, Hash, OutputIndex, ZERO_HASH};
use colosseum_core::{hashing, segments, status};
use colosseum_core::{Challenge, ChallengeStatus, PublicInputProof, L2_TO_L1_MESSAGE_PASSER};

use crate::config::Config;
use crate::error::{ChallengeError, ConfigError};
use crate::events::Event;
use crate::traits::{BlockClock, BondPool, OutputOracle, SecurityCouncil, TrieVerifier, ZkVerifier};

/// The dispute coordinator.
///
/// Owns the challenge records and the replay-defense set; reaches every
/// external system through the injected collaborators. Hosts with
/// concurrent callers must serialize access (a mutex around the whole
/// coordinator preserves the transactional model).
pub struct Colosseum<O, P, C, Z, T, K> {
    config: Config,
    oracle: O,
    bond_pool: P,
    council: C,
    zk_verifier: Z,
    trie_verifier: T,
    clock: K,
    challenges: HashMap<OutputIndex, Challenge>,
    verified_public_inputs: HashSet<Hash>,
    events: Vec<Event>,
}

impl<O, P, C, Z, T, K> Colosseum<O, P, C, Z, T, K>
where
    O: OutputOracle,
    P: BondPool,
    C: SecurityCouncil,
    Z: ZkVerifier,
    T: TrieVerifier,
    K: BlockClock,
{
    /// Build a coordinator over the given collaborators.
    ///
    /// Fails if the segments-lengths vector violates the partition law or
    /// the configured submission interval disagrees with the oracle's.
    pub fn new(
        config: Config,
        oracle: O,
        bond_pool: P,
        council: C,
        zk_verifier: Z,
        trie_verifier: T,
        clock: K,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.submission_interval != oracle.submission_interval() {
            return Err(ConfigError::IntervalMismatch {
                configured: config.submission_interval,
                oracle: oracle.submission_interval(),
            });
        }
        Ok(Self {
            config,
            oracle,
            bond_pool,
            council,
            zk_verifier,
            trie_verifier,
            clock,
            challenges: HashMap::new(),
            verified_public_inputs: HashSet::new(),
            events: Vec::new(),
        })
    }

    /// Open a dispute against the output at `index` with the challenger's
    /// turn-1 segments.
    pub fn create_challenge(
        &mut self,
        caller: Address,
        index: OutputIndex,
        segments: Vec<Hash>,
    ) -> Result<(), ChallengeError> {
        let now = self.clock.now();
        if index == 0 {
            return Err(ChallengeError::InvalidIndex {
                index,
                reason: "the genesis output cannot be challenged",
            });
        }
        if self.oracle.is_finalized(index) {
            return Err(ChallengeError::OutputFinalized(index));
        }
        if let Some(existing) = self.challenges.get(&index) {
            let existing_status = eval_status(&self.config, existing, now);
            if status::is_in_progress(existing_status) {
                return Err(ChallengeError::AlreadyActive(index));
            }
        }
        let target = self
            .oracle
            .l2_output(index)
            .ok_or(ChallengeError::InvalidIndex {
                index,
                reason: "no output recorded at this index",
            })?;
        if caller == target.submitter {
            return Err(ChallengeError::InvalidIndex {
                index,
                reason: "the output's own submitter cannot challenge it",
            });
        }
        // The opening submission anchors both ends against the disputed
        // output's root: the first segment must reproduce it and the last
        // must contradict it.
        validate_segments(
            &self.config,
            1,
            &target.output_root,
            &target.output_root,
            &segments,
        )?;

        // Doubles the escrow when the slot was previously forfeited.
        self.bond_pool.increase_bond(caller, index);

        let seg_start = target.l2_block_number - self.config.submission_interval;
        let timeout_at = now + self.config.bisection_timeout;
        let challenge = Challenge::opened(
            target.submitter,
            caller,
            segments,
            seg_start,
            self.config.submission_interval,
            timeout_at,
        );
        info!(
            "challenge created: output {} asserter 0x{} challenger 0x{}",
            index,
            hex::encode(&challenge.asserter[..4]),
            hex::encode(&challenge.challenger[..4]),
        );
        self.challenges.insert(index, challenge);
        self.events.push(Event::ChallengeCreated {
            output_index: index,
            asserter: target.submitter,
            challenger: caller,
            timeout_at,
        });
        Ok(())
    }

    /// Answer the opponent's segments by splitting the sub-range at `pos`
    /// into a finer partition.
    pub fn bisect(
        &mut self,
        caller: Address,
        index: OutputIndex,
        pos: u32,
        segments: Vec<Hash>,
    ) -> Result<(), ChallengeError> {
        let now = self.clock.now();
        if self.oracle.is_finalized(index) {
            return Err(ChallengeError::OutputFinalized(index));
        }
        let challenge = self.load(index)?;
        let current_status = eval_status(&self.config, challenge, now);
        if !matches!(
            current_status,
            ChallengeStatus::AsserterTurn | ChallengeStatus::ChallengerTurn
        ) {
            return Err(ChallengeError::WrongTurn {
                status: current_status,
            });
        }
        if challenge.party_of(&caller) != status::expected_party(current_status) {
            return Err(ChallengeError::WrongTurn {
                status: current_status,
            });
        }
        if pos as usize + 1 >= challenge.segments.len() {
            return Err(ChallengeError::BadSegments("position out of range"));
        }
        let next_turn = challenge.turn + 1;
        validate_segments(
            &self.config,
            next_turn,
            &challenge.segments[pos as usize],
            &challenge.segments[pos as usize + 1],
            &segments,
        )?;
        let (seg_start, seg_size) = segments::sub_range(
            &self.config.segments_lengths,
            challenge.turn,
            challenge.seg_start,
            challenge.seg_size,
            pos,
        )
        .ok_or(ChallengeError::BadSegments(
            "turn outside the bisection schedule",
        ))?;

        let able = segments::is_able_to_bisect(&self.config.segments_lengths, next_turn, seg_size);
        let timeout_at = now + self.config.timeout_for(able);

        let challenge = self
            .challenges
            .get_mut(&index)
            .ok_or(ChallengeError::WrongTurn {
                status: ChallengeStatus::None,
            })?;
        challenge.segments = segments;
        challenge.seg_start = seg_start;
        challenge.seg_size = seg_size;
        challenge.turn = next_turn;
        challenge.timeout_at = timeout_at;
        info!(
            "bisected: output {} turn {} span {}..{}",
            index,
            next_turn,
            seg_start,
            seg_start + seg_size
        );
        self.events.push(Event::Bisected {
            output_index: index,
            turn: next_turn,
            timeout_at,
        });
        Ok(())
    }

    /// Submit the fault proof for the isolated block and, on success, route
    /// the replacement root to the security council for approval.
    #[allow(clippy::too_many_arguments)]
    pub fn prove_fault(
        &mut self,
        caller: Address,
        index: OutputIndex,
        output_root: Hash,
        pos: u32,
        proof: &PublicInputProof,
        zk_proof: &[u8],
        pair: &[u8],
    ) -> Result<(), ChallengeError> {
        let now = self.clock.now();
        let challenge = self.load(index)?;
        let current_status = eval_status(&self.config, challenge, now);
        if !matches!(
            current_status,
            ChallengeStatus::ReadyToProve | ChallengeStatus::AsserterTimeout
        ) {
            return Err(ChallengeError::WrongTurn {
                status: current_status,
            });
        }
        if caller != challenge.challenger {
            return Err(ChallengeError::WrongTurn {
                status: current_status,
            });
        }
        if output_root == ZERO_HASH {
            return Err(ChallengeError::ProofRejected(
                "replacement output root is empty",
            ));
        }

        let src = &proof.src_output_root_proof;
        let dst = &proof.dst_output_root_proof;

        // Anchoring only applies once the dispute has collapsed to a single
        // block. Under an asserter timeout the bisection may not have
        // finished; the asserter's default waives the requirement.
        let collapsed = !segments::is_able_to_bisect(
            &self.config.segments_lengths,
            challenge.turn,
            challenge.seg_size,
        );
        if collapsed {
            if pos as usize + 1 >= challenge.segments.len() {
                return Err(ChallengeError::BadSegments("position out of range"));
            }
            if hashing::hash_output_root_proof(src) != challenge.segments[pos as usize] {
                return Err(ChallengeError::BadSegments(
                    "source proof does not match the agreed segment",
                ));
            }
            if hashing::hash_output_root_proof(dst) == challenge.segments[pos as usize + 1] {
                return Err(ChallengeError::BadSegments(
                    "destination proof repeats the disputed segment",
                ));
            }
        }

        if src.next_block_hash != dst.block_hash {
            return Err(ChallengeError::ProofRejected(
                "source and destination blocks are not linked",
            ));
        }
        if proof.public_input.state_root != dst.state_root {
            return Err(ChallengeError::ProofRejected(
                "public input state root mismatch",
            ));
        }
        if hashing::hash_block_header(&proof.public_input, &proof.rlps) != src.next_block_hash {
            return Err(ChallengeError::ProofRejected(
                "reassembled header does not hash to the next block",
            ));
        }

        // The withdrawal passer account must sit under the source state root
        // with the destination proof's storage root.
        let account = proof.passer_account();
        let key = hashing::keccak256(&L2_TO_L1_MESSAGE_PASSER);
        if !self.trie_verifier.verify_inclusion_proof(
            &key,
            &account,
            &proof.merkle_proof,
            &src.state_root,
        ) {
            return Err(ChallengeError::ProofRejected(
                "withdrawal storage inclusion proof failed",
            ));
        }

        if proof.public_input.tx_hashes.len() > self.config.max_txs {
            return Err(ChallengeError::ProofRejected(
                "public input carries too many transactions",
            ));
        }
        let dummy_hashes = hashing::generate_dummy_hashes(
            &self.config.dummy_hash,
            self.config.max_txs - proof.public_input.tx_hashes.len(),
        );
        let public_input_hash =
            hashing::hash_public_input(&src.state_root, &proof.public_input, &dummy_hashes);

        if self.verified_public_inputs.contains(&public_input_hash) {
            return Err(ChallengeError::Replay);
        }
        if !self.zk_verifier.verify(zk_proof, pair, &public_input_hash) {
            return Err(ChallengeError::ProofRejected("zk verifier rejected"));
        }

        let l2_block_number = self
            .oracle
            .l2_output(index)
            .map(|output| output.l2_block_number)
            .ok_or(ChallengeError::InvalidIndex {
                index,
                reason: "no output recorded at this index",
            })?;

        self.verified_public_inputs.insert(public_input_hash);
        let challenge = self
            .challenges
            .get_mut(&index)
            .ok_or(ChallengeError::WrongTurn {
                status: ChallengeStatus::None,
            })?;
        challenge.output_root = output_root;
        info!(
            "fault proven: output {} new root 0x{} public input 0x{}",
            index,
            hex::encode(&output_root[..4]),
            hex::encode(&public_input_hash[..4]),
        );
        self.council
            .request_validation(output_root, l2_block_number, index);
        self.events.push(Event::Proven {
            output_index: index,
            output_root,
            public_input_hash,
        });
        Ok(())
    }

    /// Close a challenge whose challenger has forfeited. Any caller may
    /// trigger it; the transition is forced and the outcome is not
    /// caller-controlled.
    pub fn challenger_timeout(
        &mut self,
        _caller: Address,
        index: OutputIndex,
    ) -> Result<(), ChallengeError> {
        let now = self.clock.now();
        let challenge = self.load(index)?;
        let current_status = eval_status(&self.config, challenge, now);
        if current_status != ChallengeStatus::ChallengerTimeout {
            return Err(ChallengeError::WrongTurn {
                status: current_status,
            });
        }
        self.challenges.remove(&index);
        info!("challenge deleted after challenger timeout: output {index}");
        self.events.push(Event::Deleted {
            output_index: index,
        });
        Ok(())
    }

    /// Council-only: replace the faulty output with the proven root and
    /// tombstone the slot against future challenges.
    pub fn approve_challenge(
        &mut self,
        caller: Address,
        index: OutputIndex,
    ) -> Result<(), ChallengeError> {
        let now = self.clock.now();
        if caller != self.config.security_council {
            return Err(ChallengeError::NotCouncil);
        }
        let challenge = self
            .challenges
            .get(&index)
            .ok_or(ChallengeError::NotProven)?;
        if eval_status(&self.config, challenge, now) != ChallengeStatus::Proven {
            return Err(ChallengeError::NotProven);
        }
        let output_root = challenge.output_root;
        let challenger = challenge.challenger;

        self.oracle.replace_l2_output(index, output_root, challenger);
        if let Some(entry) = self.challenges.get_mut(&index) {
            *entry = Challenge::tombstone(output_root);
        }
        info!(
            "challenge approved: output {} replaced with 0x{}",
            index,
            hex::encode(&output_root[..4]),
        );
        self.events.push(Event::Approved {
            output_index: index,
            output_root,
        });
        Ok(())
    }

    // --- queries ---

    /// The raw challenge record at `index`, if any
    pub fn get_challenge(&self, index: OutputIndex) -> Option<&Challenge> {
        self.challenges.get(&index)
    }

    /// Status of the slot at `index` at the current block time
    pub fn get_status(&self, index: OutputIndex) -> ChallengeStatus {
        let now = self.clock.now();
        match self.challenges.get(&index) {
            Some(challenge) => eval_status(&self.config, challenge, now),
            None => ChallengeStatus::None,
        }
    }

    /// Required segment count at `turn`
    pub fn get_segments_length(&self, turn: u32) -> Option<u32> {
        segments::required_len(&self.config.segments_lengths, turn)
    }

    /// Whether the challenge at `index` can still split its span
    pub fn is_able_to_bisect(&self, index: OutputIndex) -> bool {
        self.challenges.get(&index).is_some_and(|challenge| {
            segments::is_able_to_bisect(
                &self.config.segments_lengths,
                challenge.turn,
                challenge.seg_size,
            )
        })
    }

    /// Whether the slot at `index` is occupied (reusable timeout slots and
    /// empty slots are not)
    pub fn is_in_progress(&self, index: OutputIndex) -> bool {
        status::is_in_progress(self.get_status(index))
    }

    /// Whether `addr` is a party to the challenge at `index`
    pub fn is_challenge_related(&self, index: OutputIndex, addr: Address) -> bool {
        self.challenges
            .get(&index)
            .is_some_and(|challenge| challenge.is_related(&addr))
    }

    /// Events recorded so far, in emission order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the recorded events
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Oracle state evolves outside the dispute protocol (new outputs,
    /// finalization); hosts apply those updates between operations.
    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn bond_pool(&self) -> &P {
        &self.bond_pool
    }

    pub fn council(&self) -> &C {
        &self.council
    }

    pub fn zk_verifier(&self) -> &Z {
        &self.zk_verifier
    }

    fn load(&self, index: OutputIndex) -> Result<&Challenge, ChallengeError> {
        self.challenges.get(&index).ok_or(ChallengeError::WrongTurn {
            status: ChallengeStatus::None,
        })
    }
}

fn eval_status(config: &Config, challenge: &Challenge, now: u64) -> ChallengeStatus {
    status::evaluate(
        challenge,
        &config.segments_lengths,
        config.proving_timeout,
        now,
    )
}

fn validate_segments(
    config: &Config,
    turn: u32,
    first_anchor: &Hash,
    last_anchor: &Hash,
    segments: &[Hash],
) -> Result<(), ChallengeError> {
    let required = segments::required_len(&config.segments_lengths, turn).ok_or(
        ChallengeError::BadSegments("turn outside the bisection schedule"),
    )?;
    if segments.len() != required as usize {
        return Err(ChallengeError::BadSegments("wrong segment count"));
    }
    if segments[0] != *first_anchor {
        return Err(ChallengeError::BadSegments(
            "first segment must match the parent",
        ));
    }
    if segments[segments.len() - 1] == *last_anchor {
        return Err(ChallengeError::BadSegments(
            "last segment must not repeat the parent",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ManualClock, MemoryBondPool, MemoryOracle, RecordingCouncil, StaticZkVerifier};
    use crate::verifier::KeccakTrieVerifier;

    fn label(s: &str) -> Hash {
        hashing::keccak256(s.as_bytes())
    }

    #[test]
    fn test_new_rejects_invalid_lengths() {
        let config = Config {
            segments_lengths: vec![2, 2, 3],
            ..Config::default()
        };
        let result = Colosseum::new(
            config,
            MemoryOracle::new(6),
            MemoryBondPool::new(1),
            RecordingCouncil::default(),
            StaticZkVerifier::accepting(),
            KeccakTrieVerifier,
            ManualClock::new(0),
        );
        assert!(matches!(result, Err(ConfigError::Lengths(_))));
    }

    #[test]
    fn test_new_rejects_interval_mismatch() {
        let result = Colosseum::new(
            Config::default(),
            MemoryOracle::new(1800),
            MemoryBondPool::new(1),
            RecordingCouncil::default(),
            StaticZkVerifier::accepting(),
            KeccakTrieVerifier,
            ManualClock::new(0),
        );
        assert!(matches!(
            result,
            Err(ConfigError::IntervalMismatch {
                configured: 6,
                oracle: 1800
            })
        ));
    }

    #[test]
    fn test_validate_segments_rules() {
        let config = Config::default();
        let first = label("first");
        let last = label("last");
        let ok = vec![first, label("tail")];
        assert!(validate_segments(&config, 1, &first, &last, &ok).is_ok());

        // Wrong count for the turn.
        assert_eq!(
            validate_segments(&config, 1, &first, &last, &[first]),
            Err(ChallengeError::BadSegments("wrong segment count"))
        );
        // First must reproduce the parent segment.
        assert_eq!(
            validate_segments(&config, 1, &first, &last, &[label("other"), label("tail")]),
            Err(ChallengeError::BadSegments(
                "first segment must match the parent"
            ))
        );
        // Last must contradict the parent segment.
        assert_eq!(
            validate_segments(&config, 1, &first, &last, &[first, last]),
            Err(ChallengeError::BadSegments(
                "last segment must not repeat the parent"
            ))
        );
        // Turn 5 has no configured length.
        assert_eq!(
            validate_segments(&config, 5, &first, &last, &ok),
            Err(ChallengeError::BadSegments(
                "turn outside the bisection schedule"
            ))
        );
    }
}
