//! Challenge status evaluation
//!
//! Statuses are never stored: they are derived on demand from the challenge
//! record and the clock. Timeouts therefore need no timers; a lapsed deadline
//! materializes the next time anyone queries or acts.

use serde::{Deserialize, Serialize};

use crate::challenge::{Challenge, Party};
use crate::segments;
use crate::types::{Timestamp, ZERO_HASH};

/// Derived state of a challenge at a given instant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeStatus {
    /// No live challenge
    None,
    /// Waiting on the asserter's bisection
    AsserterTurn,
    /// Waiting on the challenger's bisection
    ChallengerTurn,
    /// The asserter missed their bisection deadline; the challenger may prove
    AsserterTimeout,
    /// The challenger missed their deadline (or failed to exploit the
    /// asserter's lapse); the slot can be closed and reopened
    ChallengerTimeout,
    /// Bisection has collapsed to a single block; waiting on the proof
    ReadyToProve,
    /// A fault proof was accepted; waiting on council approval
    Proven,
    /// The council approved the replacement output; terminal
    Approved,
}

/// Evaluates a challenge's status at `now`.
///
/// `lengths` is the segments-lengths vector and `proving_timeout` the grace
/// window the challenger gets to exploit an asserter lapse. Deadlines use
/// strict comparison: a challenge is not timed out at exactly `timeout_at`.
pub fn evaluate(
    challenge: &Challenge,
    lengths: &[u32],
    proving_timeout: u64,
    now: Timestamp,
) -> ChallengeStatus {
    if challenge.approved {
        return ChallengeStatus::Approved;
    }
    if challenge.turn < 1 {
        return ChallengeStatus::None;
    }
    if challenge.output_root != ZERO_HASH {
        return ChallengeStatus::Proven;
    }

    let challenger_is_next = challenge.next_party() == Party::Challenger;
    if now > challenge.timeout_at {
        if challenger_is_next {
            return ChallengeStatus::ChallengerTimeout;
        }
        // The asserter lapsed; the challenger gets the proving window to
        // exploit it before forfeiting in turn.
        if now > challenge.timeout_at + proving_timeout {
            return ChallengeStatus::ChallengerTimeout;
        }
        return ChallengeStatus::AsserterTimeout;
    }

    if !segments::is_able_to_bisect(lengths, challenge.turn, challenge.seg_size) {
        return ChallengeStatus::ReadyToProve;
    }

    if challenger_is_next {
        ChallengeStatus::ChallengerTurn
    } else {
        ChallengeStatus::AsserterTurn
    }
}

/// The only party permitted to act at `status`, if any.
///
/// `ChallengerTimeout` maps to the asserter because closing the slot is their
/// move, though the coordinator accepts any caller there since the transition
/// is forced.
pub fn expected_party(status: ChallengeStatus) -> Option<Party> {
    match status {
        ChallengeStatus::ChallengerTurn
        | ChallengeStatus::ReadyToProve
        | ChallengeStatus::AsserterTimeout => Some(Party::Challenger),
        ChallengeStatus::AsserterTurn | ChallengeStatus::ChallengerTimeout => {
            Some(Party::Asserter)
        }
        _ => None,
    }
}

/// Whether a status counts as occupying its output-index slot. A
/// `ChallengerTimeout` slot is reusable; an `Approved` one is not.
pub fn is_in_progress(status: ChallengeStatus) -> bool {
    !matches!(
        status,
        ChallengeStatus::None | ChallengeStatus::ChallengerTimeout
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTHS: [u32; 4] = [2, 2, 3, 4];
    const PROVING_TIMEOUT: u64 = 480;

    fn open_challenge(turn: u32, seg_size: u64, timeout_at: u64) -> Challenge {
        let mut c = Challenge::opened(
            [1u8; 20],
            [2u8; 20],
            vec![[0u8; 32]; 2],
            12,
            seg_size,
            timeout_at,
        );
        c.turn = turn;
        c
    }

    fn status_at(c: &Challenge, now: u64) -> ChallengeStatus {
        evaluate(c, &LENGTHS, PROVING_TIMEOUT, now)
    }

    #[test]
    fn test_absent_and_terminal_precedence() {
        let mut c = open_challenge(1, 6, 100);
        c.turn = 0;
        assert_eq!(status_at(&c, 0), ChallengeStatus::None);

        let mut c = open_challenge(1, 6, 100);
        c.output_root = [9u8; 32];
        // Proven wins over turn/timeout evaluation.
        assert_eq!(status_at(&c, 10_000), ChallengeStatus::Proven);

        c.approved = true;
        assert_eq!(status_at(&c, 10_000), ChallengeStatus::Approved);
    }

    #[test]
    fn test_turn_statuses() {
        // Turn 1: asserter is next.
        let c = open_challenge(1, 6, 100);
        assert_eq!(status_at(&c, 50), ChallengeStatus::AsserterTurn);
        // Turn 2: challenger is next.
        let c = open_challenge(2, 6, 100);
        assert_eq!(status_at(&c, 50), ChallengeStatus::ChallengerTurn);
    }

    #[test]
    fn test_collapse_is_ready_to_prove() {
        // Turn 4 with a 3-block span: next span would be one block.
        let c = open_challenge(4, 3, 100);
        assert_eq!(status_at(&c, 50), ChallengeStatus::ReadyToProve);
    }

    #[test]
    fn test_deadline_is_strict() {
        let c = open_challenge(1, 6, 100);
        assert_eq!(status_at(&c, 100), ChallengeStatus::AsserterTurn);
        assert_eq!(status_at(&c, 101), ChallengeStatus::AsserterTimeout);
    }

    #[test]
    fn test_challenger_timeout_when_next() {
        let c = open_challenge(2, 6, 100);
        assert_eq!(status_at(&c, 101), ChallengeStatus::ChallengerTimeout);
    }

    #[test]
    fn test_unexploited_asserter_timeout_flips() {
        let c = open_challenge(1, 6, 100);
        // Exactly at the end of the proving window: still the challenger's
        // opportunity.
        assert_eq!(
            status_at(&c, 100 + PROVING_TIMEOUT),
            ChallengeStatus::AsserterTimeout
        );
        assert_eq!(
            status_at(&c, 100 + PROVING_TIMEOUT + 1),
            ChallengeStatus::ChallengerTimeout
        );
    }

    #[test]
    fn test_ready_to_prove_times_out() {
        let c = open_challenge(4, 3, 100);
        assert_eq!(status_at(&c, 101), ChallengeStatus::ChallengerTimeout);
    }

    #[test]
    fn test_expected_party() {
        assert_eq!(
            expected_party(ChallengeStatus::ChallengerTurn),
            Some(Party::Challenger)
        );
        assert_eq!(
            expected_party(ChallengeStatus::ReadyToProve),
            Some(Party::Challenger)
        );
        assert_eq!(
            expected_party(ChallengeStatus::AsserterTimeout),
            Some(Party::Challenger)
        );
        assert_eq!(
            expected_party(ChallengeStatus::AsserterTurn),
            Some(Party::Asserter)
        );
        assert_eq!(
            expected_party(ChallengeStatus::ChallengerTimeout),
            Some(Party::Asserter)
        );
        assert_eq!(expected_party(ChallengeStatus::None), None);
        assert_eq!(expected_party(ChallengeStatus::Proven), None);
        assert_eq!(expected_party(ChallengeStatus::Approved), None);
    }

    #[test]
    fn test_in_progress() {
        assert!(!is_in_progress(ChallengeStatus::None));
        assert!(!is_in_progress(ChallengeStatus::ChallengerTimeout));
        assert!(is_in_progress(ChallengeStatus::AsserterTurn));
        assert!(is_in_progress(ChallengeStatus::Proven));
        assert!(is_in_progress(ChallengeStatus::Approved));
    }
}
