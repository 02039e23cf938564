//! Per-turn segment arithmetic
//!
//! The configuration vector `L` gives the required number of segments for
//! each turn (entry `i` serves turn `i + 1`). Each bisection at turn `t`
//! splits the current span into `L[t] - 1` equal sub-ranges, so the law
//! `∏(L[t] - 1) == submission_interval` guarantees that successive
//! bisections exactly partition the interval and bottom out at single-block
//! spans.

use thiserror::Error;

use crate::types::BlockNumber;

/// Rejection of a segments-lengths vector at initialization
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidLengths {
    #[error("segments lengths must have an even number of entries, got {0}")]
    OddCount(usize),
    #[error("segments lengths entries must be at least 2, got {0}")]
    EntryTooSmall(u32),
    #[error("segments lengths do not partition the submission interval: product {product}, interval {interval}")]
    BadProduct { product: u64, interval: u64 },
}

/// Checks the segments-lengths law: an even number of entries, every entry
/// at least 2, and `∏(L[t] - 1)` equal to the submission interval.
pub fn validate_lengths(lengths: &[u32], submission_interval: u64) -> Result<(), InvalidLengths> {
    if lengths.is_empty() || lengths.len() % 2 != 0 {
        return Err(InvalidLengths::OddCount(lengths.len()));
    }
    let mut product: u64 = 1;
    for &len in lengths {
        if len < 2 {
            return Err(InvalidLengths::EntryTooSmall(len));
        }
        product = product.saturating_mul(u64::from(len) - 1);
    }
    if product != submission_interval {
        return Err(InvalidLengths::BadProduct {
            product,
            interval: submission_interval,
        });
    }
    Ok(())
}

/// Number of segments required at `turn` (1-based), or `None` when the turn
/// is outside the configured schedule.
pub fn required_len(lengths: &[u32], turn: u32) -> Option<u32> {
    if turn == 0 {
        return None;
    }
    lengths.get(turn as usize - 1).copied()
}

/// Span of each child sub-range produced by a bisection at `turn`.
///
/// Divisions are exact for any vector accepted by [`validate_lengths`].
pub fn next_seg_size(lengths: &[u32], turn: u32, seg_size: u64) -> Option<u64> {
    let len = required_len(lengths, turn)?;
    let parts = u64::from(len) - 1;
    debug_assert!(seg_size % parts == 0, "segment span must divide exactly");
    Some(seg_size / parts)
}

/// The sub-range `[start, start + size)` selected by bisecting at `pos`.
pub fn sub_range(
    lengths: &[u32],
    turn: u32,
    seg_start: BlockNumber,
    seg_size: u64,
    pos: u32,
) -> Option<(BlockNumber, u64)> {
    let size = next_seg_size(lengths, turn, seg_size)?;
    Some((seg_start + u64::from(pos) * size, size))
}

/// A challenge can bisect further iff the next span is wider than one block.
/// When this is false the next required action is a fault proof.
pub fn is_able_to_bisect(lengths: &[u32], turn: u32, seg_size: u64) -> bool {
    next_seg_size(lengths, turn, seg_size).is_some_and(|size| size > 1)
}
