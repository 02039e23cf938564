//! Dispute configuration

use std::env;

use serde::{Deserialize, Serialize};

use colosseum_core::segments;
use colosseum_core::types::{Address, Hash, ZERO_ADDRESS};

use crate::error::ConfigError;

/// Devnet dummy hash used to pad the transaction list of the public input
pub const DEV_DUMMY_HASH: Hash = [
    0x6c, 0xf9, 0x91, 0x9f, 0xd9, 0xdf, 0xe9, 0x23, 0xed, 0x2f, 0x2e, 0x4d, 0x98, 0x0d, 0x67,
    0x7a, 0x88, 0xd1, 0x7c, 0x74, 0xf8, 0xf6, 0x60, 0x4f, 0xfa, 0xc1, 0x51, 0x2f, 0xf3, 0x06,
    0xe7, 0x60,
];

/// Immutable protocol parameters, fixed at coordinator construction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// L2 blocks covered by one checkpoint output
    pub submission_interval: u64,
    /// Seconds each side gets to answer a bisection
    pub bisection_timeout: u64,
    /// Seconds the challenger gets to land a fault proof
    pub proving_timeout: u64,
    /// Padding hash for absent transactions in the public input
    pub dummy_hash: Hash,
    /// Maximum transactions committed per block proof
    pub max_txs: usize,
    /// Required segment count per turn (entry `i` serves turn `i + 1`)
    pub segments_lengths: Vec<u32>,
    /// Address allowed to approve proven challenges
    pub security_council: Address,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submission_interval: 6,
            bisection_timeout: 120,
            proving_timeout: 480,
            dummy_hash: DEV_DUMMY_HASH,
            max_txs: 25,
            segments_lengths: vec![2, 2, 3, 4],
            security_council: ZERO_ADDRESS,
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to the devnet defaults.
    ///
    /// `COLOSSEUM_SEGMENTS_LENGTHS` uses the deployment format, a comma
    /// list such as `2,2,3,4`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            submission_interval: env_u64("COLOSSEUM_SUBMISSION_INTERVAL")
                .unwrap_or(defaults.submission_interval),
            bisection_timeout: env_u64("COLOSSEUM_BISECTION_TIMEOUT")
                .unwrap_or(defaults.bisection_timeout),
            proving_timeout: env_u64("COLOSSEUM_PROVING_TIMEOUT")
                .unwrap_or(defaults.proving_timeout),
            dummy_hash: env::var("COLOSSEUM_DUMMY_HASH")
                .ok()
                .and_then(|s| parse_hash(&s))
                .unwrap_or(defaults.dummy_hash),
            max_txs: env_u64("COLOSSEUM_MAX_TXS")
                .map(|n| n as usize)
                .unwrap_or(defaults.max_txs),
            segments_lengths: env::var("COLOSSEUM_SEGMENTS_LENGTHS")
                .ok()
                .and_then(|s| parse_lengths(&s))
                .unwrap_or(defaults.segments_lengths),
            security_council: env::var("COLOSSEUM_SECURITY_COUNCIL")
                .ok()
                .and_then(|s| parse_address(&s))
                .unwrap_or(defaults.security_council),
        }
    }

    /// Checks the segments-lengths law against the submission interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        segments::validate_lengths(&self.segments_lengths, self.submission_interval)?;
        Ok(())
    }

    /// Deadline granted to the next actor: the bisection window while the
    /// dispute can still split, the proving window once it cannot.
    pub fn timeout_for(&self, able_to_bisect: bool) -> u64 {
        if able_to_bisect {
            self.bisection_timeout
        } else {
            self.proving_timeout
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn parse_lengths(s: &str) -> Option<Vec<u32>> {
    s.split(',')
        .map(|part| part.trim().parse().ok())
        .collect()
}

fn parse_hash(s: &str) -> Option<Hash> {
    let bytes = hex::decode(s.trim_start_matches("0x")).ok()?;
    bytes.try_into().ok()
}

fn parse_address(s: &str) -> Option<Address> {
    let bytes = hex::decode(s.trim_start_matches("0x")).ok()?;
    bytes.try_into().ok()
}
