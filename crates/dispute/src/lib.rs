//! Challenge coordination for the Colosseum fault-dispute protocol
//!
//! The [`Colosseum`] coordinator owns the per-output challenge records and
//! drives them through bisection, fault proving, and council approval. The
//! output oracle, bond pool, security council, and the two proof verifiers
//! are injected as narrow traits so the whole protocol can run against
//! in-memory collaborators (see [`mock`]).

pub mod colosseum;
pub mod config;
pub mod error;
pub mod events;
pub mod mock;
pub mod scenario;
pub mod traits;
pub mod verifier;

pub use colosseum::Colosseum;
pub use config::Config;
pub use error::{ChallengeError, ConfigError};
pub use events::Event;
pub use traits::{BlockClock, BondPool, OutputOracle, SecurityCouncil, TrieVerifier, ZkVerifier};
pub use verifier::KeccakTrieVerifier;
