//! Core engine plumbing: configuration and deterministic RNG.

pub mod config;
pub mod rng;

pub use config::{GameConfig, LedgerConfig, RevealDelays};
pub use rng::GameRng;
