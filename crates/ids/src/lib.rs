//! Auto-ID generation.
//!
//! Documents created without an explicit name are given a random *auto-ID*: a string of
//! **exactly 20 characters**, each drawn uniformly from `a-z`, `A-Z` and `0-9`.
//!
//! This crate provides:
//! - A generator service ([`IdGenerator`]) that owns its random source and scratch buffer
//!   behind a single lock, so one instance can be shared between threads.
//! - A wrapper type ([`AutoId`]) that *guarantees* the canonical auto-ID form once
//!   constructed.
//!
//! ## Canonical auto-ID form
//! - Length: 20
//! - Characters: `a-z`, `A-Z` and `0-9` only
//! - Example: `k3Hd9QzPq0aXbL7mN2rT`
//!
//! ## Bias
//! Each random byte contributes its low 6 bits (0..=63). Values below 62 index into
//! [`ALPHABET`]; 62 and 63 are thrown away rather than folded back with a modulo, which would
//! make the first two symbols slightly more likely than the rest.
//!
//! The alphabet order is fixed, so a generator built with [`IdGenerator::from_rng`] over a
//! seeded source always produces the same sequence of IDs.

mod service;

// Re-export public types
pub use service::{generate_id, AutoId, IdGenerator, ALPHABET, AUTO_ID_LENGTH};

/// Error type for ID operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The underlying random source could not supply bytes
    #[error("random source failure: {0}")]
    RandomSource(#[source] rand::Error),
}

/// Result type for ID operations.
pub type IdResult<T> = Result<T, IdError>;
