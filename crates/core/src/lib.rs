//! # docpath core
//!
//! Path and identifier utilities for a document-database client.
//!
//! This crate contains pure, synchronous helpers:
//! - Splitting slash-delimited document paths into segments, and joining them back
//! - Validating identifiers used as single path components
//! - Generating random auto-IDs (re-exported from `docpath-ids`)
//!
//! **No client concerns**: networking, queries and transactions belong to the database client
//! that consumes these helpers.

pub mod config;
pub mod constants;
mod error;
pub mod paths;
pub mod validation;

pub use docpath_ids::{generate_id, AutoId, IdGenerator};
pub use docpath_types::DocumentId;
pub use error::{PathError, PathResult};
pub use paths::{join_path, split_path};
pub use validation::{document_id, validate_id, validate_id_named};

/// Generates an auto-ID from the process-wide generator as a plain string.
///
/// # Errors
///
/// Returns [`PathError::Id`] if the random source fails.
pub fn generate_id_string() -> PathResult<String> {
    Ok(generate_id()?.into_inner())
}
