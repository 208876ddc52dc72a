//! Identifier validation.
//!
//! Identifiers name a single component of a document path, so they must be present,
//! non-empty and must not contain the path separator. Validation is pass-through: on success
//! the input is handed back unchanged so checks can sit inline in a call chain.

use crate::constants::DEFAULT_ID_PARAM;
use crate::{PathError, PathResult};
use docpath_types::DocumentId;

/// Validates an identifier, reporting failures against the parameter name `id`.
///
/// # Errors
///
/// See [`validate_id_named`].
pub fn validate_id<'a>(id: impl Into<Option<&'a str>>) -> PathResult<&'a str> {
    validate_id_named(id, DEFAULT_ID_PARAM)
}

/// Validates an identifier, reporting failures against `param`.
///
/// # Arguments
///
/// * `id` - Candidate identifier; `None` models an absent argument.
/// * `param` - Parameter name included in the error.
///
/// # Returns
///
/// Returns `id` unchanged if it is valid.
///
/// # Errors
///
/// - [`PathError::MissingArgument`] if `id` is absent.
/// - [`PathError::InvalidFormat`] if `id` is empty or contains `/`.
pub fn validate_id_named<'a>(
    id: impl Into<Option<&'a str>>,
    param: &str,
) -> PathResult<&'a str> {
    let id = id.into().ok_or_else(|| PathError::missing(param))?;
    DocumentId::check(id).map_err(|e| PathError::invalid_format(param, e.to_string()))?;
    Ok(id)
}

/// Validates an identifier and takes an owned, typed copy of it.
pub fn document_id<'a>(id: impl Into<Option<&'a str>>, param: &str) -> PathResult<DocumentId> {
    let id = validate_id_named(id, param)?;
    DocumentId::new(id).map_err(|e| PathError::invalid_format(param, e.to_string()))
}
