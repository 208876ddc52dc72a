//! Slash-delimited document paths.
//!
//! A path is a non-empty sequence of segments joined by `/`, such as
//! `users/alice/orders/o-1`. Every segment must be non-empty, so leading, trailing or
//! doubled separators are rejected rather than silently collapsed.

use crate::constants::{PATH_PARAM, PATH_SEPARATOR, SEGMENTS_PARAM};
use crate::{PathError, PathResult};
use docpath_types::DocumentId;

/// Splits a path on `/` and checks that no segment is empty.
///
/// Segments borrow from `path` and keep their original order, duplicates included.
///
/// # Errors
///
/// - [`PathError::MissingArgument`] if `path` is absent.
/// - [`PathError::InvalidFormat`] if any segment is empty. This covers `""`, `"/a"`, `"a/"`
///   and `"a//b"`.
pub fn split_path<'a>(path: impl Into<Option<&'a str>>) -> PathResult<Vec<&'a str>> {
    let path = path.into().ok_or_else(|| PathError::missing(PATH_PARAM))?;
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PathError::invalid_format(
            PATH_PARAM,
            "Path cannot contain empty elements",
        ));
    }
    Ok(segments)
}

/// Joins segments into a path, the inverse of [`split_path`].
///
/// # Errors
///
/// Returns [`PathError::InvalidFormat`] if `segments` is empty or any segment is empty or
/// contains `/`.
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> PathResult<String> {
    if segments.is_empty() {
        return Err(PathError::invalid_format(
            SEGMENTS_PARAM,
            "at least one segment is required",
        ));
    }

    let mut joined = String::new();
    for (index, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        DocumentId::check(segment).map_err(|e| {
            PathError::invalid_format(SEGMENTS_PARAM, format!("segment {}: {}", index, e))
        })?;
        if index > 0 {
            joined.push(PATH_SEPARATOR);
        }
        joined.push_str(segment);
    }
    Ok(joined)
}
