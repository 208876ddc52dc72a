//! Constants used throughout the docpath core crate.

pub use docpath_types::PATH_SEPARATOR;

/// Parameter name reported when a path argument is rejected.
pub const PATH_PARAM: &str = "path";

/// Parameter name reported when an identifier is validated without an explicit name.
pub const DEFAULT_ID_PARAM: &str = "id";

/// Parameter name reported when a segment passed to a join is rejected.
pub const SEGMENTS_PARAM: &str = "segments";

/// Environment variable selecting the CLI output format.
pub const OUTPUT_ENV_VAR: &str = "DOCPATH_OUTPUT";

/// Environment variable holding the default number of IDs to generate.
pub const ID_COUNT_ENV_VAR: &str = "DOCPATH_ID_COUNT";

/// Number of IDs generated when nothing else is configured.
pub const DEFAULT_ID_COUNT: usize = 1;
