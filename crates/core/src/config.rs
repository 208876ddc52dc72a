//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed to whatever needs it.
//! The resolvers take the raw optional values rather than reading the environment
//! themselves, so tests never touch process-wide state.

use crate::constants::DEFAULT_ID_COUNT;
use crate::{PathError, PathResult};
use std::str::FromStr;

/// How command output is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(PathError::InvalidInput(format!(
                "unknown output format '{}' (expected 'text' or 'json')",
                s
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    output_format: OutputFormat,
    id_count: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(output_format: OutputFormat, id_count: usize) -> PathResult<Self> {
        if id_count == 0 {
            return Err(PathError::InvalidInput("id_count must be at least 1".into()));
        }

        Ok(Self {
            output_format,
            id_count,
        })
    }

    /// Build a `CoreConfig` from optional raw environment values.
    pub fn from_env_values(
        output_format: Option<String>,
        id_count: Option<String>,
    ) -> PathResult<Self> {
        let config = Self::new(
            output_format_from_env_value(output_format)?,
            id_count_from_env_value(id_count)?,
        )?;
        tracing::debug!(
            output_format = ?config.output_format,
            id_count = config.id_count,
            "resolved core configuration"
        );
        Ok(config)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn id_count(&self) -> usize {
        self.id_count
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            id_count: DEFAULT_ID_COUNT,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the output format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`OutputFormat::Text`].
pub fn output_format_from_env_value(value: Option<String>) -> PathResult<OutputFormat> {
    let parsed = non_blank(value)
        .map(|v| v.parse::<OutputFormat>())
        .transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parse the default ID count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ID_COUNT`].
pub fn id_count_from_env_value(value: Option<String>) -> PathResult<usize> {
    let parsed = non_blank(value)
        .map(|v| {
            v.parse::<usize>().map_err(|e| {
                PathError::InvalidInput(format!("invalid ID count '{}': {}", v, e))
            })
        })
        .transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_ID_COUNT))
}
