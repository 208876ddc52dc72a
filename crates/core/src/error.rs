#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("{param} must not be missing")]
    MissingArgument { param: String },
    #[error("invalid {param}: {reason}")]
    InvalidFormat { param: String, reason: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("ID generation failed: {0}")]
    Id(#[from] docpath_ids::IdError),
}

impl PathError {
    pub(crate) fn missing(param: &str) -> Self {
        Self::MissingArgument {
            param: param.to_owned(),
        }
    }

    pub(crate) fn invalid_format(param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            param: param.to_owned(),
            reason: reason.into(),
        }
    }

    /// Name of the rejected parameter, for argument errors.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { param } | Self::InvalidFormat { param, .. } => {
                Some(param.as_str())
            }
            Self::InvalidInput(_) | Self::Id(_) => None,
        }
    }
}

pub type PathResult<T> = std::result::Result<T, PathError>;
