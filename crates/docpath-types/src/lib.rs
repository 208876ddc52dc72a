/// Character that separates path segments and may never appear inside an identifier.
pub const PATH_SEPARATOR: char = '/';

/// Errors that can occur when creating validated identifier types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input was empty
    #[error("ID cannot be empty")]
    Empty,
    /// The input contained the path separator
    #[error("ID cannot contain a '/' character")]
    ContainsSeparator,
}

/// A document or collection identifier that is safe to use as a single path segment.
///
/// The wrapped string is guaranteed to be non-empty and free of `/`. Unlike free text, an
/// identifier is opaque: surrounding whitespace is significant and is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new `DocumentId` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(DocumentId)` if the input passes [`DocumentId::check`],
    /// otherwise the corresponding [`TextError`].
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        Self::check(input)?;
        Ok(Self(input.to_owned()))
    }

    /// Checks the identifier rules without allocating.
    pub fn check(input: &str) -> Result<(), TextError> {
        if input.is_empty() {
            return Err(TextError::Empty);
        }
        if input.contains(PATH_SEPARATOR) {
            return Err(TextError::ContainsSeparator);
        }
        Ok(())
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for DocumentId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::new(s)
    }
}

impl serde::Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DocumentId::new(&s).map_err(serde::de::Error::custom)
    }
}
