//! Error types for sqlgen

use thiserror::Error;

/// Result type alias for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while assembling a statement graph.
///
/// Rendering never fails: every error surfaces at the constructor or
/// add-operation that received the bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Identifier or alias is empty or malformed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Literal value that has no SQL spelling (NaN, infinity)
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// A source with the same alias or name is already registered
    #[error("Duplicate source: {0}")]
    DuplicateSource(String),

    /// Join shape that cannot be rendered (e.g. CROSS JOIN with ON)
    #[error("Invalid join: {0}")]
    InvalidJoin(String),

    /// Render options could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

impl BuildError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create an invalid literal error
    pub fn invalid_literal(message: impl Into<String>) -> Self {
        Self::InvalidLiteral(message.into())
    }

    /// Create a duplicate source error for the given registry key
    pub fn duplicate_source(key: impl Into<String>) -> Self {
        Self::DuplicateSource(key.into())
    }

    /// Create an invalid join error
    pub fn invalid_join(message: impl Into<String>) -> Self {
        Self::InvalidJoin(message.into())
    }

    /// Check if this is a registry key conflict
    pub fn is_duplicate_source(&self) -> bool {
        matches!(self, Self::DuplicateSource(_))
    }

    /// Check if this is an identifier error
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier(_))
    }

    /// Check if this is a literal error
    pub fn is_invalid_literal(&self) -> bool {
        matches!(self, Self::InvalidLiteral(_))
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for BuildError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
