//! Structured error types for loading and reconciling configuration.

use crate::path::TreePath;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // File access
    Io,

    // A document or literal could not be decoded into the target shape
    DecodeError,

    // Reconciliation failures
    NotAddressable,
    RequiredFieldMissing,
    ShapeMismatch,
}

/// Where a literal decoded during reconciliation came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralOrigin {
    /// The named environment variable.
    Env(String),
    /// The field's `default` annotation.
    Default,
}

impl fmt::Display for LiteralOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralOrigin::Env(name) => write!(f, "env value from {}", name),
            LiteralOrigin::Default => write!(f, "default value"),
        }
    }
}

/// Errors returned by [`crate::load`] and [`crate::reconcile`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("unable to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be decoded into the target.
    #[error("unable to unmarshal config file {}: {source}", .path.display())]
    Unmarshal {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A `default` or `env` literal does not fit the field's type.
    #[error("unable to unmarshal {origin} for field \"{field}\": {source}")]
    Decode {
        origin: LiteralOrigin,
        field: TreePath,
        text: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A default or environment override targeted a location that cannot
    /// be changed in place.
    #[error("target field is not addressable \"{field}\"")]
    NotAddressable { field: TreePath },

    /// A required field has no value, default or environment override.
    #[error(
        "field \"{field}\" is required, but no value specified{}",
        env_hint(.env)
    )]
    RequiredFieldMissing {
        field: TreePath,
        env: Option<String>,
    },

    /// A record or sequence was expected.
    #[error("resource at \"{field}\" should be a record, found {found}")]
    ShapeMismatch {
        field: TreePath,
        found: &'static str,
    },

    /// An element of a top-level sequence failed.
    #[error("item {index} is invalid: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: Box<ConfigError>,
    },
}

fn env_hint(env: &Option<String>) -> String {
    match env {
        Some(name) => format!(", no value for environment variable {} specified", name),
        None => String::new(),
    }
}

impl ConfigError {
    /// Classify the error, looking through sequence item wrappers.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Read { .. } => ErrorCode::Io,
            ConfigError::Unmarshal { .. } | ConfigError::Decode { .. } => ErrorCode::DecodeError,
            ConfigError::NotAddressable { .. } => ErrorCode::NotAddressable,
            ConfigError::RequiredFieldMissing { .. } => ErrorCode::RequiredFieldMissing,
            ConfigError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            ConfigError::InvalidItem { source, .. } => source.code(),
        }
    }

    /// Tree path of the offending field, if the error has one.
    pub fn field(&self) -> Option<&TreePath> {
        match self {
            ConfigError::Read { .. } | ConfigError::Unmarshal { .. } => None,
            ConfigError::Decode { field, .. }
            | ConfigError::NotAddressable { field }
            | ConfigError::RequiredFieldMissing { field, .. }
            | ConfigError::ShapeMismatch { field, .. } => Some(field),
            ConfigError::InvalidItem { source, .. } => source.field(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
