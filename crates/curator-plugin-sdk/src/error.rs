use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a per-item batch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The requested access mode is not available for the entity.
    EntityAccessError,
    /// The reference is recognized but fails the manager's syntax rules.
    MalformedEntityReference,
    /// The reference is well-formed but unknown to the backend.
    EntityResolutionError,
}

/// Error reported through the error channel for a single batch item.
///
/// Never aborts sibling items; the host receives exactly one of these or
/// one success payload per input index.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct BatchElementError {
    pub kind: ErrorKind,
    pub message: String,
}

impl BatchElementError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn access(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntityAccessError, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedEntityReference, message)
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntityResolutionError, message)
    }
}

/// Fatal errors raised outside of batch operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Raised synchronously by `initialize`; fatal to manager setup.
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_element_error_displays_message_only() {
        let err = BatchElementError::resolution("Entity 'x' not found");
        assert_eq!(err.to_string(), "Entity 'x' not found");
        assert_eq!(err.kind, ErrorKind::EntityResolutionError);
    }
}
