//! Error types for impress-features

use crate::form::FeatureForm;
use thiserror::Error;

/// Result type alias for feature operations
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Main error type for feature construction, densification and distance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// A structural invariant was violated at construction
    #[error("Validation error on {tag}: {reason}")]
    Validation { tag: String, reason: String },

    /// The feature has no canonical numeric expansion
    #[error("Cannot {operation} feature {tag} of form {form}")]
    UnsupportedOperation {
        tag: String,
        form: FeatureForm,
        operation: &'static str,
    },

    /// Two features of different variant, tag or dictionary were compared
    #[error("Type mismatch at position {position}: {left} vs {right}")]
    TypeMismatch {
        position: usize,
        left: String,
        right: String,
    },

    /// Two vectors (or dense payloads) of different length were compared
    #[error("Shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Tag-indexed lookup found nothing
    #[error("Feature not found: {0}")]
    NotFound(String),

    /// Typed accessor requested a form the tag does not have
    #[error("Expected form {expected} for {tag}, found {found}")]
    FormMismatch {
        tag: String,
        expected: FeatureForm,
        found: FeatureForm,
    },
}

/// Fieldless discriminant of [`FeatureError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    UnsupportedOperation,
    TypeMismatch,
    ShapeMismatch,
    NotFound,
    FormMismatch,
}

impl FeatureError {
    pub(crate) fn validation(tag: &str, reason: impl Into<String>) -> Self {
        FeatureError::Validation {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::Validation { .. } => ErrorKind::Validation,
            FeatureError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            FeatureError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            FeatureError::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            FeatureError::NotFound(_) => ErrorKind::NotFound,
            FeatureError::FormMismatch { .. } => ErrorKind::FormMismatch,
        }
    }

    /// Attach a vector position to a type mismatch raised between two features.
    pub(crate) fn at_position(self, index: usize) -> Self {
        match self {
            FeatureError::TypeMismatch { left, right, .. } => FeatureError::TypeMismatch {
                position: index,
                left,
                right,
            },
            other => other,
        }
    }
}
