//! Failures raised while walking an error structure.

use crate::path::ErrorPath;

/// An error structure that cannot be flattened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    /// A value that is neither a mapping, a list, nor (inside a list) a
    /// message string.
    #[error("invalid error node at {}: expected {expected}, got {found}", location(.path))]
    InvalidNode {
        /// Location of the offending value.
        path: ErrorPath,
        /// What was acceptable at that position.
        expected: &'static str,
        /// Kind of the value that was found (e.g. `number`).
        found: &'static str,
    },

    /// A message whose path renders as the empty string, e.g. one listed
    /// directly under an empty top-level key.
    #[error("message {message:?} at {} has an empty path", location(.path))]
    EmptyPath {
        /// Structured location of the message.
        path: ErrorPath,
        /// The message that could not be addressed.
        message: String,
    },

    /// Nesting deeper than the configured limit.
    #[error("error structure exceeds max depth {max_depth} at {}", location(.path))]
    MaxDepthExceeded {
        /// Path at which the limit was crossed.
        path: ErrorPath,
        /// The configured limit.
        max_depth: usize,
    },
}

impl NormalizeError {
    /// Returns the path at which normalization failed.
    pub fn path(&self) -> &ErrorPath {
        match self {
            NormalizeError::InvalidNode { path, .. }
            | NormalizeError::EmptyPath { path, .. }
            | NormalizeError::MaxDepthExceeded { path, .. } => path,
        }
    }
}

fn location(path: &ErrorPath) -> String {
    if path.is_root() {
        "(root)".to_string()
    } else {
        format!("'{}'", path)
    }
}
