//! Flattening of nested error structures.
//!
//! The [`Normalizer`] walks an [`ErrorTree`] depth-first, left to right, and
//! produces one [`NormalizedError`] per message. Mapping keys and the indices
//! of nested list elements become path segments; a message inside a list is
//! attached to the list's own path without its index.
//!
//! # Example
//!
//! ```rust
//! use triage::{normalize, ErrorNode, ErrorTree};
//!
//! let tree = ErrorTree::new()
//!     .with("name", ErrorNode::messages(["invalid!"]))
//!     .with("nested", ErrorNode::map([("user_id", ErrorNode::messages(["not an int"]))]));
//!
//! let errors = normalize(&tree).unwrap();
//! assert_eq!(errors[0], ("name", "invalid!"));
//! assert_eq!(errors[1], ("nested.user_id", "not an int"));
//! ```

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::error::NormalizeError;
use crate::node::{ErrorNode, ErrorTree, ListEntry};
use crate::options::ProcessOptions;
use crate::path::ErrorPath;

/// A single flattened error: where it occurred and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedError {
    /// Rendered path, e.g. `nestedList.0.something`.
    pub path: String,
    /// The message found at that path.
    pub message: String,
}

impl NormalizedError {
    /// Creates a normalized error from a path and a message.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Borrows the error as a `(path, message)` pair.
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.path, &self.message)
    }

    /// Encodes the error as `{"path": ..., "message": ...}`.
    pub fn to_json(&self) -> Value {
        json!({ "path": self.path, "message": self.message })
    }

    /// Encodes the error as a two-element `[path, message]` array.
    pub fn to_pair_json(&self) -> Value {
        json!([self.path, self.message])
    }
}

impl Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl<P: Into<String>, M: Into<String>> From<(P, M)> for NormalizedError {
    fn from((path, message): (P, M)) -> Self {
        Self::new(path, message)
    }
}

impl From<NormalizedError> for (String, String) {
    fn from(error: NormalizedError) -> Self {
        (error.path, error.message)
    }
}

impl PartialEq<(&str, &str)> for NormalizedError {
    fn eq(&self, other: &(&str, &str)) -> bool {
        self.path == other.0 && self.message == other.1
    }
}

/// Flattens error trees according to a set of [`ProcessOptions`].
///
/// The normalizer holds no state between calls; the same instance can be
/// reused for any number of trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    options: ProcessOptions,
}

impl Normalizer {
    /// Creates a normalizer with the given options.
    pub fn new(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Returns the options this normalizer applies.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Flattens `tree` into an ordered list of normalized errors.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::EmptyPath`] if a message's path renders as
    /// the empty string, and [`NormalizeError::MaxDepthExceeded`] if a depth
    /// limit is configured and the tree nests deeper than it. The tree is
    /// never visited below the limit.
    pub fn normalize(&self, tree: &ErrorTree) -> Result<Vec<NormalizedError>, NormalizeError> {
        let mut out = Vec::new();
        self.walk_map(tree.entries(), &ErrorPath::root(), 0, &mut out)?;
        tracing::debug!(count = out.len(), "normalized error tree");
        Ok(out)
    }

    fn walk_map(
        &self,
        entries: &IndexMap<String, ErrorNode>,
        path: &ErrorPath,
        depth: usize,
        out: &mut Vec<NormalizedError>,
    ) -> Result<(), NormalizeError> {
        for (key, node) in entries {
            self.walk_node(node, &path.push_key(key.as_str()), depth + 1, out)?;
        }
        Ok(())
    }

    fn walk_node(
        &self,
        node: &ErrorNode,
        path: &ErrorPath,
        depth: usize,
        out: &mut Vec<NormalizedError>,
    ) -> Result<(), NormalizeError> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(NormalizeError::MaxDepthExceeded {
                    path: path.clone(),
                    max_depth,
                });
            }
        }

        match node {
            ErrorNode::Map(entries) => self.walk_map(entries, path, depth, out),
            ErrorNode::List(items) => {
                let mut rendered = None;
                for (i, item) in items.iter().enumerate() {
                    match item {
                        ListEntry::Message(message) => {
                            let path_str = rendered
                                .get_or_insert_with(|| path.render(&self.options.path_style));
                            if path_str.is_empty() {
                                return Err(NormalizeError::EmptyPath {
                                    path: path.clone(),
                                    message: message.clone(),
                                });
                            }
                            out.push(NormalizedError::new(path_str.clone(), message.clone()));
                        }
                        ListEntry::Node(nested) => {
                            self.walk_node(nested, &path.push_index(i), depth + 1, out)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Flattens `tree` with the default options.
///
/// # Errors
///
/// See [`Normalizer::normalize`].
pub fn normalize(tree: &ErrorTree) -> Result<Vec<NormalizedError>, NormalizeError> {
    Normalizer::default().normalize(tree)
}
