//! Configuration for normalization runs.
//!
//! [`ProcessOptions`] is a plain value built with chained setters. The
//! defaults reproduce the classic behavior: `.`-joined, unescaped paths,
//! malformed leaves rejected, and no depth limit.

use crate::path::PathStyle;

/// What to do with JSON leaves that are not message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeafPolicy {
    /// Fail with [`NormalizeError::InvalidNode`](crate::NormalizeError::InvalidNode).
    #[default]
    Reject,
    /// Coerce: numbers, booleans and `null` become their JSON text, and a
    /// scalar directly under a key becomes a one-message list.
    Stringify,
}

/// Options shared by the normalizer and the top-level entry points.
///
/// # Example
///
/// ```rust
/// use triage::{LeafPolicy, ProcessOptions};
///
/// let options = ProcessOptions::new()
///     .separator('/')
///     .escape_keys(true)
///     .leaf_policy(LeafPolicy::Stringify)
///     .with_max_depth(32);
///
/// assert_eq!(options.max_depth, Some(32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessOptions {
    /// How paths are rendered.
    pub path_style: PathStyle,
    /// Handling of malformed JSON leaves.
    pub leaf_policy: LeafPolicy,
    /// Maximum nesting depth below the root; `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl ProcessOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.path_style = self.path_style.separator(separator);
        self
    }

    /// Enables or disables escaping of separators inside keys.
    pub fn escape_keys(mut self, escape: bool) -> Self {
        self.path_style = self.path_style.escape_keys(escape);
        self
    }

    /// Sets the leaf policy used when converting JSON input.
    pub fn leaf_policy(mut self, policy: LeafPolicy) -> Self {
        self.leaf_policy = policy;
        self
    }

    /// Limits how deep the normalizer may recurse.
    ///
    /// Depth counts nodes below the root mapping: `{a: ["x"]}` has depth 1,
    /// `{a: {b: ["x"]}}` has depth 2.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProcessOptions::default();
        assert_eq!(options.path_style.separator, '.');
        assert!(!options.path_style.escape_keys);
        assert_eq!(options.leaf_policy, LeafPolicy::Reject);
        assert_eq!(options.max_depth, None);
    }

    #[test]
    fn test_builder_chain() {
        let options = ProcessOptions::new().separator(':').escape_keys(true);
        assert_eq!(options.path_style.separator, ':');
        assert!(options.path_style.escape_keys);
    }
}
