//! Path representation for locating messages in nested error structures.
//!
//! This module provides [`ErrorPath`] and [`PathSegment`] types for building
//! paths while walking an error tree, and [`PathStyle`] for rendering them
//! into the flat dotted strings carried by normalized errors.

use std::fmt::{self, Display};

/// A segment of an error path.
///
/// Paths are built from segments that represent either a mapping key or a
/// position in a sequence of nested errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key (e.g., `user`, `email`)
    Key(String),
    /// A zero-based sequence index
    Index(usize),
}

impl PathSegment {
    fn write_to(&self, out: &mut String, style: &PathStyle) {
        match self {
            PathSegment::Key(name) if style.escape_keys => {
                for c in name.chars() {
                    if c == '\\' || c == style.separator {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
            PathSegment::Key(name) => out.push_str(name),
            PathSegment::Index(idx) => out.push_str(&idx.to_string()),
        }
    }
}

/// How an [`ErrorPath`] is rendered into a string.
///
/// The default joins segments with `.` and writes keys verbatim, so a key
/// that itself contains `.` yields a path that cannot be split back into
/// its segments. Enable `escape_keys` to prefix separators and backslashes
/// inside keys with `\`.
///
/// # Example
///
/// ```rust
/// use triage::{ErrorPath, PathStyle};
///
/// let path = ErrorPath::root().push_key("a.b").push_index(0);
///
/// assert_eq!(path.render(&PathStyle::default()), "a.b.0");
/// assert_eq!(path.render(&PathStyle::default().escape_keys(true)), "a\\.b.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStyle {
    /// Character placed between segments.
    pub separator: char,
    /// Whether separators inside keys are escaped.
    pub escape_keys: bool,
}

impl PathStyle {
    /// Sets the separator and returns self for chaining.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Enables or disables key escaping and returns self for chaining.
    pub fn escape_keys(mut self, escape: bool) -> Self {
        self.escape_keys = escape;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            separator: '.',
            escape_keys: false,
        }
    }
}

/// A path to a message in a nested error structure.
///
/// `ErrorPath` represents locations like `nestedList.1.very.0.nested` and
/// provides methods for building paths incrementally during traversal.
///
/// # Example
///
/// ```rust
/// use triage::ErrorPath;
///
/// let path = ErrorPath::root()
///     .push_key("users")
///     .push_index(0)
///     .push_key("email");
///
/// assert_eq!(path.to_string(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ErrorPath {
    segments: Vec<PathSegment>,
}

impl ErrorPath {
    /// Creates an empty path representing the root mapping.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single key segment.
    pub fn from_key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(name.into())],
        }
    }

    /// Returns a new path with a key segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Renders the path as a flat string.
    ///
    /// Segments are joined left to right. A segment joined onto an empty
    /// rendered prefix is emitted on its own, so an empty key contributes
    /// nothing and never produces a leading separator.
    pub fn render(&self, style: &PathStyle) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push(style.separator);
            }
            segment.write_to(&mut out, style);
        }
        out
    }
}

impl Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&PathStyle::default()))
    }
}
