//! The raw, nested error structure.
//!
//! Validation layers report errors as a mapping from field names to either a
//! list of messages, a nested mapping, or a list of nested errors for
//! repeated fields. [`ErrorTree`] is that root mapping; [`ErrorNode`] and
//! [`ListEntry`] describe everything below it.
//!
//! # Example
//!
//! ```rust
//! use triage::{ErrorNode, ErrorTree};
//!
//! let tree = ErrorTree::new()
//!     .with("name", ErrorNode::messages(["can't be blank"]))
//!     .with("address", ErrorNode::map([("zip", ErrorNode::messages(["is invalid"]))]));
//!
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.leaf_count(), 2);
//! ```

use indexmap::IndexMap;

/// The root of an error structure: an ordered mapping from keys to nodes.
///
/// Iteration order is insertion order, which is also the order in which
/// normalized errors are produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorTree {
    entries: IndexMap<String, ErrorNode>,
}

impl ErrorTree {
    /// Creates an empty tree (no errors).
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node under `key`, replacing any previous node for that key.
    pub fn insert(&mut self, key: impl Into<String>, node: ErrorNode) -> Option<ErrorNode> {
        self.entries.insert(key.into(), node)
    }

    /// Adds a node under `key` and returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, node: ErrorNode) -> Self {
        self.insert(key, node);
        self
    }

    /// Returns the node stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.entries.get(key)
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns an iterator over the top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ErrorNode)> {
        self.entries.iter()
    }

    /// Returns the total number of messages reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.entries.values().map(ErrorNode::leaf_count).sum()
    }

    pub(crate) fn entries(&self) -> &IndexMap<String, ErrorNode> {
        &self.entries
    }
}

impl<K: Into<String>> FromIterator<(K, ErrorNode)> for ErrorTree {
    fn from_iter<I: IntoIterator<Item = (K, ErrorNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<IndexMap<String, ErrorNode>> for ErrorTree {
    fn from(entries: IndexMap<String, ErrorNode>) -> Self {
        Self { entries }
    }
}

/// A node below the root of an error structure.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    /// A nested mapping, e.g. the errors of an embedded record.
    Map(IndexMap<String, ErrorNode>),
    /// A sequence of messages and/or nested nodes.
    List(Vec<ListEntry>),
}

impl ErrorNode {
    /// Creates a list node holding only messages.
    pub fn messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ErrorNode::List(
            messages
                .into_iter()
                .map(|m| ListEntry::Message(m.into()))
                .collect(),
        )
    }

    /// Creates a mapping node from key/node pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ErrorNode)>,
        K: Into<String>,
    {
        ErrorNode::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a list node from arbitrary entries.
    pub fn list<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ListEntry>,
    {
        ErrorNode::List(entries.into_iter().map(Into::into).collect())
    }

    /// Returns the number of messages reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ErrorNode::Map(entries) => entries.values().map(ErrorNode::leaf_count).sum(),
            ErrorNode::List(items) => items
                .iter()
                .map(|item| match item {
                    ListEntry::Message(_) => 1,
                    ListEntry::Node(node) => node.leaf_count(),
                })
                .sum(),
        }
    }
}

/// An element of an [`ErrorNode::List`].
///
/// A string element is a message attached to the list's own path; anything
/// else is a nested node addressed by its index.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    /// A terminal message.
    Message(String),
    /// A nested mapping or list.
    Node(ErrorNode),
}

impl From<&str> for ListEntry {
    fn from(message: &str) -> Self {
        ListEntry::Message(message.to_string())
    }
}

impl From<String> for ListEntry {
    fn from(message: String) -> Self {
        ListEntry::Message(message)
    }
}

impl From<ErrorNode> for ListEntry {
    fn from(node: ErrorNode) -> Self {
        ListEntry::Node(node)
    }
}
