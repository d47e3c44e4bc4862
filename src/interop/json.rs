//! JSON conversion for error trees.
//!
//! A JSON error document has the familiar shape
//! `{"field": ["message", ...], "embedded": {...}, "items": [{...}, ...]}`.
//! Strings inside arrays are messages; objects and arrays nest. Key order is
//! preserved from the document.

use serde_json::{Map, Value};

use crate::error::NormalizeError;
use crate::node::{ErrorNode, ErrorTree, ListEntry};
use crate::options::{LeafPolicy, ProcessOptions};
use crate::path::ErrorPath;

const NODE_EXPECTED: &str = "object or array";
const ENTRY_EXPECTED: &str = "message string, object or array";

impl ErrorTree {
    /// Builds a tree from a JSON document.
    ///
    /// `null` yields an empty tree. Any other non-object root is rejected
    /// regardless of `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::InvalidNode`] for a non-object root and,
    /// under [`LeafPolicy::Reject`], for any scalar outside a message
    /// position.
    ///
    /// # Example
    ///
    /// ```rust
    /// use triage::{ErrorTree, LeafPolicy};
    /// use serde_json::json;
    ///
    /// let doc = json!({ "age": [18], "name": "blank" });
    ///
    /// assert!(ErrorTree::from_json(&doc, LeafPolicy::Reject).is_err());
    ///
    /// let tree = ErrorTree::from_json(&doc, LeafPolicy::Stringify).unwrap();
    /// assert_eq!(tree.to_json(), json!({ "age": ["18"], "name": ["blank"] }));
    /// ```
    pub fn from_json(value: &Value, policy: LeafPolicy) -> Result<Self, NormalizeError> {
        Self::from_json_with(value, &ProcessOptions::new().leaf_policy(policy))
    }

    /// Builds a tree from a JSON document using the leaf policy and depth
    /// limit of `options`.
    ///
    /// Depth is counted as in [`Normalizer`](crate::Normalizer), and the
    /// document is never visited below the limit.
    ///
    /// # Errors
    ///
    /// As [`ErrorTree::from_json`], plus [`NormalizeError::MaxDepthExceeded`]
    /// when the document nests deeper than `options.max_depth`.
    pub fn from_json_with(value: &Value, options: &ProcessOptions) -> Result<Self, NormalizeError> {
        match value {
            Value::Null => Ok(ErrorTree::new()),
            Value::Object(map) => {
                let converter = Converter {
                    policy: options.leaf_policy,
                    max_depth: options.max_depth,
                };
                let root = ErrorPath::root();
                map.iter()
                    .map(|(key, value)| {
                        let node = converter.node(value, &root.push_key(key.as_str()), 1)?;
                        Ok::<_, NormalizeError>((key.clone(), node))
                    })
                    .collect()
            }
            other => Err(NormalizeError::InvalidNode {
                path: ErrorPath::root(),
                expected: "object",
                found: kind(other),
            }),
        }
    }

    /// Encodes the tree as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(map_to_json(self.iter()))
    }
}

impl TryFrom<&Value> for ErrorTree {
    type Error = NormalizeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        ErrorTree::from_json(value, LeafPolicy::Reject)
    }
}

impl ErrorNode {
    /// Encodes the node as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            ErrorNode::Map(entries) => Value::Object(map_to_json(entries.iter())),
            ErrorNode::List(items) => items
                .iter()
                .map(|item| match item {
                    ListEntry::Message(message) => Value::String(message.clone()),
                    ListEntry::Node(node) => node.to_json(),
                })
                .collect(),
        }
    }
}

fn map_to_json<'a>(
    entries: impl Iterator<Item = (&'a String, &'a ErrorNode)>,
) -> Map<String, Value> {
    entries
        .map(|(key, node)| (key.clone(), node.to_json()))
        .collect()
}

struct Converter {
    policy: LeafPolicy,
    max_depth: Option<usize>,
}

impl Converter {
    /// Converts a value in node position (a mapping value).
    fn node(
        &self,
        value: &Value,
        path: &ErrorPath,
        depth: usize,
    ) -> Result<ErrorNode, NormalizeError> {
        if let Some(max_depth) = self.max_depth {
            if depth > max_depth {
                return Err(NormalizeError::MaxDepthExceeded {
                    path: path.clone(),
                    max_depth,
                });
            }
        }

        match value {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let node = self.node(value, &path.push_key(key.as_str()), depth + 1)?;
                    Ok::<_, NormalizeError>((key.clone(), node))
                })
                .collect::<Result<_, NormalizeError>>()
                .map(ErrorNode::Map),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.entry(item, path, i, depth))
                .collect::<Result<_, NormalizeError>>()
                .map(ErrorNode::List),
            scalar => match self.policy {
                LeafPolicy::Reject => Err(NormalizeError::InvalidNode {
                    path: path.clone(),
                    expected: NODE_EXPECTED,
                    found: kind(scalar),
                }),
                LeafPolicy::Stringify => Ok(ErrorNode::List(vec![ListEntry::Message(
                    stringify(scalar),
                )])),
            },
        }
    }

    /// Converts element `index` of the array at `path`, which sits at `depth`.
    fn entry(
        &self,
        value: &Value,
        path: &ErrorPath,
        index: usize,
        depth: usize,
    ) -> Result<ListEntry, NormalizeError> {
        match value {
            Value::String(message) => Ok(ListEntry::Message(message.clone())),
            Value::Object(_) | Value::Array(_) => Ok(ListEntry::Node(self.node(
                value,
                &path.push_index(index),
                depth + 1,
            )?)),
            scalar => match self.policy {
                LeafPolicy::Reject => Err(NormalizeError::InvalidNode {
                    path: path.push_index(index),
                    expected: ENTRY_EXPECTED,
                    found: kind(scalar),
                }),
                LeafPolicy::Stringify => Ok(ListEntry::Message(stringify(scalar))),
            },
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
