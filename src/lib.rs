//! # Triage
//!
//! Flattens nested validation errors into `(path, message)` pairs and routes
//! each pair through an ordered list of matching rules.
//!
//! ## Overview
//!
//! Model and changeset validation layers report failures as nested
//! structures: a mapping from field names to message lists, embedded
//! mappings, and lists of nested errors for repeated fields. Application
//! code usually wants to handle a few known errors specially and report
//! everything else. Triage does both in one call:
//!
//! 1. The [`Normalizer`] walks the structure depth-first and produces one
//!    [`NormalizedError`] per message, with a dotted path such as
//!    `nestedList.1.very.0.nested`.
//! 2. [`dispatch`] tests each error against the [`Rule`]s in order. The first
//!    match wins and receives the predicate's [`MatchData`]; errors no rule
//!    claims go to the unexpected-error handler.
//!
//! ## Core Types
//!
//! - [`ErrorTree`], [`ErrorNode`], [`ListEntry`]: the raw nested structure
//! - [`ErrorPath`]: structured paths, rendered with a [`PathStyle`]
//! - [`NormalizedError`]: a flat `(path, message)` pair
//! - [`Rule`]: a predicate plus match callback
//! - [`ProcessOptions`]: separator, key escaping, leaf policy, depth limit
//!
//! ## Example
//!
//! ```rust
//! use triage::{match_key_value_equal, match_regex, process_json, ProcessOptions};
//! use serde_json::json;
//! use std::cell::RefCell;
//!
//! let messages = RefCell::new(Vec::new());
//! let mut unexpected = Vec::new();
//!
//! let errors = json!({
//!     "user": ["not authenticated"],
//!     "type": ["must be one of public, private"],
//!     "title": ["can't be blank"],
//! });
//!
//! let normalized = process_json(
//!     &ProcessOptions::default(),
//!     &errors,
//!     &mut [
//!         match_key_value_equal("user", "not authenticated", |_, _| {
//!             messages.borrow_mut().push("user not authenticated".to_string())
//!         }),
//!         match_regex("type", r"must be one of (.*)", |_, data| {
//!             let allowed = data.capture(1).unwrap_or_default();
//!             messages.borrow_mut().push(format!("types may only be {}", allowed));
//!         })
//!         .unwrap(),
//!     ],
//!     |e| unexpected.push(e.to_string()),
//! )
//! .unwrap();
//!
//! assert_eq!(normalized.len(), 3);
//! assert_eq!(
//!     messages.into_inner(),
//!     vec!["user not authenticated", "types may only be public, private"]
//! );
//! assert_eq!(unexpected, vec!["title: can't be blank"]);
//! ```

pub mod dispatch;
pub mod error;
pub mod interop;
pub mod node;
pub mod normalize;
pub mod options;
pub mod path;
pub mod process;
pub mod rule;

pub use dispatch::dispatch;
pub use error::{BoxError, DispatchError, Error, NormalizeError};
pub use node::{ErrorNode, ErrorTree, ListEntry};
pub use normalize::{normalize, NormalizedError, Normalizer};
pub use options::{LeafPolicy, ProcessOptions};
pub use path::{ErrorPath, PathSegment, PathStyle};
pub use process::{process_errors, process_errors_with, process_json};
pub use rule::{match_key, match_key_value_equal, match_regex, IntoMatch, MatchData, Rule};

/// Type alias for results returned by the top-level entry points.
pub type TriageResult<T> = std::result::Result<T, Error>;
