//! Top-level entry points: normalize, then dispatch.

use serde_json::Value;

use crate::dispatch::dispatch;
use crate::node::ErrorTree;
use crate::normalize::{NormalizedError, Normalizer};
use crate::options::ProcessOptions;
use crate::rule::Rule;
use crate::TriageResult;

/// Flattens `errors`, routes every flattened error through `rules`, and
/// returns the complete flattened list.
///
/// `None` is treated as an empty tree. The returned list does not depend on
/// which errors matched; routing is observable only through the callbacks.
///
/// # Errors
///
/// Returns [`Error::Normalize`] if the tree cannot be flattened (nothing is
/// dispatched in that case) and [`Error::Dispatch`] if a fallible predicate
/// fails.
///
/// [`Error::Normalize`]: crate::Error::Normalize
/// [`Error::Dispatch`]: crate::Error::Dispatch
///
/// # Example
///
/// ```rust
/// use triage::{process_errors, ErrorNode, ErrorTree};
///
/// let tree = ErrorTree::new()
///     .with("name", ErrorNode::messages(["invalid!"]))
///     .with("nested", ErrorNode::map([("user_id", ErrorNode::messages(["not an int"]))]))
///     .with(
///         "nestedList",
///         ErrorNode::list([
///             ErrorNode::map([("something", ErrorNode::messages(["is wrong"]))]),
///             ErrorNode::map([(
///                 "very",
///                 ErrorNode::list([ErrorNode::map([("nested", ErrorNode::messages(["list"]))])]),
///             )]),
///         ]),
///     );
///
/// let mut unexpected = Vec::new();
/// let result = process_errors(Some(&tree), &mut [], |e| unexpected.push(e.clone())).unwrap();
///
/// assert_eq!(result[2], ("nestedList.0.something", "is wrong"));
/// assert_eq!(result[3], ("nestedList.1.very.0.nested", "list"));
/// assert_eq!(result, unexpected);
/// ```
pub fn process_errors<U>(
    errors: Option<&ErrorTree>,
    rules: &mut [Rule<'_>],
    on_unexpected: U,
) -> TriageResult<Vec<NormalizedError>>
where
    U: FnMut(&NormalizedError),
{
    process_errors_with(&ProcessOptions::default(), errors, rules, on_unexpected)
}

/// Like [`process_errors`], with explicit [`ProcessOptions`].
///
/// # Errors
///
/// See [`process_errors`].
pub fn process_errors_with<U>(
    options: &ProcessOptions,
    errors: Option<&ErrorTree>,
    rules: &mut [Rule<'_>],
    on_unexpected: U,
) -> TriageResult<Vec<NormalizedError>>
where
    U: FnMut(&NormalizedError),
{
    let empty = ErrorTree::new();
    let tree = errors.unwrap_or(&empty);

    let normalized = Normalizer::new(*options).normalize(tree)?;
    dispatch(&normalized, rules, on_unexpected)?;
    Ok(normalized)
}

/// Converts a JSON error document and processes it.
///
/// `null` is treated as an empty tree. Malformed leaves are handled
/// according to `options.leaf_policy`, and `options.max_depth` bounds both
/// the conversion and the normalization.
///
/// # Errors
///
/// Returns [`Error::Normalize`] if the document is not a valid error
/// structure, otherwise as [`process_errors`].
///
/// [`Error::Normalize`]: crate::Error::Normalize
///
/// # Example
///
/// ```rust
/// use triage::{match_key_value_equal, process_json, ProcessOptions};
/// use serde_json::json;
///
/// let mut matched = 0;
/// let mut unexpected = Vec::new();
///
/// let result = process_json(
///     &ProcessOptions::default(),
///     &json!({ "name": ["invalid!", "other problem!"] }),
///     &mut [match_key_value_equal("name", "invalid!", |_, _| matched += 1)],
///     |e| unexpected.push(e.to_pair_json()),
/// )
/// .unwrap();
///
/// assert_eq!(result.len(), 2);
/// assert_eq!(matched, 1);
/// assert_eq!(unexpected, vec![json!(["name", "other problem!"])]);
/// ```
pub fn process_json<U>(
    options: &ProcessOptions,
    document: &Value,
    rules: &mut [Rule<'_>],
    on_unexpected: U,
) -> TriageResult<Vec<NormalizedError>>
where
    U: FnMut(&NormalizedError),
{
    let tree = ErrorTree::from_json_with(document, options)?;
    process_errors_with(options, Some(&tree), rules, on_unexpected)
}
