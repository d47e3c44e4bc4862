//! Matching rules for routing normalized errors.
//!
//! A [`Rule`] pairs a test predicate with a match callback. The predicate's
//! return value is both the gate and the payload: anything that converts to
//! `Some(MatchData)` through [`IntoMatch`] is a match, and that data is handed
//! to the callback.
//!
//! # Example
//!
//! ```rust
//! use triage::{match_regex, MatchData, Rule};
//!
//! // Plain boolean predicate.
//! let blank = Rule::new(|e| e.message == "can't be blank", |e, _| println!("{} missing", e.path));
//!
//! // Predicate that also extracts data.
//! let one_of = match_regex("type", r"must be one of (.*)", |_, data: MatchData| {
//!     let allowed = data.capture(1).unwrap_or_default();
//!     println!("types may only be {}", allowed);
//! })
//! .unwrap();
//! # let _ = (blank, one_of);
//! ```

use std::fmt;

use regex::Regex;
use serde_json::Value;

use crate::error::BoxError;
use crate::normalize::NormalizedError;

/// Payload produced by a matching predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchData {
    /// The predicate returned plain `true`.
    Matched,
    /// The predicate returned a non-empty string.
    Text(String),
    /// Captured groups, e.g. from a regex; unmatched groups are `None`.
    Captures(Vec<Option<String>>),
    /// Any other truthy JSON value.
    Value(Value),
}

impl MatchData {
    /// Returns the text payload, if this is [`MatchData::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MatchData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the captured groups, if this is [`MatchData::Captures`].
    pub fn captures(&self) -> Option<&[Option<String>]> {
        match self {
            MatchData::Captures(groups) => Some(groups),
            _ => None,
        }
    }

    /// Returns capture group `index`, if present and matched.
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures()?.get(index)?.as_deref()
    }

    /// Returns the JSON payload, if this is [`MatchData::Value`].
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            MatchData::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Encodes the payload as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            MatchData::Matched => Value::Bool(true),
            MatchData::Text(text) => Value::String(text.clone()),
            MatchData::Captures(groups) => groups
                .iter()
                .map(|g| g.clone().map_or(Value::Null, Value::String))
                .collect(),
            MatchData::Value(value) => value.clone(),
        }
    }
}

/// Conversion of a predicate result into an optional match payload.
///
/// `None` means "no match". Truthiness follows the usual dynamic-language
/// conventions: `false`, empty strings, `null` and `0` do not match.
pub trait IntoMatch {
    /// Converts `self` into a match payload, or `None` for no match.
    fn into_match(self) -> Option<MatchData>;
}

impl IntoMatch for bool {
    fn into_match(self) -> Option<MatchData> {
        self.then_some(MatchData::Matched)
    }
}

impl IntoMatch for MatchData {
    fn into_match(self) -> Option<MatchData> {
        Some(self)
    }
}

impl<T: IntoMatch> IntoMatch for Option<T> {
    fn into_match(self) -> Option<MatchData> {
        self.and_then(IntoMatch::into_match)
    }
}

impl IntoMatch for &str {
    fn into_match(self) -> Option<MatchData> {
        (!self.is_empty()).then(|| MatchData::Text(self.to_string()))
    }
}

impl IntoMatch for String {
    fn into_match(self) -> Option<MatchData> {
        (!self.is_empty()).then_some(MatchData::Text(self))
    }
}

impl IntoMatch for Vec<String> {
    fn into_match(self) -> Option<MatchData> {
        Some(MatchData::Captures(self.into_iter().map(Some).collect()))
    }
}

impl IntoMatch for Vec<Option<String>> {
    fn into_match(self) -> Option<MatchData> {
        Some(MatchData::Captures(self))
    }
}

impl IntoMatch for regex::Captures<'_> {
    fn into_match(self) -> Option<MatchData> {
        Some(MatchData::Captures(
            self.iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        ))
    }
}

impl IntoMatch for Value {
    fn into_match(self) -> Option<MatchData> {
        let truthy = match &self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        truthy.then_some(MatchData::Value(self))
    }
}

type TestFn<'a> = Box<dyn Fn(&NormalizedError) -> Result<Option<MatchData>, BoxError> + 'a>;
type MatchFn<'a> = Box<dyn FnMut(&NormalizedError, MatchData) + 'a>;

/// A predicate and the callback to run when it matches.
pub struct Rule<'a> {
    test: TestFn<'a>,
    on_match: MatchFn<'a>,
}

impl<'a> Rule<'a> {
    /// Creates a rule from an infallible predicate.
    pub fn new<T, R, F>(test: T, on_match: F) -> Self
    where
        T: Fn(&NormalizedError) -> R + 'a,
        R: IntoMatch,
        F: FnMut(&NormalizedError, MatchData) + 'a,
    {
        Self {
            test: Box::new(move |error: &NormalizedError| Ok(test(error).into_match())),
            on_match: Box::new(on_match),
        }
    }

    /// Creates a rule from a fallible predicate.
    ///
    /// An `Err` from the predicate aborts the whole dispatch pass with
    /// [`DispatchError::Predicate`](crate::DispatchError::Predicate).
    pub fn try_new<T, R, E, F>(test: T, on_match: F) -> Self
    where
        T: Fn(&NormalizedError) -> Result<R, E> + 'a,
        R: IntoMatch,
        E: Into<BoxError>,
        F: FnMut(&NormalizedError, MatchData) + 'a,
    {
        Self {
            test: Box::new(move |error: &NormalizedError| {
                test(error)
                    .map(IntoMatch::into_match)
                    .map_err(Into::<BoxError>::into)
            }),
            on_match: Box::new(on_match),
        }
    }

    /// Runs the predicate against `error`.
    ///
    /// # Errors
    ///
    /// Returns the predicate's error for rules built with [`Rule::try_new`].
    pub fn test(&self, error: &NormalizedError) -> Result<Option<MatchData>, BoxError> {
        (self.test)(error)
    }

    /// Runs the match callback.
    pub fn on_match(&mut self, error: &NormalizedError, data: MatchData) {
        (self.on_match)(error, data)
    }
}

impl fmt::Debug for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}

/// Matches an error whose path and message both equal the given literals.
///
/// Equality is typed: a `value` that is not a JSON string (for example the
/// number `0`) never matches a message, even one that reads `"0"`.
///
/// # Example
///
/// ```rust
/// use triage::{match_key_value_equal, process_errors, ErrorNode, ErrorTree};
///
/// let tree = ErrorTree::new().with("user", ErrorNode::messages(["not found"]));
/// let mut found = false;
///
/// process_errors(
///     Some(&tree),
///     &mut [match_key_value_equal("user", "not found", |_, _| found = true)],
///     |e| panic!("unexpected {}", e),
/// )
/// .unwrap();
///
/// assert!(found);
/// ```
pub fn match_key_value_equal<'a, F>(
    key: impl Into<String>,
    value: impl Into<Value>,
    on_match: F,
) -> Rule<'a>
where
    F: FnMut(&NormalizedError, MatchData) + 'a,
{
    let key = key.into();
    let value = value.into();
    Rule::new(
        move |error: &NormalizedError| {
            error.path == key && value.as_str() == Some(error.message.as_str())
        },
        on_match,
    )
}

/// Matches every error at exactly `key`, whatever its message.
pub fn match_key<'a, F>(key: impl Into<String>, on_match: F) -> Rule<'a>
where
    F: FnMut(&NormalizedError, MatchData) + 'a,
{
    let key = key.into();
    Rule::new(move |error: &NormalizedError| error.path == key, on_match)
}

/// Matches errors at `key` whose message matches `pattern`.
///
/// The payload is [`MatchData::Captures`]: group 0 is the whole match,
/// followed by each capture group.
///
/// # Errors
///
/// Returns the regex compilation error if `pattern` is invalid.
pub fn match_regex<'a, F>(
    key: impl Into<String>,
    pattern: &str,
    on_match: F,
) -> Result<Rule<'a>, regex::Error>
where
    F: FnMut(&NormalizedError, MatchData) + 'a,
{
    let key = key.into();
    let regex = Regex::new(pattern)?;
    Ok(Rule::new(
        move |error: &NormalizedError| {
            if error.path != key {
                return None;
            }
            regex.captures(&error.message).into_match()
        },
        on_match,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error(path: &str, message: &str) -> NormalizedError {
        NormalizedError::new(path, message)
    }

    #[test]
    fn test_bool_truthiness() {
        assert_eq!(true.into_match(), Some(MatchData::Matched));
        assert_eq!(false.into_match(), None);
    }

    #[test]
    fn test_string_truthiness() {
        assert_eq!("boom".into_match(), Some(MatchData::Text("boom".to_string())));
        assert_eq!("".into_match(), None);
        assert_eq!(String::new().into_match(), None);
    }

    #[test]
    fn test_json_truthiness() {
        assert_eq!(json!(null).into_match(), None);
        assert_eq!(json!(0).into_match(), None);
        assert_eq!(json!("").into_match(), None);
        assert_eq!(json!(false).into_match(), None);
        assert_eq!(json!([]).into_match(), Some(MatchData::Value(json!([]))));
        assert_eq!(json!(7).into_match(), Some(MatchData::Value(json!(7))));
    }

    #[test]
    fn test_option_passthrough() {
        assert_eq!(Some("x").into_match(), Some(MatchData::Text("x".to_string())));
        assert_eq!(None::<&str>.into_match(), None);
        assert_eq!(Some(false).into_match(), None);
    }

    #[test]
    fn test_rule_forwards_payload() {
        let rule = Rule::new(|e| (e.path == "name").then_some("boom"), |_, _| {});
        assert_eq!(
            rule.test(&error("name", "x")).unwrap(),
            Some(MatchData::Text("boom".to_string()))
        );
        assert_eq!(rule.test(&error("other", "x")).unwrap(), None);
    }

    #[test]
    fn test_try_new_propagates_error() {
        let rule = Rule::try_new(
            |e| {
                if e.message.is_empty() {
                    Err("empty message")
                } else {
                    Ok(true)
                }
            },
            |_, _| {},
        );
        assert!(rule.test(&error("a", "")).is_err());
        assert_eq!(rule.test(&error("a", "b")).unwrap(), Some(MatchData::Matched));
    }

    #[test]
    fn test_key_value_equal_is_typed() {
        let numeric = match_key_value_equal("other", 0, |_, _| {});
        assert_eq!(numeric.test(&error("other", "0")).unwrap(), None);

        let text = match_key_value_equal("other", "0", |_, _| {});
        assert_eq!(text.test(&error("other", "0")).unwrap(), Some(MatchData::Matched));
        assert_eq!(text.test(&error("other", "1")).unwrap(), None);
        assert_eq!(text.test(&error("another", "0")).unwrap(), None);
    }

    #[test]
    fn test_match_key() {
        let rule = match_key("name", |_, _| {});
        assert!(rule.test(&error("name", "anything")).unwrap().is_some());
        assert!(rule.test(&error("name.0", "anything")).unwrap().is_none());
    }

    #[test]
    fn test_match_regex_captures() {
        let rule = match_regex("type", r"must be one of (.*)", |_, _| {}).unwrap();
        let data = rule
            .test(&error("type", "must be one of public, private"))
            .unwrap()
            .unwrap();
        assert_eq!(data.capture(0), Some("must be one of public, private"));
        assert_eq!(data.capture(1), Some("public, private"));
        assert_eq!(data.capture(2), None);

        assert!(rule.test(&error("type", "is invalid")).unwrap().is_none());
        assert!(rule
            .test(&error("kind", "must be one of a, b"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_match_regex_invalid_pattern() {
        assert!(match_regex("type", r"(unclosed", |_, _| {}).is_err());
    }

    #[test]
    fn test_match_data_json() {
        assert_eq!(MatchData::Matched.to_json(), json!(true));
        assert_eq!(
            MatchData::Captures(vec![Some("a".into()), None]).to_json(),
            json!(["a", null])
        );
    }
}
