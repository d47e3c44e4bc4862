//! Routing of normalized errors through an ordered rule list.
//!
//! For each error, rules are tested in order and the first one that matches
//! receives the error along with its match payload. Errors no rule claims go
//! to the unexpected-error handler. No error is ever delivered twice.

use crate::error::DispatchError;
use crate::normalize::NormalizedError;
use crate::rule::Rule;

/// Dispatches `errors` in order against `rules`.
///
/// Callbacks run synchronously on the caller's thread. A panic in a
/// predicate or callback unwinds through this function untouched.
///
/// # Errors
///
/// Returns [`DispatchError::Predicate`] as soon as a fallible predicate
/// fails; errors after that point are not dispatched.
///
/// # Example
///
/// ```rust
/// use triage::{dispatch, match_key, NormalizedError};
///
/// let errors = vec![
///     NormalizedError::new("name", "invalid!"),
///     NormalizedError::new("age", "too low"),
/// ];
/// let mut named = Vec::new();
/// let mut unexpected = Vec::new();
///
/// dispatch(
///     &errors,
///     &mut [match_key("name", |e, _| named.push(e.message.clone()))],
///     |e| unexpected.push(e.clone()),
/// )
/// .unwrap();
///
/// assert_eq!(named, vec!["invalid!"]);
/// assert_eq!(unexpected, vec![NormalizedError::new("age", "too low")]);
/// ```
pub fn dispatch<U>(
    errors: &[NormalizedError],
    rules: &mut [Rule<'_>],
    mut on_unexpected: U,
) -> Result<(), DispatchError>
where
    U: FnMut(&NormalizedError),
{
    let mut matched = 0usize;

    for error in errors {
        let mut claimed = false;

        for (index, rule) in rules.iter_mut().enumerate() {
            let outcome = rule.test(error).map_err(|source| DispatchError::Predicate {
                rule: index,
                path: error.path.clone(),
                source,
            })?;

            if let Some(data) = outcome {
                tracing::trace!(path = %error.path, rule = index, "error matched rule");
                rule.on_match(error, data);
                claimed = true;
                break;
            }
        }

        if claimed {
            matched += 1;
        } else {
            tracing::trace!(path = %error.path, "unexpected error");
            on_unexpected(error);
        }
    }

    tracing::debug!(
        total = errors.len(),
        matched,
        unexpected = errors.len() - matched,
        "dispatched errors"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::MatchData;
    use std::cell::RefCell;

    fn errors() -> Vec<NormalizedError> {
        vec![
            NormalizedError::new("name", "invalid!"),
            NormalizedError::new("name", "other problem!"),
        ]
    }

    #[test]
    fn test_no_rules_everything_unexpected() {
        let mut unexpected = Vec::new();
        dispatch(&errors(), &mut [], |e| unexpected.push(e.clone())).unwrap();
        assert_eq!(unexpected, errors());
    }

    #[test]
    fn test_first_match_wins() {
        let log = RefCell::new(Vec::new());
        let tested_second = RefCell::new(0);

        dispatch(
            &errors(),
            &mut [
                Rule::new(|e| e.message == "invalid!", |_, _| log.borrow_mut().push("first")),
                Rule::new(
                    |_| {
                        *tested_second.borrow_mut() += 1;
                        true
                    },
                    |_, _| log.borrow_mut().push("second"),
                ),
            ],
            |_| log.borrow_mut().push("unexpected"),
        )
        .unwrap();

        assert_eq!(*log.borrow(), vec!["first", "second"]);
        // The second rule is only consulted for the error the first rule skipped.
        assert_eq!(*tested_second.borrow(), 1);
    }

    #[test]
    fn test_payload_forwarded() {
        let mut payloads = Vec::new();
        dispatch(
            &errors()[..1],
            &mut [Rule::new(
                |e| (e.path == "name").then_some("boom"),
                |_, data| payloads.push(data),
            )],
            |_| {},
        )
        .unwrap();
        assert_eq!(payloads, vec![MatchData::Text("boom".to_string())]);
    }

    #[test]
    fn test_predicate_failure_aborts() {
        let mut seen = Vec::new();
        let err = dispatch(
            &errors(),
            &mut [Rule::try_new(
                |e| {
                    if e.message == "other problem!" {
                        Err("cannot classify")
                    } else {
                        Ok(false)
                    }
                },
                |_, _| {},
            )],
            |e| seen.push(e.message.clone()),
        )
        .unwrap_err();

        assert_eq!(seen, vec!["invalid!"]);
        match err {
            DispatchError::Predicate { rule, path, source } => {
                assert_eq!(rule, 0);
                assert_eq!(path, "name");
                assert_eq!(source.to_string(), "cannot classify");
            }
        }
    }
}
