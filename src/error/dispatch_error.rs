//! Failures raised by rules during dispatch.

/// Boxed error returned by fallible rule predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A rule predicate failed; dispatch stops at the first failure.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The predicate of rule `rule` returned an error for the error at `path`.
    #[error("rule {rule} failed on '{path}': {source}")]
    Predicate {
        /// Zero-based position of the rule in the rule list.
        rule: usize,
        /// Path of the normalized error being tested.
        path: String,
        /// The predicate's error.
        #[source]
        source: BoxError,
    },
}

// DispatchError is Send + Sync since the boxed source carries both bounds.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DispatchError>();
    assert_sync::<DispatchError>();
};
