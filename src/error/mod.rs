//! Error types for normalization and dispatch failures.
//!
//! Normalization fails when the input structure is malformed; dispatch fails
//! when a fallible rule predicate reports an error. Both surface through
//! [`Error`] from the top-level entry points.

mod dispatch_error;
mod normalize_error;

pub use dispatch_error::{BoxError, DispatchError};
pub use normalize_error::NormalizeError;

/// Errors returned by [`process_errors`](crate::process_errors) and friends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The error structure could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// A rule aborted the dispatch pass.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
