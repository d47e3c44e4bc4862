//! Interoperability with other error formats.
//!
//! This module converts JSON error documents, as emitted by web backends
//! that serialize their changeset or model errors, into [`ErrorTree`]s and
//! back.
//!
//! [`ErrorTree`]: crate::ErrorTree

pub mod json;
