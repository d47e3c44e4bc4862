//! Integration tests for JSON error documents.

use serde_json::json;
use triage::{
    normalize, process_json, ErrorTree, LeafPolicy, NormalizeError, NormalizedError,
    ProcessOptions,
};

#[test]
fn test_document_round_trip_shape() {
    let doc = json!({
        "title": ["can't be blank"],
        "author": { "email": ["has invalid format", "is too long"] },
        "comments": [{}, { "body": ["is too short"] }]
    });

    let tree = ErrorTree::try_from(&doc).unwrap();
    assert_eq!(tree.to_json(), doc);
    assert_eq!(tree.leaf_count(), 4);
}

#[test]
fn test_document_order_drives_output_order() {
    let doc = json!({ "zeta": ["last in alphabet"], "alpha": ["first in alphabet"] });
    let errors = normalize(&ErrorTree::try_from(&doc).unwrap()).unwrap();

    assert_eq!(
        errors,
        vec![
            NormalizedError::new("zeta", "last in alphabet"),
            NormalizedError::new("alpha", "first in alphabet"),
        ]
    );
}

#[test]
fn test_empty_nested_entries_produce_nothing() {
    let doc = json!({ "comments": [{}, [], { "body": [] }] });
    let errors = normalize(&ErrorTree::try_from(&doc).unwrap()).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_stringify_policy_end_to_end() {
    let options = ProcessOptions::new().leaf_policy(LeafPolicy::Stringify);
    let mut unexpected = Vec::new();

    process_json(
        &options,
        &json!({ "code": [404], "flag": false, "items": [null, { "x": ["y"] }] }),
        &mut [],
        |e| unexpected.push(e.to_string()),
    )
    .unwrap();

    assert_eq!(
        unexpected,
        vec!["code: 404", "flag: false", "items: null", "items.1.x: y"]
    );
}

#[test]
fn test_reject_policy_names_offending_kind() {
    let err = ErrorTree::from_json(&json!({ "flag": true }), LeafPolicy::Reject).unwrap_err();
    match err {
        NormalizeError::InvalidNode { path, found, .. } => {
            assert_eq!(path.to_string(), "flag");
            assert_eq!(found, "boolean");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_root_must_be_object() {
    assert!(ErrorTree::try_from(&json!("oops")).is_err());
    assert!(ErrorTree::try_from(&json!(["oops"])).is_err());
}
