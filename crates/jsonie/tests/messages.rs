//! Wording and location of violation reports.

use jsonie::{from_json, ErrorCollectingContext, ToJsonicConverter, TypeBuilder};
use serde_json::json;

fn t() -> TypeBuilder {
    TypeBuilder::new()
}

fn messages(type_: &jsonie::TypeNode, value: serde_json::Value) -> Vec<String> {
    let mut ctx = ErrorCollectingContext::new();
    let _ = ToJsonicConverter::new().convert(&mut ctx, type_, &value);
    ctx.into_errors().into_iter().map(|e| e.to_string()).collect()
}

#[test]
fn key_that_does_not_deduce_to_a_string() {
    let t = t();
    assert_eq!(
        messages(&t.mapping(t.bytes(), t.int()), json!({"dGVzdA==": 1, "eA==": 2})),
        [
            "key has type string, which deduces dGVzdA== into string at /",
            "key has type string, which deduces eA== into string at /",
        ]
    );
}

#[test]
fn mismatch_names_observed_and_expected_shapes() {
    let t = t();
    assert_eq!(
        messages(&t.mapping(t.str(), t.int()), json!([1])),
        ["value has type array ([1]) where a mapping of {string: number} expected at /"]
    );
    assert_eq!(
        messages(&t.set(t.decimal()), json!({"a": 1})),
        [r#"value has type object ({"a":1}) where an array of number or string expected at /"#]
    );
    assert_eq!(
        messages(&t.datetime(), json!(null)),
        ["value has type null (null) where number or string expected at /"]
    );
}

#[test]
fn errors_chain_their_cause() {
    let err = from_json(&TypeBuilder::new().datetime(), &json!("2020-13-45"));
    let err = match err {
        Err(e) => e,
        Ok(v) => panic!("unexpected {v:?}"),
    };
    assert_eq!(err.message(), r#"bad date time string ("2020-13-45")"#);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn describe_is_total() {
    let t = t();
    let converter = ToJsonicConverter::new();
    let deep = (0..100).fold(t.int(), |acc, _| t.list(acc));
    assert!(converter.describe(&deep).starts_with("array of array of"));
    assert!(converter.describe(&deep).contains("unknown type: "));
    assert_eq!(
        converter.describe(&t.named_tuple("P").prop("x", t.int()).into_node()),
        "object or array"
    );
}
