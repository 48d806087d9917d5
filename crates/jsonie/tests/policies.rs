//! Fail-fast, collect-all and bounded policies.

use indexmap::IndexMap;
use jsonie::{
    BoundedErrorContext, ErrorCollectingContext, FailFastContext, JsonicSet, JsonicValue, Record,
    ToJsonicConverter, TypeBuilder,
};
use serde_json::json;

fn t() -> TypeBuilder {
    TypeBuilder::new()
}

#[test]
fn fail_fast_stops_at_first_violation() {
    let converter = ToJsonicConverter::new();
    let err = converter
        .convert(&mut FailFastContext, &t().list(t().int()), &json!(["a", "b"]))
        .err();
    assert_eq!(err.map(|e| e.pointer().render()), Some("/0".into()));
}

#[test]
fn collect_all_reports_every_violation_in_order() {
    let t = t();
    let rec = t
        .record("Point")
        .prop("x", t.int())
        .prop("y", t.list(t.int()))
        .into_node();
    let mut ctx = ErrorCollectingContext::new();
    let out = ToJsonicConverter::new().convert(&mut ctx, &rec, &json!({"x": "1", "y": [1, "2", "3"]}));
    assert!(out.is_ok());
    let pointers: Vec<_> = ctx.errors().iter().map(|e| e.pointer().render()).collect();
    assert_eq!(pointers, ["/x", "/y/1", "/y/2"]);
}

#[test]
fn collect_all_reports_one_violation_per_extra_duplicate() {
    let mut ctx = ErrorCollectingContext::new();
    let out = ToJsonicConverter::new().convert(&mut ctx, &t().set(t().int()), &json!([1, 2, 1, 1, 2]));
    let expected: JsonicSet = [1, 2].into_iter().map(JsonicValue::Int).collect();
    assert_eq!(out.ok(), Some(JsonicValue::Set(expected)));
    let messages: Vec<_> = ctx.into_errors().into_iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        [
            "identical item 1 already occurred at index 0 at /2",
            "identical item 1 already occurred at index 0 at /3",
            "identical item 2 already occurred at index 1 at /4",
        ]
    );
}

#[test]
fn union_branch_violations_never_reach_the_policy() {
    let t = t();
    let mut ctx = ErrorCollectingContext::new();
    let type_ = t.union(vec![t.int(), t.str()]);
    let out = ToJsonicConverter::new().convert(&mut ctx, &type_, &json!("x"));
    assert_eq!(out.ok(), Some(JsonicValue::from("x")));
    assert!(ctx.errors().is_empty());
}

#[test]
fn bounded_policy_abandons_the_composite() {
    let mut ctx = BoundedErrorContext::new(2);
    let out = ToJsonicConverter::new().convert(
        &mut ctx,
        &t().list(t().int()),
        &json!(["a", "b", "c", "d"]),
    );
    match out {
        Ok(JsonicValue::List(items)) => assert_eq!(items.len(), 2),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(ctx.errors().len(), 2);
}

#[test]
fn bounded_policy_returns_partial_structure() {
    let t = t();
    let type_ = t.tuple(vec![t.list(t.int()), t.str()]);
    let mut ctx = BoundedErrorContext::new(1);
    let out = ToJsonicConverter::new().convert(&mut ctx, &type_, &json!([["a", 1], "z"]));
    match out {
        Ok(JsonicValue::Tuple(items)) => assert_eq!(items.len(), 1),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(ctx.into_errors().len(), 1);
}

#[test]
fn bounded_policy_abandons_a_set() {
    let mut ctx = BoundedErrorContext::new(1);
    let out = ToJsonicConverter::new().convert(&mut ctx, &t().set(t().int()), &json!([1, 1, 2, 3]));
    let expected: JsonicSet = [JsonicValue::Int(1)].into_iter().collect();
    assert_eq!(out.ok(), Some(JsonicValue::Set(expected)));
    let pointers: Vec<_> = ctx.errors().iter().map(|e| e.pointer().render()).collect();
    assert_eq!(pointers, ["/1"]);
}

#[test]
fn bounded_policy_abandons_a_mapping() {
    let t = t();
    let mut ctx = BoundedErrorContext::new(1);
    let out = ToJsonicConverter::new().convert(
        &mut ctx,
        &t.mapping(t.str(), t.int()),
        &json!({"a": "x", "b": 2, "c": 3}),
    );
    let expected: IndexMap<String, JsonicValue> = [("a".to_string(), JsonicValue::Null)].into_iter().collect();
    assert_eq!(out.ok(), Some(JsonicValue::Object(expected)));
    let pointers: Vec<_> = ctx.errors().iter().map(|e| e.pointer().render()).collect();
    assert_eq!(pointers, ["/a"]);
}

#[test]
fn bounded_policy_abandons_a_record() {
    let t = t();
    let rec = t.record("R").prop("a", t.int()).prop("b", t.int()).into_node();
    let mut ctx = BoundedErrorContext::new(1);
    let out = ToJsonicConverter::new().convert(&mut ctx, &rec, &json!({"a": "x", "b": 2}));
    let expected = Record::new("R").with_field("a", JsonicValue::Null);
    assert_eq!(out.ok(), Some(JsonicValue::Record(expected)));
    assert_eq!(ctx.errors().len(), 1);

    let mut ctx = ErrorCollectingContext::new();
    let out = ToJsonicConverter::new().convert(&mut ctx, &rec, &json!({"a": "x", "b": 2}));
    let expected = Record::new("R")
        .with_field("a", JsonicValue::Null)
        .with_field("b", JsonicValue::Int(2));
    assert_eq!(out.ok(), Some(JsonicValue::Record(expected)));
}

#[test]
fn bounded_policy_abandons_a_typed_dict() {
    let t = t();
    let td = t.typed_dict("TD").prop("a", t.int()).prop("b", t.int()).into_node();
    let mut ctx = BoundedErrorContext::new(1);
    let out = ToJsonicConverter::new().convert(&mut ctx, &td, &json!({"a": "x", "b": 2}));
    let expected: IndexMap<String, JsonicValue> = [("a".to_string(), JsonicValue::Null)].into_iter().collect();
    assert_eq!(out.ok(), Some(JsonicValue::Object(expected)));
    let pointers: Vec<_> = ctx.errors().iter().map(|e| e.pointer().render()).collect();
    assert_eq!(pointers, ["/a"]);
}
