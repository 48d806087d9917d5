//! Union ranking, optionals and literals.

use jsonie::{
    from_json, ConverterOptions, JsonicValue, ModuleType, ToJsonicConverter, TypeBuilder,
    TypeNode,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn t() -> TypeBuilder {
    TypeBuilder::new()
}

#[test]
fn union_prefers_exact_match_over_coercion() {
    let t = t();
    let cases = [
        (t.union(vec![t.int(), t.float()]), json!(1.2), JsonicValue::Float(1.2)),
        (t.union(vec![t.float(), t.int()]), json!(1.2), JsonicValue::Float(1.2)),
        (t.union(vec![t.int(), t.str()]), json!(1), JsonicValue::Int(1)),
        (t.union(vec![t.int(), t.str()]), json!("1"), JsonicValue::from("1")),
        (t.optional(t.union(vec![t.int(), t.str()])), json!("1"), JsonicValue::from("1")),
    ];
    for (type_, input, expected) in cases {
        assert_eq!(from_json(&type_, &input).ok(), Some(expected), "{type_} <- {input}");
    }
}

#[test]
fn optional_accepts_null() {
    let t = t();
    assert_eq!(from_json(&t.optional(t.int()), &json!(null)).ok(), Some(JsonicValue::Null));
    assert_eq!(from_json(&t.optional(t.int()), &json!(3)).ok(), Some(JsonicValue::Int(3)));
    assert_eq!(
        from_json(&t.optional(t.int()), &json!("3")).err().map(|e| e.to_string()),
        Some(r#"value has type string ("3") where number expected at /"#.into())
    );
}

#[test]
fn strings_are_not_sequences() {
    let t = t();
    let converter = ToJsonicConverter::new().with_options(ConverterOptions {
        prefer_immutable_types_for_nonmutable_sequence: true,
        ..ConverterOptions::default()
    });
    let seq = t.union(vec![t.str(), t.sequence(t.str())]);
    assert_eq!(converter.from_json(&seq, &json!("")).ok(), Some(JsonicValue::from("")));
    assert_eq!(converter.from_json(&seq, &json!("0")).ok(), Some(JsonicValue::from("0")));
    assert_eq!(converter.from_json(&seq, &json!([])).ok(), Some(JsonicValue::Tuple(vec![])));

    let list = t.union(vec![t.str(), t.list(t.str()), t.tuple_of(t.str())]);
    assert_eq!(converter.from_json(&list, &json!([])).ok(), Some(JsonicValue::List(vec![])));
}

#[test]
fn equal_scores_go_to_earliest_branch() {
    let t = t();
    let type_ = t.union(vec![t.tuple_of(t.int()), t.list(t.int())]);
    assert_eq!(
        from_json(&type_, &json!([1])).ok(),
        Some(JsonicValue::Tuple(vec![JsonicValue::Int(1)]))
    );
}

#[test]
fn exhausted_union_reports_once_at_union_path() {
    let t = t();
    let type_ = t.list(t.union(vec![t.int(), t.mapping(t.str(), t.int())]));
    let err = from_json(&type_, &json!([1, "x"])).err();
    assert_eq!(
        err.map(|e| e.to_string()),
        Some(r#"value has type string ("x") where any of number, or object of {string: number} expected at /1"#.into())
    );
}

#[test]
fn literals_match_by_value() {
    let t = t();
    let literals = t.literal(["A", "B", "C"]);
    let unioned = t.union(vec![t.literal(["A"]), t.literal(["B", "C"])]);
    for type_ in [&literals, &unioned] {
        for v in ["A", "B", "C"] {
            assert_eq!(from_json(type_, &json!(v)).ok(), Some(JsonicValue::from(v)));
        }
        assert!(from_json(type_, &json!("D")).is_err());
    }
    assert_eq!(
        from_json(&literals, &json!("D")).err().map(|e| e.to_string()),
        Some(r#"value is ("D") where any of A, B, or C expected at /"#.into())
    );
    assert_eq!(
        from_json(&t.literal([json!(1), json!(true)]), &json!(1.0)).ok(),
        Some(JsonicValue::Float(1.0))
    );
}

#[test]
fn literals_never_equate_booleans_and_numbers() {
    let t = t();
    assert!(from_json(&t.literal([json!(1)]), &json!(true)).is_err());
    assert!(from_json(&t.literal([json!(true)]), &json!(1)).is_err());
    assert_eq!(
        from_json(&t.literal([json!(true)]), &json!(true)).ok(),
        Some(JsonicValue::Bool(true))
    );
}

#[test]
fn long_coerced_branch_still_wins() {
    let t = t();
    let type_ = t.union(vec![t.list(t.float()), t.str()]);
    let input = Value::Array((0..2000).map(|i| json!(i)).collect());
    match from_json(&type_, &input) {
        Ok(JsonicValue::List(items)) => {
            assert_eq!(items.len(), 2000);
            assert_eq!(items[1999], JsonicValue::Float(1999.0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn long_exact_branch_beats_long_coerced_branch() {
    let t = t();
    let type_ = t.union(vec![t.list(t.float()), t.list(t.int())]);
    let input = Value::Array((0..5000).map(|i| json!(i)).collect());
    match from_json(&type_, &input) {
        Ok(JsonicValue::List(items)) => assert_eq!(items[4999], JsonicValue::Int(4999)),
        other => panic!("unexpected {other:?}"),
    }
}

fn json_module() -> ModuleType {
    let t = t();
    ModuleType::new().with_alias(
        "Json",
        t.union(vec![
            t.null(),
            t.bool(),
            t.int(),
            t.str(),
            t.list(t.ref_("Json")),
            t.mapping(t.str(), t.ref_("Json")),
        ]),
    )
}

#[test]
fn recursive_alias_converts_many_objects() {
    let converter = ToJsonicConverter::new().with_module(json_module());
    let input = Value::Array((0..1000).map(|i| json!({"k": i})).collect());
    match converter.from_json(&t().ref_("Json"), &input) {
        Ok(JsonicValue::List(items)) => {
            assert_eq!(items.len(), 1000);
            assert_eq!(items[999].get("k"), Some(&JsonicValue::Int(999)));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn exhausted_recursive_union_names_the_alias() {
    let t = t();
    let module = ModuleType::new().with_alias(
        "Json",
        t.union(vec![t.null(), t.int(), t.list(t.ref_("Json"))]),
    );
    let converter = ToJsonicConverter::new().with_module(module);
    let err = converter.from_json(&t.ref_("Json"), &json!([["x"]])).err();
    assert_eq!(
        err.map(|e| e.to_string()),
        Some(
            r#"value has type array ([["x"]]) where any of null, number, or array of any of null, number, or array of Json expected at /"#
                .into()
        )
    );
}

#[test]
fn union_looping_back_to_its_own_alias_is_reported() {
    let t = t();
    let module = ModuleType::new()
        .with_alias("A", t.union(vec![t.ref_("A"), t.int()]))
        .with_alias("B", t.list(t.ref_("A")));
    let converter = ToJsonicConverter::new().with_module(module);
    assert_eq!(
        converter.from_json(&t.ref_("A"), &json!("x")).err().map(|e| e.to_string()),
        Some("unresolvable reference A at /".into())
    );
    assert_eq!(
        converter.from_json(&t.ref_("B"), &json!([1])).err().map(|e| e.to_string()),
        Some("unresolvable reference A at /0".into())
    );
}

#[test]
fn literal_confidence_is_configurable() {
    let t = t();
    let type_ = t.union(vec![t.literal(["a"]), t.str()]);
    let converter = ToJsonicConverter::new().with_options(ConverterOptions {
        literal_confidence: 0.1,
        ..ConverterOptions::default()
    });
    // Both branches accept "a"; either way the value is the same, but the
    // score decides which branch produced it.
    let out = converter.convert_value(
        &mut jsonie::FailFastContext,
        &jsonie::JsonPointer::root(),
        &type_,
        &json!("a"),
    );
    assert_eq!(out.ok().map(|(_, score)| score), Some(0.1 * 2.0));

    let out = ToJsonicConverter::new().convert_value(
        &mut jsonie::FailFastContext,
        &jsonie::JsonPointer::root(),
        &type_,
        &json!("a"),
    );
    assert_eq!(out.ok().map(|(_, score)| score), Some(0.5 * 2.0 + 1.0));
}

fn branch(tag: usize) -> TypeNode {
    TypeBuilder::new().literal([format!("v{tag}")])
}

proptest! {
    #[test]
    fn matching_branch_wins_like_direct_conversion(n in 1usize..6, pick in 0usize..6) {
        let i = pick % n;
        let union = TypeBuilder::new().union((0..n).map(branch).collect());
        let input = json!(format!("v{i}"));
        let via_union = from_json(&union, &input).ok();
        let direct = from_json(&branch(i), &input).ok();
        prop_assert!(direct.is_some());
        prop_assert_eq!(via_union, direct);
    }
}
