use jsonie_pointer::{JsonPointer, PathComponent};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;

#[test]
fn test_parse_then_render() {
    assert_eq!(JsonPointer::parse("/a/b/0").render(), "/a/b/0");
}

#[test]
fn test_append_then_render() {
    assert_eq!(JsonPointer::root().append("a").append(0usize).render(), "/a/0");
}

#[test]
fn test_structural_hash() {
    let mut seen = HashSet::new();
    seen.insert(JsonPointer::parse("/x/1"));
    assert!(seen.contains(&JsonPointer::root().append("x").append(1i64)));
    assert!(!seen.contains(&JsonPointer::root().append("x").append("y")));
}

#[test]
fn test_lookup_with_built_pointer() {
    let doc = json!({"users": [{"name": "ann"}, {"name": "bob"}]});
    let p = JsonPointer::root().append("users").append(1usize).append("name");
    assert_eq!(p.get(&doc), Some(&json!("bob")));
}

fn component() -> impl Strategy<Value = PathComponent> {
    prop_oneof![
        any::<i64>().prop_map(PathComponent::Index),
        "[a-z_][a-z0-9_]{0,8}".prop_map(PathComponent::Key),
    ]
}

proptest! {
    #[test]
    fn render_then_parse_restores_pointer(components in prop::collection::vec(component(), 0..8)) {
        let pointer = JsonPointer::from(components);
        prop_assert_eq!(JsonPointer::parse(&pointer.render()), pointer);
    }
}
