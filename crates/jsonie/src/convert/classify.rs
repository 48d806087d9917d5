//! Shape classification of descriptors.

use crate::type_def::*;

/// The category a descriptor is converted by, in dispatch order.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Two-branch union with exactly one null branch; holds the other branch.
    Optional(&'a TypeNode),
    Union(&'a OrType),
    Literal(&'a ConType),
    Any,
    TypedDict(&'a ObjType),
    Record(&'a ObjType),
    NamedTuple(&'a ObjType),
    Tuple(&'a TupType),
    Sequence(&'a ArrType),
    Set(&'a SetType),
    Mapping(&'a MapType),
    Scalar(ScalarKind),
    /// Named reference still to be resolved against the module.
    Reference(&'a RefType),
    /// Custom type with no registered converter.
    Opaque(&'a CustomType),
}

pub fn classify(node: &TypeNode) -> Shape<'_> {
    match node {
        TypeNode::Or(t) => match t.optional_inner() {
            Some(inner) => Shape::Optional(inner),
            None => Shape::Union(t),
        },
        TypeNode::Con(t) => Shape::Literal(t),
        TypeNode::Any(_) => Shape::Any,
        TypeNode::Obj(t) => match t.obj_kind {
            ObjKind::TypedDict => Shape::TypedDict(t),
            ObjKind::Record => Shape::Record(t),
            ObjKind::NamedTuple => Shape::NamedTuple(t),
        },
        TypeNode::Tup(t) => Shape::Tuple(t),
        TypeNode::Arr(t) => Shape::Sequence(t),
        TypeNode::Set(t) => Shape::Set(t),
        TypeNode::Map(t) => Shape::Mapping(t),
        TypeNode::Scalar(t) => Shape::Scalar(t.scalar),
        TypeNode::Ref(t) => Shape::Reference(t),
        TypeNode::Custom(t) => Shape::Opaque(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_vs_union() {
        let t = TypeBuilder::new();
        assert!(matches!(classify(&t.optional(t.int())), Shape::Optional(TypeNode::Scalar(_))));
        assert!(matches!(
            classify(&t.union(vec![t.int(), t.str(), t.null()])),
            Shape::Union(_)
        ));
    }

    #[test]
    fn test_record_kinds() {
        let t = TypeBuilder::new();
        assert!(matches!(classify(&t.record("R").into_node()), Shape::Record(_)));
        assert!(matches!(classify(&t.typed_dict("D").into_node()), Shape::TypedDict(_)));
        assert!(matches!(classify(&t.named_tuple("N").into_node()), Shape::NamedTuple(_)));
    }
}
