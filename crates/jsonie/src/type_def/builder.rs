//! TypeBuilder: factory for constructing TypeNode instances.

use serde_json::Value;

use super::classes::*;
use super::TypeNode;

/// Factory for constructing TypeNode instances.
///
/// # Example
///
/// ```
/// use jsonie::TypeBuilder;
///
/// let t = TypeBuilder::new();
/// let foo = t
///     .record("Foo")
///     .prop("a", t.int())
///     .prop_default("b", t.optional(t.int()), jsonie::JsonicValue::Int(999))
///     .into_node();
/// assert_eq!(foo.type_id(), "Foo");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBuilder;

impl TypeBuilder {
    pub fn new() -> Self {
        Self
    }

    // ------------------------------------------------------------------
    // Leaves

    pub fn any(&self) -> TypeNode {
        TypeNode::Any(AnyType::new())
    }

    pub fn scalar(&self, scalar: ScalarKind) -> TypeNode {
        TypeNode::Scalar(ScalarType::new(scalar))
    }

    pub fn null(&self) -> TypeNode {
        self.scalar(ScalarKind::Null)
    }

    pub fn bool(&self) -> TypeNode {
        self.scalar(ScalarKind::Bool)
    }

    pub fn int(&self) -> TypeNode {
        self.scalar(ScalarKind::Int)
    }

    pub fn float(&self) -> TypeNode {
        self.scalar(ScalarKind::Float)
    }

    pub fn str(&self) -> TypeNode {
        self.scalar(ScalarKind::Str)
    }

    pub fn bytes(&self) -> TypeNode {
        self.scalar(ScalarKind::Bytes)
    }

    pub fn decimal(&self) -> TypeNode {
        self.scalar(ScalarKind::Decimal)
    }

    pub fn date(&self) -> TypeNode {
        self.scalar(ScalarKind::Date)
    }

    pub fn datetime(&self) -> TypeNode {
        self.scalar(ScalarKind::DateTime)
    }

    /// A literal set of allowed constants.
    pub fn literal<I, V>(&self, values: I) -> TypeNode
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        TypeNode::Con(ConType::new(values.into_iter().map(Into::into).collect()))
    }

    // ------------------------------------------------------------------
    // Unions

    pub fn union(&self, types: Vec<TypeNode>) -> TypeNode {
        TypeNode::Or(OrType::new(types))
    }

    /// Union of `type_` and null.
    pub fn optional(&self, type_: TypeNode) -> TypeNode {
        self.union(vec![type_, self.null()])
    }

    // ------------------------------------------------------------------
    // Containers

    /// Read-only sequence of `type_`.
    pub fn sequence(&self, type_: TypeNode) -> TypeNode {
        TypeNode::Arr(ArrType::new(ArrKind::Sequence, type_))
    }

    /// Mutable sequence of `type_`.
    pub fn list(&self, type_: TypeNode) -> TypeNode {
        TypeNode::Arr(ArrType::new(ArrKind::List, type_))
    }

    /// Tuple of any number of `type_` elements.
    pub fn tuple_of(&self, type_: TypeNode) -> TypeNode {
        TypeNode::Arr(ArrType::new(ArrKind::Tuple, type_))
    }

    /// Fixed-arity tuple.
    pub fn tuple(&self, types: Vec<TypeNode>) -> TypeNode {
        TypeNode::Tup(TupType::new(types))
    }

    pub fn set(&self, type_: TypeNode) -> TypeNode {
        TypeNode::Set(SetType::new(type_))
    }

    pub fn mapping(&self, key: TypeNode, value: TypeNode) -> TypeNode {
        TypeNode::Map(MapType::new(key, value))
    }

    // ------------------------------------------------------------------
    // Records

    /// Fixed class with declared fields; chain `prop*` calls and finish with
    /// [`ObjType::into_node`].
    pub fn record(&self, name: impl Into<String>) -> ObjType {
        ObjType::new(name, ObjKind::Record, vec![])
    }

    pub fn typed_dict(&self, name: impl Into<String>) -> ObjType {
        ObjType::new(name, ObjKind::TypedDict, vec![])
    }

    pub fn named_tuple(&self, name: impl Into<String>) -> ObjType {
        ObjType::new(name, ObjKind::NamedTuple, vec![])
    }

    /// Named tuple whose fields carry no type; every position accepts any value.
    pub fn untyped_named_tuple<I, S>(&self, name: impl Into<String>, fields: I) -> TypeNode
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = fields
            .into_iter()
            .map(|f| KeyType::new(f, self.any()))
            .collect();
        TypeNode::Obj(ObjType::new(name, ObjKind::NamedTuple, keys))
    }

    // ------------------------------------------------------------------
    // Indirection

    /// Reference to a named alias registered on a [`ModuleType`](super::ModuleType).
    pub fn ref_(&self, name: impl Into<String>) -> TypeNode {
        TypeNode::Ref(RefType::new(name))
    }

    pub fn custom(&self, name: impl Into<String>) -> TypeNode {
        TypeNode::Custom(CustomType::new(name))
    }
}
