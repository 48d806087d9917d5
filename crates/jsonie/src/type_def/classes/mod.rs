//! Descriptor node implementations.
//!
//! Each struct here is one shape category the converter knows how to fill.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::abs_type::BaseInfo;
use super::TypeNode;
use crate::value::JsonicValue;

// -------------------------------------------------------------------------
// AnyType

#[derive(Debug, Clone, Default)]
pub struct AnyType {
    pub base: BaseInfo,
}

impl AnyType {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn kind(&self) -> &'static str {
        "any"
    }
}

// -------------------------------------------------------------------------
// ScalarType

/// Leaf value categories with a fixed coercion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    Decimal,
    Date,
    DateTime,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bytes => "bytes",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::DateTime => "datetime",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

#[derive(Debug, Clone)]
pub struct ScalarType {
    pub scalar: ScalarKind,
    pub base: BaseInfo,
}

impl ScalarType {
    pub fn new(scalar: ScalarKind) -> Self {
        Self {
            scalar,
            base: BaseInfo::default(),
        }
    }
    pub fn kind(&self) -> &'static str {
        "scalar"
    }
}

// -------------------------------------------------------------------------
// ConType

/// A closed set of allowed constants.
#[derive(Debug, Clone)]
pub struct ConType {
    pub values: Vec<Value>,
    pub base: BaseInfo,
}

impl ConType {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            base: BaseInfo::default(),
        }
    }

    /// The constants a value may match: booleans, numbers and strings only,
    /// in declaration order.
    ///
    /// Matching is strict JSON equality: `true` does not match the literal `1`
    /// and `1` does not match `true`. Numbers compare by value, so `1` matches
    /// `1.0`.
    pub fn literals(&self) -> impl Iterator<Item = &Value> {
        self.values
            .iter()
            .filter(|v| v.is_boolean() || v.is_number() || v.is_string())
    }

    pub fn kind(&self) -> &'static str {
        "con"
    }
}

// -------------------------------------------------------------------------
// OrType

#[derive(Debug, Clone)]
pub struct OrType {
    pub types: Vec<TypeNode>,
    pub base: BaseInfo,
}

impl OrType {
    pub fn new(types: Vec<TypeNode>) -> Self {
        Self {
            types,
            base: BaseInfo::default(),
        }
    }

    /// For a two-branch union with exactly one null branch, the other branch.
    pub fn optional_inner(&self) -> Option<&TypeNode> {
        match self.types.as_slice() {
            [a, b] if a.is_null() && !b.is_null() => Some(b),
            [a, b] if b.is_null() && !a.is_null() => Some(a),
            _ => None,
        }
    }

    pub fn accepts_null(&self) -> bool {
        self.types.iter().any(TypeNode::is_null)
    }

    pub fn kind(&self) -> &'static str {
        "or"
    }
}

// -------------------------------------------------------------------------
// ArrType

/// Which sequence category a homogeneous sequence was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrKind {
    /// Read-only sequence; materializes per `prefer_immutable_types_for_nonmutable_sequence`.
    Sequence,
    /// Mutable sequence; always a list.
    List,
    /// Tuple of repeated elements (`tuple[T, ...]`); always a tuple.
    Tuple,
}

impl ArrKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::List => "list",
            Self::Tuple => "tuple",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArrType {
    pub arr_kind: ArrKind,
    pub type_: Box<TypeNode>,
    pub base: BaseInfo,
}

impl ArrType {
    pub fn new(arr_kind: ArrKind, type_: TypeNode) -> Self {
        Self {
            arr_kind,
            type_: Box::new(type_),
            base: BaseInfo::default(),
        }
    }
    pub fn kind(&self) -> &'static str {
        "arr"
    }
}

// -------------------------------------------------------------------------
// SetType

#[derive(Debug, Clone)]
pub struct SetType {
    pub type_: Box<TypeNode>,
    pub base: BaseInfo,
}

impl SetType {
    pub fn new(type_: TypeNode) -> Self {
        Self {
            type_: Box::new(type_),
            base: BaseInfo::default(),
        }
    }
    pub fn kind(&self) -> &'static str {
        "set"
    }
}

// -------------------------------------------------------------------------
// TupType

/// Fixed-arity tuple, one descriptor per position.
#[derive(Debug, Clone)]
pub struct TupType {
    pub types: Vec<TypeNode>,
    pub base: BaseInfo,
}

impl TupType {
    pub fn new(types: Vec<TypeNode>) -> Self {
        Self {
            types,
            base: BaseInfo::default(),
        }
    }
    pub fn kind(&self) -> &'static str {
        "tup"
    }
}

// -------------------------------------------------------------------------
// MapType

#[derive(Debug, Clone)]
pub struct MapType {
    pub key: Box<TypeNode>,
    pub value: Box<TypeNode>,
    pub base: BaseInfo,
}

impl MapType {
    pub fn new(key: TypeNode, value: TypeNode) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
            base: BaseInfo::default(),
        }
    }
    pub fn kind(&self) -> &'static str {
        "map"
    }
}

// -------------------------------------------------------------------------
// KeyType

pub type DefaultFactory = Arc<dyn Fn() -> JsonicValue + Send + Sync>;

/// Value a record member takes when its key is absent from the input.
#[derive(Clone)]
pub enum FieldDefault {
    Value(JsonicValue),
    Factory(DefaultFactory),
}

impl FieldDefault {
    pub fn produce(&self) -> JsonicValue {
        match self {
            Self::Value(v) => v.clone(),
            Self::Factory(f) => f(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// A declared member of a record-like type.
#[derive(Debug, Clone)]
pub struct KeyType {
    pub key: String,
    pub val: Box<TypeNode>,
    /// Explicitly marked as omittable (`NotRequired`-style).
    pub optional: bool,
    pub default: Option<FieldDefault>,
    /// Members with `init == false` are never read from the input.
    pub init: bool,
    pub base: BaseInfo,
}

impl KeyType {
    pub fn new(key: impl Into<String>, val: TypeNode) -> Self {
        Self {
            key: key.into(),
            val: Box::new(val),
            optional: false,
            default: None,
            init: true,
            base: BaseInfo::default(),
        }
    }
    pub fn new_opt(key: impl Into<String>, val: TypeNode) -> Self {
        Self {
            optional: true,
            ..Self::new(key, val)
        }
    }
    pub fn default_value(mut self, value: JsonicValue) -> Self {
        self.default = Some(FieldDefault::Value(value));
        self
    }
    pub fn default_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> JsonicValue + Send + Sync + 'static,
    {
        self.default = Some(FieldDefault::Factory(Arc::new(factory)));
        self
    }
    pub fn no_init(mut self) -> Self {
        self.init = false;
        self
    }

    /// Whether the member may be missing from a dynamic record.
    pub fn is_optional(&self) -> bool {
        self.optional || self.val.is_nullable()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn kind(&self) -> &'static str {
        "key"
    }
}

// -------------------------------------------------------------------------
// ObjType

/// Which record flavour an [`ObjType`] was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjKind {
    /// Fixed class with declared fields, defaults and default factories.
    Record,
    /// Dynamic keyed mapping with typed members.
    TypedDict,
    /// Ordered, named positional fields.
    NamedTuple,
}

#[derive(Debug, Clone)]
pub struct ObjType {
    pub name: String,
    pub obj_kind: ObjKind,
    pub keys: Vec<KeyType>,
    /// Ancestor type names, narrowest first.
    pub extends: Vec<String>,
    pub base: BaseInfo,
}

impl ObjType {
    pub fn new(name: impl Into<String>, obj_kind: ObjKind, keys: Vec<KeyType>) -> Self {
        Self {
            name: name.into(),
            obj_kind,
            keys,
            extends: Vec::new(),
            base: BaseInfo::default(),
        }
    }
    pub fn prop(mut self, key: impl Into<String>, val: TypeNode) -> Self {
        self.keys.push(KeyType::new(key, val));
        self
    }
    pub fn opt(mut self, key: impl Into<String>, val: TypeNode) -> Self {
        self.keys.push(KeyType::new_opt(key, val));
        self
    }
    pub fn prop_default(mut self, key: impl Into<String>, val: TypeNode, value: JsonicValue) -> Self {
        self.keys.push(KeyType::new(key, val).default_value(value));
        self
    }
    pub fn prop_factory<F>(mut self, key: impl Into<String>, val: TypeNode, factory: F) -> Self
    where
        F: Fn() -> JsonicValue + Send + Sync + 'static,
    {
        self.keys.push(KeyType::new(key, val).default_factory(factory));
        self
    }
    pub fn field(mut self, key: KeyType) -> Self {
        self.keys.push(key);
        self
    }
    pub fn extends(mut self, ancestor: impl Into<String>) -> Self {
        self.extends.push(ancestor.into());
        self
    }
    pub fn validator<F>(mut self, validator: F, name: Option<&str>) -> Self
    where
        F: Fn(&JsonicValue) -> Option<String> + Send + Sync + 'static,
    {
        self.base = self.base.with_validator(validator, name);
        self
    }
    pub fn get_field(&self, key: &str) -> Option<&KeyType> {
        self.keys.iter().find(|k| k.key == key)
    }
    pub fn into_node(self) -> TypeNode {
        TypeNode::Obj(self)
    }
    pub fn kind(&self) -> &'static str {
        "obj"
    }
}

// -------------------------------------------------------------------------
// RefType

/// A named reference resolved lazily through a [`ModuleType`](super::ModuleType).
#[derive(Debug, Clone)]
pub struct RefType {
    pub ref_: String,
    pub base: BaseInfo,
}

impl RefType {
    pub fn new(ref_: impl Into<String>) -> Self {
        Self {
            ref_: ref_.into(),
            base: BaseInfo::default(),
        }
    }
    pub fn ref_name(&self) -> &str {
        &self.ref_
    }
    pub fn kind(&self) -> &'static str {
        "ref"
    }
}

// -------------------------------------------------------------------------
// CustomType

/// An opaque named type; only convertible through a registered custom converter.
#[derive(Debug, Clone)]
pub struct CustomType {
    pub name: String,
    pub args: Vec<TypeNode>,
    /// Ancestor type names, narrowest first.
    pub extends: Vec<String>,
    pub base: BaseInfo,
}

impl CustomType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            extends: Vec::new(),
            base: BaseInfo::default(),
        }
    }
    pub fn arg(mut self, arg: TypeNode) -> Self {
        self.args.push(arg);
        self
    }
    pub fn extends(mut self, ancestor: impl Into<String>) -> Self {
        self.extends.push(ancestor.into());
        self
    }
    pub fn kind(&self) -> &'static str {
        "custom"
    }
}
