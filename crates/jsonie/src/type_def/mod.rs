//! Type descriptors.
//!
//! A descriptor graph is built from:
//! - `TypeNode` enum: the closed set of shape categories
//! - Individual structs: `ScalarType`, `ArrType`, `ObjType`, etc.
//! - `TypeBuilder`: factory for constructing TypeNode values
//! - `ModuleType`: named aliases that `Ref` nodes resolve against, which is
//!   what makes self-referential descriptors possible

pub mod abs_type;
pub mod builder;
pub mod classes;
pub mod module_type;

pub use abs_type::{BaseInfo, ValidatorFn};
pub use builder::TypeBuilder;
pub use classes::*;
pub use module_type::ModuleType;

use serde_json::Value;

/// The unified enum covering all descriptor nodes.
#[derive(Debug, Clone)]
pub enum TypeNode {
    Any(AnyType),
    Scalar(ScalarType),
    Con(ConType),
    Or(OrType),
    Arr(ArrType),
    Set(SetType),
    Tup(TupType),
    Map(MapType),
    Obj(ObjType),
    Ref(RefType),
    Custom(CustomType),
}

impl TypeNode {
    /// Returns the node kind string.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Any(t) => t.kind(),
            Self::Scalar(t) => t.kind(),
            Self::Con(t) => t.kind(),
            Self::Or(t) => t.kind(),
            Self::Arr(t) => t.kind(),
            Self::Set(t) => t.kind(),
            Self::Tup(t) => t.kind(),
            Self::Map(t) => t.kind(),
            Self::Obj(t) => t.kind(),
            Self::Ref(t) => t.kind(),
            Self::Custom(t) => t.kind(),
        }
    }

    /// Returns a reference to the shared base info.
    pub fn base(&self) -> &BaseInfo {
        match self {
            Self::Any(t) => &t.base,
            Self::Scalar(t) => &t.base,
            Self::Con(t) => &t.base,
            Self::Or(t) => &t.base,
            Self::Arr(t) => &t.base,
            Self::Set(t) => &t.base,
            Self::Tup(t) => &t.base,
            Self::Map(t) => &t.base,
            Self::Obj(t) => &t.base,
            Self::Ref(t) => &t.base,
            Self::Custom(t) => &t.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseInfo {
        match self {
            Self::Any(t) => &mut t.base,
            Self::Scalar(t) => &mut t.base,
            Self::Con(t) => &mut t.base,
            Self::Or(t) => &mut t.base,
            Self::Arr(t) => &mut t.base,
            Self::Set(t) => &mut t.base,
            Self::Tup(t) => &mut t.base,
            Self::Map(t) => &mut t.base,
            Self::Obj(t) => &mut t.base,
            Self::Ref(t) => &mut t.base,
            Self::Custom(t) => &mut t.base,
        }
    }

    /// Attach a post-conversion validator to this node.
    pub fn with_validator<F>(mut self, validator: F, name: Option<&str>) -> Self
    where
        F: Fn(&crate::value::JsonicValue) -> Option<String> + Send + Sync + 'static,
    {
        let base = std::mem::take(self.base_mut());
        *self.base_mut() = base.with_validator(validator, name);
        self
    }

    /// Canonical identity used as registry key, e.g. `int`, `list[int]`,
    /// `mapping[str, int]` or a record's name.
    pub fn type_id(&self) -> String {
        match self {
            Self::Any(_) => "any".to_string(),
            Self::Scalar(t) => t.scalar.as_str().to_string(),
            Self::Con(t) => format!("literal[{}]", join_values(&t.values)),
            Self::Or(t) => match t.optional_inner() {
                Some(inner) => format!("optional[{}]", inner.type_id()),
                None => format!("union[{}]", join_ids(&t.types)),
            },
            Self::Arr(t) => match t.arr_kind {
                ArrKind::Tuple => format!("tuple[{}, ...]", t.type_.type_id()),
                kind => format!("{}[{}]", kind.as_str(), t.type_.type_id()),
            },
            Self::Set(t) => format!("set[{}]", t.type_.type_id()),
            Self::Tup(t) if t.types.is_empty() => "tuple[()]".to_string(),
            Self::Tup(t) => format!("tuple[{}]", join_ids(&t.types)),
            Self::Map(t) => format!("mapping[{}, {}]", t.key.type_id(), t.value.type_id()),
            Self::Obj(t) => t.name.clone(),
            Self::Ref(t) => t.ref_.clone(),
            Self::Custom(t) if t.args.is_empty() => t.name.clone(),
            Self::Custom(t) => format!("{}[{}]", t.name, join_ids(&t.args)),
        }
    }

    /// Unparameterized container name (`list`, `sequence`, `tuple`, `set`,
    /// `mapping`) or a parameterized custom type's name.
    pub fn origin(&self) -> Option<&str> {
        match self {
            Self::Arr(t) => Some(t.arr_kind.as_str()),
            Self::Set(_) => Some("set"),
            Self::Tup(_) => Some("tuple"),
            Self::Map(_) => Some("mapping"),
            Self::Custom(t) if !t.args.is_empty() => Some(t.name.as_str()),
            _ => None,
        }
    }

    /// Declared ancestor type names, narrowest first.
    pub fn ancestors(&self) -> &[String] {
        match self {
            Self::Obj(t) => &t.extends,
            Self::Custom(t) => &t.extends,
            _ => &[],
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(t) if t.scalar == ScalarKind::Null)
    }

    /// Whether `null` is one of the values this node declares acceptable.
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Or(t) => t.accepts_null(),
            other => other.is_null(),
        }
    }

    pub fn is_record_like(&self) -> bool {
        matches!(self, Self::Obj(_))
    }
}

impl std::fmt::Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.type_id())
    }
}

impl From<ObjType> for TypeNode {
    fn from(t: ObjType) -> Self {
        Self::Obj(t)
    }
}

impl From<CustomType> for TypeNode {
    fn from(t: CustomType) -> Self {
        Self::Custom(t)
    }
}

fn join_ids(types: &[TypeNode]) -> String {
    types
        .iter()
        .map(TypeNode::type_id)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
