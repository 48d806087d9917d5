//! `jsonie`: type-directed conversion of decoded JSON into richly typed values.
//!
//! A [`TypeNode`] describes the expected shape (scalars, unions, literal sets,
//! sequences, sets, tuples, mappings, records, named tuples, typed dicts,
//! references to named aliases). [`ToJsonicConverter`] walks the descriptor and
//! a `serde_json::Value` together and produces a [`JsonicValue`], reporting
//! every mismatch through a [`ConverterContext`] policy.
//!
//! ```
//! use jsonie::{JsonicValue, TypeBuilder};
//! use serde_json::json;
//!
//! let t = TypeBuilder::new();
//! let foo = t
//!     .record("Foo")
//!     .prop("a", t.int())
//!     .prop_default("b", t.optional(t.int()), JsonicValue::Int(999))
//!     .into_node();
//! let out = jsonie::from_json(&foo, &json!({"a": 12.123})).unwrap();
//! assert_eq!(out.get("a"), Some(&JsonicValue::Int(12)));
//! assert_eq!(out.get("b"), Some(&JsonicValue::Int(999)));
//! ```

pub mod constants;
pub mod context;
pub mod convert;
pub mod custom;
pub mod describe;
pub mod error;
pub mod name_mapper;
pub mod type_def;
pub mod util;
pub mod value;

// Re-export the most commonly used types at crate root
pub use context::{
    BoundedErrorContext, ConverterContext, ErrorCollectingContext, FailFastContext,
    SpeculativeContext,
};
pub use convert::{from_json, Converted, ConverterOptions, ToJsonicConverter, Visitor};
pub use custom::{CustomConverter, CustomConverterFn};
pub use error::{ConversionError, ResolveError};
pub use jsonie_pointer::{JsonPointer, PathComponent};
pub use name_mapper::{
    CamelCaseNameMapper, IdentityNameMapper, MapperScope, NameMapper, NameMapperFn,
};
pub use type_def::{BaseInfo, ModuleType, TypeBuilder, TypeNode};
pub use value::{JsonicSet, JsonicValue, Record};
