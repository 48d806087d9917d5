//! Custom type extension registry entries.

use jsonie_pointer::JsonPointer;
use serde_json::Value;

use crate::context::ConverterContext;
use crate::convert::{Converted, ToJsonicConverter};
use crate::error::ConversionError;
use crate::type_def::TypeNode;

/// A user-supplied converter consulted before built-in dispatch.
///
/// Implementations may recurse through
/// [`ToJsonicConverter::convert_value`] and report violations through
/// [`ToJsonicConverter::fail`].
pub trait CustomConverter: Send + Sync {
    /// English name of `type_` used in violation messages.
    fn resolve_name(&self, type_: &TypeNode) -> String;

    fn convert(
        &self,
        converter: &ToJsonicConverter,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError>;
}

/// Closure-backed [`CustomConverter`].
pub struct CustomConverterFn<N, C> {
    resolve_name: N,
    convert: C,
}

impl<N, C> CustomConverterFn<N, C>
where
    N: Fn(&TypeNode) -> String + Send + Sync,
    C: Fn(
            &ToJsonicConverter,
            &mut dyn ConverterContext,
            &JsonPointer,
            &TypeNode,
            &Value,
        ) -> Result<Converted, ConversionError>
        + Send
        + Sync,
{
    pub fn new(resolve_name: N, convert: C) -> Self {
        Self {
            resolve_name,
            convert,
        }
    }
}

impl<N, C> CustomConverter for CustomConverterFn<N, C>
where
    N: Fn(&TypeNode) -> String + Send + Sync,
    C: Fn(
            &ToJsonicConverter,
            &mut dyn ConverterContext,
            &JsonPointer,
            &TypeNode,
            &Value,
        ) -> Result<Converted, ConversionError>
        + Send
        + Sync,
{
    fn resolve_name(&self, type_: &TypeNode) -> String {
        (self.resolve_name)(type_)
    }

    fn convert(
        &self,
        converter: &ToJsonicConverter,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        (self.convert)(converter, ctx, pointer, type_, value)
    }
}
