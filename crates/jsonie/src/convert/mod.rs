//! The recursive, type-directed converter.
//!
//! [`ToJsonicConverter::convert_value`] walks a descriptor and a decoded value
//! together. Every step yields a [`Converted`] pair: the produced value and a
//! confidence score (lower is better). Violations go to the caller's
//! [`ConverterContext`]; a step that could not produce a value returns the
//! `(Null, INFINITY)` sentinel after reporting.

mod classify;
mod object;
mod options;
mod scalar;
mod sequence;
mod union;

pub use classify::{classify, Shape};
pub use options::ConverterOptions;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jsonie_pointer::JsonPointer;
use serde_json::Value;
use tracing::{debug, trace};

use crate::constants;
use crate::context::{ConverterContext, FailFastContext};
use crate::custom::CustomConverter;
use crate::describe::{describe, describe_json_value};
use crate::error::ConversionError;
use crate::name_mapper::{MapperScope, NameMapper};
use crate::type_def::{ModuleType, TypeNode};
use crate::value::JsonicValue;

/// Message of reports handed to a speculative context.
const REJECTED: &str = "rejected";

/// A converted value and its confidence.
pub type Converted = (JsonicValue, f64);

/// Hook applied to every converted node, after validators.
pub type Visitor =
    Arc<dyn Fn(&ToJsonicConverter, &JsonPointer, &TypeNode, JsonicValue) -> JsonicValue + Send + Sync>;

/// Converts decoded JSON into [`JsonicValue`]s guided by a [`TypeNode`].
///
/// Configuration is fixed once built; a converter can be shared across
/// threads and reused for any number of conversions.
///
/// ```
/// use jsonie::{JsonicValue, ToJsonicConverter, TypeBuilder};
/// use serde_json::json;
///
/// let t = TypeBuilder::new();
/// let converter = ToJsonicConverter::new();
/// let out = converter.from_json(&t.list(t.int()), &json!([1, 2.9])).unwrap();
/// assert_eq!(out, JsonicValue::List(vec![JsonicValue::Int(1), JsonicValue::Int(2)]));
/// ```
#[derive(Clone, Default)]
pub struct ToJsonicConverter {
    options: ConverterOptions,
    module: Arc<ModuleType>,
    custom_types: HashMap<String, Arc<dyn CustomConverter>>,
    name_mappers: HashMap<MapperScope, Arc<dyn NameMapper>>,
    visitor: Option<Visitor>,
}

impl fmt::Debug for ToJsonicConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut custom: Vec<_> = self.custom_types.keys().collect();
        custom.sort();
        f.debug_struct("ToJsonicConverter")
            .field("options", &self.options)
            .field("aliases", &self.module.len())
            .field("custom_types", &custom)
            .field("name_mappers", &self.name_mappers.keys().collect::<Vec<_>>())
            .field("visitor", &self.visitor.is_some())
            .finish()
    }
}

impl ToJsonicConverter {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Configuration

    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }

    /// Aliases that `Ref` nodes resolve against.
    pub fn with_module(mut self, module: ModuleType) -> Self {
        self.module = Arc::new(module);
        self
    }

    /// Register a converter for descriptors whose `type_id()`, container
    /// `origin()` or declared ancestor equals `type_id`.
    pub fn with_custom_type<C>(mut self, type_id: impl Into<String>, converter: C) -> Self
    where
        C: CustomConverter + 'static,
    {
        self.custom_types.insert(type_id.into(), Arc::new(converter));
        self
    }

    /// Register a converter keyed by the identity of `type_`.
    pub fn with_custom_type_for<C>(self, type_: &TypeNode, converter: C) -> Self
    where
        C: CustomConverter + 'static,
    {
        self.with_custom_type(type_.type_id(), converter)
    }

    pub fn with_name_mapper<M>(mut self, scope: MapperScope, mapper: M) -> Self
    where
        M: NameMapper + 'static,
    {
        self.name_mappers.insert(scope, Arc::new(mapper));
        self
    }

    pub fn with_visitor<F>(mut self, visitor: F) -> Self
    where
        F: Fn(&ToJsonicConverter, &JsonPointer, &TypeNode, JsonicValue) -> JsonicValue
            + Send
            + Sync
            + 'static,
    {
        self.visitor = Some(Arc::new(visitor));
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn module(&self) -> &ModuleType {
        &self.module
    }

    // ------------------------------------------------------------------
    // Entry points

    /// Convert `value` against `type_` from the document root, handing every
    /// violation to `ctx`.
    ///
    /// With a collecting context the result may contain `Null` sentinels where
    /// conversion failed; inspect the context's errors before using it.
    pub fn convert(
        &self,
        ctx: &mut dyn ConverterContext,
        type_: &TypeNode,
        value: &Value,
    ) -> Result<JsonicValue, ConversionError> {
        let result = self.convert_value(ctx, &JsonPointer::root(), type_, value);
        match &result {
            Ok((_, confidence)) => {
                debug!(type_id = %type_.type_id(), confidence = *confidence, "conversion finished")
            }
            Err(err) => debug!(type_id = %type_.type_id(), error = %err, "conversion aborted"),
        }
        result.map(|(value, _)| value)
    }

    /// Convert with a fail-fast policy: the first violation is returned as
    /// the error.
    pub fn from_json(&self, type_: &TypeNode, value: &Value) -> Result<JsonicValue, ConversionError> {
        self.convert(&mut FailFastContext, type_, value)
    }

    /// Convert one node at `pointer`. Custom converters recurse through this.
    pub fn convert_value(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let type_ = match self.module.resolve_node(type_) {
            Ok(resolved) => resolved,
            Err(err) => {
                let message = format!("unresolvable reference {}", type_.type_id());
                let report = ConversionError::new(pointer.clone(), message).with_cause(err);
                return self.fail_with(ctx, report);
            }
        };
        let (converted, confidence) = self.convert_inner(ctx, pointer, type_, value)?;
        if !confidence.is_finite() {
            return Ok((converted, confidence));
        }
        for (validator, name) in &type_.base().validators {
            if let Some(message) = validator(&converted) {
                let message = match name {
                    Some(name) => format!("{name}: {message}"),
                    None => message,
                };
                return self.fail(ctx, pointer, message);
            }
        }
        let converted = match &self.visitor {
            Some(visitor) => visitor(self, pointer, type_, converted),
            None => converted,
        };
        Ok((converted, confidence))
    }

    fn convert_inner(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        if let Some(custom) = self.lookup_custom(type_) {
            trace!(%pointer, type_id = %type_.type_id(), "custom converter");
            return custom.convert(self, ctx, pointer, type_, value);
        }
        let shape = classify(type_);
        trace!(%pointer, type_id = %type_.type_id(), kind = type_.kind(), "dispatch");
        match shape {
            Shape::Optional(inner) => self.convert_optional(ctx, pointer, inner, value),
            Shape::Union(t) => self.convert_union(ctx, pointer, type_, t, value),
            Shape::Literal(t) => self.convert_literal(ctx, pointer, t, value),
            Shape::Any => Ok((JsonicValue::from_json(value), constants::ANY)),
            Shape::TypedDict(t) => self.convert_typed_dict(ctx, pointer, type_, t, value),
            Shape::Record(t) => self.convert_record(ctx, pointer, type_, t, value),
            Shape::NamedTuple(t) => self.convert_named_tuple(ctx, pointer, type_, t, value),
            Shape::Tuple(t) => self.convert_tuple(ctx, pointer, t, value),
            Shape::Sequence(t) => self.convert_sequence(ctx, pointer, t, value),
            Shape::Set(t) => self.convert_set(ctx, pointer, t, value),
            Shape::Mapping(t) => self.convert_mapping(ctx, pointer, type_, t, value),
            Shape::Scalar(kind) => self.convert_scalar(ctx, pointer, type_, kind, value),
            Shape::Reference(_) | Shape::Opaque(_) => self.mismatch(ctx, pointer, type_, value),
        }
    }

    // ------------------------------------------------------------------
    // Registries

    /// Custom converter for `type_`: exact identity, then container origin,
    /// then declared ancestors narrowest first.
    pub fn lookup_custom(&self, type_: &TypeNode) -> Option<&dyn CustomConverter> {
        if self.custom_types.is_empty() {
            return None;
        }
        let by_id = self.custom_types.get(&type_.type_id());
        let by_origin = || type_.origin().and_then(|o| self.custom_types.get(o));
        let by_ancestor = || type_.ancestors().iter().find_map(|a| self.custom_types.get(a));
        by_id
            .or_else(by_origin)
            .or_else(by_ancestor)
            .map(|c| c.as_ref())
    }

    /// Name mapper for `type_`: exact type, then any record (record-like
    /// descriptors only), then any type.
    pub fn lookup_name_mapper(&self, type_: &TypeNode) -> Option<&dyn NameMapper> {
        if self.name_mappers.is_empty() {
            return None;
        }
        let exact = self.name_mappers.get(&MapperScope::type_(type_));
        let any_record = || {
            type_
                .is_record_like()
                .then(|| self.name_mappers.get(&MapperScope::AnyRecord))
                .flatten()
        };
        let any_type = || self.name_mappers.get(&MapperScope::AnyType);
        exact
            .or_else(any_record)
            .or_else(any_type)
            .map(|m| m.as_ref())
    }

    // ------------------------------------------------------------------
    // Reporting

    /// Describe `type_` for a violation message.
    pub fn describe(&self, type_: &TypeNode) -> String {
        describe(self, type_)
    }

    /// Hand a violation to the policy.
    pub fn report_violation(
        &self,
        ctx: &mut dyn ConverterContext,
        error: ConversionError,
    ) -> Result<(), ConversionError> {
        debug!(pointer = %error.pointer(), message = error.message(), "violation");
        ctx.report_occurred(error)
    }

    /// Report `message` at `pointer` and return the failure sentinel.
    pub fn fail(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        message: impl Into<String>,
    ) -> Result<Converted, ConversionError> {
        self.fail_with(ctx, ConversionError::new(pointer.clone(), message))
    }

    /// Report a prepared error and return the failure sentinel.
    pub fn fail_with(
        &self,
        ctx: &mut dyn ConverterContext,
        error: ConversionError,
    ) -> Result<Converted, ConversionError> {
        self.report_violation(ctx, error)?;
        Ok(failed())
    }

    /// Hand a violation at `pointer` to the policy. `message` is rendered
    /// only when the policy reads it.
    pub(crate) fn report_lazy(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        message: impl FnOnce() -> String,
    ) -> Result<(), ConversionError> {
        let message = match ctx.is_speculative() {
            true => REJECTED.to_string(),
            false => message(),
        };
        self.report_violation(ctx, ConversionError::new(pointer.clone(), message))
    }

    /// Report that `value` does not have the shape `type_` expects.
    pub(crate) fn mismatch(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        self.mismatch_expecting(ctx, pointer, value, || self.describe(type_))
    }

    pub(crate) fn mismatch_expecting(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        value: &Value,
        expected: impl FnOnce() -> String,
    ) -> Result<Converted, ConversionError> {
        self.report_lazy(ctx, pointer, || {
            format!(
                "value has type {} ({}) where {} expected",
                describe_json_value(value),
                value,
                expected()
            )
        })?;
        Ok(failed())
    }
}

/// The `(Null, INFINITY)` failure sentinel.
pub fn failed() -> Converted {
    (JsonicValue::Null, constants::FAILED)
}

/// Convert `value` against `type_` with a default converter and fail-fast
/// policy.
pub fn from_json(type_: &TypeNode, value: &Value) -> Result<JsonicValue, ConversionError> {
    ToJsonicConverter::new().from_json(type_, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ErrorCollectingContext;
    use crate::type_def::TypeBuilder;
    use serde_json::json;

    #[test]
    fn test_converter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToJsonicConverter>();
    }

    #[test]
    fn test_unresolvable_reference_is_reported() {
        let t = TypeBuilder::new();
        let mut ctx = ErrorCollectingContext::new();
        let out = ToJsonicConverter::new().convert(&mut ctx, &t.ref_("Missing"), &json!(1));
        assert_eq!(out.ok(), Some(JsonicValue::Null));
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].to_string(), "unresolvable reference Missing at /");
    }

    #[test]
    fn test_opaque_custom_type_without_converter() {
        let t = TypeBuilder::new();
        let err = from_json(&t.custom("Money"), &json!("1")).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some(r#"value has type string ("1") where unknown type: Money expected at /"#.into())
        );
    }

    #[test]
    fn test_name_mapper_lookup_order() {
        use crate::name_mapper::{CamelCaseNameMapper, IdentityNameMapper};
        let t = TypeBuilder::new();
        let rec = t.record("R").into_node();
        let c = ToJsonicConverter::new()
            .with_name_mapper(MapperScope::AnyRecord, CamelCaseNameMapper)
            .with_name_mapper(MapperScope::AnyType, IdentityNameMapper);
        let m = c.lookup_name_mapper(&rec).map(|m| m.reverse_resolve(&rec, "a_b"));
        assert_eq!(m, Some(Some("aB".to_string())));
        let map = t.mapping(t.str(), t.int());
        let m = c.lookup_name_mapper(&map).map(|m| m.reverse_resolve(&map, "a_b"));
        assert_eq!(m, Some(Some("a_b".to_string())));
    }
}
