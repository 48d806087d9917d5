//! Homogeneous sequences, fixed-arity tuples and sets.

use jsonie_pointer::JsonPointer;
use serde_json::Value;

use super::{Converted, ToJsonicConverter};
use crate::constants::{geometric_mean, EMPTY_CONTAINER};
use crate::context::ConverterContext;
use crate::error::ConversionError;
use crate::type_def::{ArrKind, ArrType, SetType, TupType, TypeNode};
use crate::value::{JsonicSet, JsonicValue};

impl ToJsonicConverter {
    pub(super) fn convert_sequence(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        t: &ArrType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let Value::Array(items) = value else {
            return self.expect_array_of(ctx, pointer, &t.type_, value);
        };
        let (values, confidence) = self.convert_items(ctx, pointer, &t.type_, items)?;
        let immutable = match t.arr_kind {
            ArrKind::List => false,
            ArrKind::Tuple => true,
            ArrKind::Sequence => self.options.prefer_immutable_types_for_nonmutable_sequence,
        };
        let out = if immutable {
            JsonicValue::Tuple(values)
        } else {
            JsonicValue::List(values)
        };
        Ok((out, confidence))
    }

    /// Convert every item against one element descriptor.
    fn convert_items(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        elem: &TypeNode,
        items: &[Value],
    ) -> Result<(Vec<JsonicValue>, f64), ConversionError> {
        let mut values = Vec::with_capacity(items.len());
        let mut scores = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let (v, c) = self.convert_value(ctx, &pointer.append(i), elem, item)?;
            values.push(v);
            scores.push(c);
            if ctx.stopped() {
                break;
            }
        }
        Ok((values, geometric_mean(&scores, EMPTY_CONTAINER)))
    }

    pub(super) fn convert_tuple(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        t: &TupType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let items = match value {
            Value::Array(items) if items.len() == t.types.len() => items,
            _ => {
                return self.mismatch_expecting(ctx, pointer, value, || {
                    let positions: Vec<String> = t.types.iter().map(|p| self.describe(p)).collect();
                    format!("an array [{}]", positions.join(", "))
                });
            }
        };
        let mut values = Vec::with_capacity(items.len());
        let mut scores = Vec::with_capacity(items.len());
        for (i, (elem, item)) in t.types.iter().zip(items).enumerate() {
            let (v, c) = self.convert_value(ctx, &pointer.append(i), elem, item)?;
            values.push(v);
            scores.push(c);
            if ctx.stopped() {
                break;
            }
        }
        Ok((
            JsonicValue::Tuple(values),
            geometric_mean(&scores, EMPTY_CONTAINER),
        ))
    }

    /// Duplicates (after conversion) are reported at their own index and
    /// skipped; they do not count toward the confidence.
    pub(super) fn convert_set(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        t: &SetType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let Value::Array(items) = value else {
            return self.expect_array_of(ctx, pointer, &t.type_, value);
        };
        let mut set = JsonicSet::new();
        // Input index of each set member, by set position.
        let mut origins: Vec<usize> = Vec::with_capacity(items.len());
        let mut scores = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_pointer = pointer.append(i);
            let (v, c) = self.convert_value(ctx, &item_pointer, &t.type_, item)?;
            if !c.is_finite() {
                scores.push(c);
            } else {
                match set.insert(v) {
                    Ok(()) => {
                        origins.push(i);
                        scores.push(c);
                    }
                    Err(pos) => {
                        let first = origins.get(pos).copied().unwrap_or(pos);
                        self.report_lazy(ctx, &item_pointer, || {
                            format!("identical item {item} already occurred at index {first}")
                        })?;
                    }
                }
            }
            if ctx.stopped() {
                break;
            }
        }
        Ok((
            JsonicValue::Set(set),
            geometric_mean(&scores, EMPTY_CONTAINER),
        ))
    }

    pub(super) fn expect_array_of(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        elem: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        self.mismatch_expecting(ctx, pointer, value, || {
            format!("an array of {}", self.describe(elem))
        })
    }
}
