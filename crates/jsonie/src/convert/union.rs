//! Unions, optionals and literal sets.

use jsonie_pointer::JsonPointer;
use serde_json::Value;
use tracing::trace;

use super::{failed, Converted, ToJsonicConverter};
use crate::constants::IDENTITY;
use crate::context::{ConverterContext, SpeculativeContext};
use crate::describe::literal_text;
use crate::error::ConversionError;
use crate::type_def::{ConType, OrType, TypeNode};
use crate::util::{english_enumerate, json_equal};
use crate::value::JsonicValue;

impl ToJsonicConverter {
    /// `null` short-circuits; anything else converts against the non-null
    /// branch under the caller's policy.
    pub(super) fn convert_optional(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        inner: &TypeNode,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        if value.is_null() {
            return Ok((JsonicValue::Null, IDENTITY));
        }
        self.convert_value(ctx, pointer, inner, value)
    }

    /// Every branch is tried speculatively; violations inside a branch never
    /// reach the caller's policy. Candidates score `confidence * n + index`
    /// and the lowest wins, so ties go to the earliest branch.
    pub(super) fn convert_union(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        t: &OrType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let n = t.types.len() as f64;
        let mut best: Option<Converted> = None;
        for (i, branch) in t.types.iter().enumerate() {
            match self.convert_value(&mut SpeculativeContext, pointer, branch, value) {
                Ok((v, c)) if c.is_finite() => {
                    let score = c * n + i as f64;
                    trace!(%pointer, branch = i, score, "union candidate");
                    if best.as_ref().map_or(true, |(_, s)| score < *s) {
                        best = Some((v, score));
                    }
                }
                Ok(_) => trace!(%pointer, branch = i, "union branch failed"),
                Err(err) => trace!(%pointer, branch = i, error = %err, "union branch rejected"),
            }
        }
        match best {
            Some(best) => Ok(best),
            None => self.mismatch(ctx, pointer, type_, value),
        }
    }

    pub(super) fn convert_literal(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        t: &ConType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        if t.literals().any(|lit| json_equal(lit, value)) {
            return Ok((JsonicValue::from_json(value), self.options.literal_confidence));
        }
        self.report_lazy(ctx, pointer, || {
            let allowed: Vec<String> = t.literals().map(literal_text).collect();
            format!(
                "value is ({value}) where any of {} expected",
                english_enumerate(&allowed, ", or ")
            )
        })?;
        Ok(failed())
    }
}
