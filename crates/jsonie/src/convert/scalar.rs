//! Leaf conversions and the fixed coercion table.

use std::str::FromStr;

use base64::Engine;
use jsonie_pointer::JsonPointer;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use super::{Converted, ToJsonicConverter};
use crate::constants::{COERCION, IDENTITY, TEMPORAL};
use crate::context::ConverterContext;
use crate::error::ConversionError;
use crate::type_def::{ScalarKind, TypeNode};
use crate::value::JsonicValue;

const NANOS_PER_MICRO: i128 = 1_000;

impl ToJsonicConverter {
    pub(super) fn convert_scalar(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        scalar: ScalarKind,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        match (scalar, value) {
            (ScalarKind::Null, Value::Null) => Ok((JsonicValue::Null, IDENTITY)),
            (ScalarKind::Bool, Value::Bool(b)) => Ok((JsonicValue::Bool(*b), IDENTITY)),
            (ScalarKind::Str, Value::String(s)) => Ok((JsonicValue::Str(s.clone()), IDENTITY)),
            (ScalarKind::Int, Value::Number(n)) => self.convert_int(ctx, pointer, type_, n, value),
            (ScalarKind::Float, Value::Number(n)) => Ok(match n.as_f64() {
                Some(f) if n.is_f64() => (JsonicValue::Float(f), IDENTITY),
                Some(f) => (JsonicValue::Float(f), COERCION),
                None => (JsonicValue::Float(f64::NAN), COERCION),
            }),
            (ScalarKind::Bytes, Value::String(s)) => {
                match base64::engine::general_purpose::STANDARD.decode(s.as_bytes()) {
                    Ok(bytes) => Ok((JsonicValue::Bytes(bytes), COERCION)),
                    Err(e) => self.fail_with(
                        ctx,
                        ConversionError::new(pointer.clone(), format!("bad base64 string ({value})"))
                            .with_cause(e),
                    ),
                }
            }
            (ScalarKind::Decimal, Value::String(s)) => match parse_decimal(s) {
                Ok(d) => Ok((JsonicValue::Decimal(d), COERCION)),
                Err(e) => self.fail_with(
                    ctx,
                    ConversionError::new(pointer.clone(), format!("bad decimal string ({value})"))
                        .with_cause(e),
                ),
            },
            (ScalarKind::Decimal, Value::Number(n)) => match parse_decimal(&n.to_string()) {
                Ok(d) => Ok((JsonicValue::Decimal(d), COERCION)),
                Err(e) => self.fail_with(
                    ctx,
                    ConversionError::new(pointer.clone(), format!("bad decimal string ({value})"))
                        .with_cause(e),
                ),
            },
            (ScalarKind::DateTime | ScalarKind::Date, Value::String(s)) => match parse_datetime(s) {
                Ok(dt) => Ok((temporal(scalar, dt), TEMPORAL)),
                Err(e) => self.fail_with(
                    ctx,
                    ConversionError::new(pointer.clone(), format!("bad date time string ({value})"))
                        .with_cause(e),
                ),
            },
            (ScalarKind::DateTime | ScalarKind::Date, Value::Number(n)) => match from_epoch(n) {
                Ok(dt) => Ok((temporal(scalar, dt), TEMPORAL)),
                Err(e) => self.fail_with(
                    ctx,
                    ConversionError::new(pointer.clone(), format!("timestamp out of range ({value})"))
                        .with_cause(e),
                ),
            },
            _ => self.mismatch(ctx, pointer, type_, value),
        }
    }

    /// Integral numbers pass through; fractional ones truncate toward zero.
    fn convert_int(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        n: &Number,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        if let Some(i) = n.as_i64() {
            return Ok((JsonicValue::Int(i), IDENTITY));
        }
        if n.is_f64() {
            if let Some(f) = n.as_f64() {
                let truncated = f.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    return Ok((JsonicValue::Int(truncated as i64), COERCION));
                }
            }
        }
        self.mismatch_expecting(ctx, pointer, value, || {
            format!("{} within 64-bit range", self.describe(type_))
        })
    }
}

fn temporal(scalar: ScalarKind, dt: OffsetDateTime) -> JsonicValue {
    match scalar {
        ScalarKind::Date => JsonicValue::Date(dt.date()),
        _ => JsonicValue::DateTime(dt),
    }
}

/// Plain decimal notation first, then scientific notation.
fn parse_decimal(s: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s))
}

/// ISO-8601 text to a UTC-anchored datetime. Inputs without an offset are
/// taken as UTC; a bare date means midnight.
fn parse_datetime(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(s, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(s, &Iso8601::DEFAULT))
        .or_else(|_| PrimitiveDateTime::parse(s, &Iso8601::DEFAULT).map(PrimitiveDateTime::assume_utc))
        .or_else(|_| {
            Date::parse(s, format_description!("[year]-[month]-[day]"))
                .map(|d| d.midnight().assume_utc())
        })
}

/// Seconds since the Unix epoch, kept to microsecond precision.
fn from_epoch(n: &Number) -> Result<OffsetDateTime, time::error::ComponentRange> {
    let nanos = match n.as_i64() {
        Some(secs) => i128::from(secs) * 1_000_000_000,
        None => {
            let secs = n.as_f64().unwrap_or(f64::NAN);
            let micros = (secs * 1e6).round();
            if micros.is_finite() && micros.abs() < 1e30 {
                micros as i128 * NANOS_PER_MICRO
            } else {
                i128::MAX
            }
        }
    };
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_parse_datetime_variants() {
        assert_eq!(
            parse_datetime("2020-01-02T03:04:05Z").ok(),
            Some(datetime!(2020-01-02 03:04:05 UTC))
        );
        assert_eq!(
            parse_datetime("2020-01-02T03:04:05+09:00").ok(),
            Some(datetime!(2020-01-02 03:04:05 +09:00))
        );
        assert_eq!(
            parse_datetime("2020-01-02T03:04:05").ok(),
            Some(datetime!(2020-01-02 03:04:05 UTC))
        );
        assert_eq!(
            parse_datetime("2020-01-02").ok().map(OffsetDateTime::date),
            Some(date!(2020-01-02))
        );
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_from_epoch() {
        let n = |v: Value| match v {
            Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        };
        assert_eq!(
            from_epoch(&n(serde_json::json!(0))).ok(),
            Some(OffsetDateTime::UNIX_EPOCH)
        );
        assert_eq!(
            from_epoch(&n(serde_json::json!(1.5))).ok(),
            Some(datetime!(1970-01-01 00:00:01.5 UTC))
        );
        assert!(from_epoch(&n(serde_json::json!(1e300))).is_err());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1.25").ok(), Decimal::from_str("1.25").ok());
        assert_eq!(parse_decimal("1e3").ok(), Some(Decimal::from(1000)));
        assert!(parse_decimal("abc").is_err());
    }
}
