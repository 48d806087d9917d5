//! Mappings and record-like descriptors.

use indexmap::IndexMap;
use jsonie_pointer::JsonPointer;
use serde_json::{Map, Value};

use super::{failed, Converted, ToJsonicConverter};
use crate::constants::{geometric_mean, EMPTY_CONTAINER, EMPTY_RECORD};
use crate::context::ConverterContext;
use crate::describe::{describe_json_value, describe_jsonic_value};
use crate::error::ConversionError;
use crate::name_mapper::NameMapper;
use crate::type_def::{KeyType, MapType, ObjType, TypeNode};
use crate::value::{JsonicValue, Record};

/// Members gathered while filling a record-like value.
#[derive(Default)]
struct Fields {
    values: IndexMap<String, JsonicValue>,
    scores: Vec<f64>,
    missing: bool,
}

impl Fields {
    fn confidence(&self) -> f64 {
        geometric_mean(&self.scores, EMPTY_RECORD)
    }
}

impl ToJsonicConverter {
    pub(super) fn convert_mapping(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        t: &MapType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let Value::Object(entries) = value else {
            return self.mismatch_expecting(ctx, pointer, value, || {
                format!(
                    "a mapping of {{{}: {}}}",
                    self.describe(&t.key),
                    self.describe(&t.value)
                )
            });
        };
        let mapper = self.lookup_name_mapper(type_);
        let mut out = IndexMap::with_capacity(entries.len());
        let mut scores = Vec::with_capacity(entries.len());
        for (k, v) in entries {
            let (key, kc) = self.convert_value(ctx, pointer, &t.key, &Value::String(k.clone()))?;
            let key = match key {
                _ if !kc.is_finite() => None,
                JsonicValue::Str(key) => Some(key),
                other => {
                    self.report_lazy(ctx, pointer, || {
                        format!(
                            "key has type {}, which deduces {k} into {}",
                            self.describe(&t.key),
                            describe_jsonic_value(&other)
                        )
                    })?;
                    None
                }
            };
            if let Some(key) = key {
                let (jv, vc) = self.convert_value(ctx, &pointer.append(key.as_str()), &t.value, v)?;
                let name = match mapper {
                    Some(m) => m.resolve(type_, &key),
                    None => Some(key),
                };
                if let Some(name) = name {
                    out.insert(name, jv);
                    scores.push((kc * vc).sqrt());
                }
            }
            if ctx.stopped() {
                break;
            }
        }
        Ok((
            JsonicValue::Object(out),
            geometric_mean(&scores, EMPTY_CONTAINER),
        ))
    }

    /// Fixed class: absent members take their default; an absent member with
    /// no default fails the whole record.
    pub(super) fn convert_record(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        t: &ObjType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let Value::Object(input) = value else {
            return self.mismatch(ctx, pointer, type_, value);
        };
        let mapper = self.lookup_name_mapper(type_);
        let mut fields = Fields::default();
        for member in &t.keys {
            let external = match member.init {
                true => external_key(mapper, type_, member),
                false => None,
            };
            match external.as_deref().and_then(|k| input.get(k).map(|v| (k, v))) {
                Some((key, v)) => {
                    self.fill_member(ctx, pointer, &mut fields, member, key, v)?;
                }
                None => {
                    if let Some(default) = &member.default {
                        fields.values.insert(member.key.clone(), default.produce());
                        continue;
                    }
                    if let (true, Some(key)) = (member.init, external.as_deref()) {
                        self.report_missing(ctx, pointer, &mut fields, key, input)?;
                    }
                }
            }
            if ctx.stopped() {
                break;
            }
        }
        if fields.missing {
            return Ok(failed());
        }
        let confidence = fields.confidence();
        let record = Record {
            name: t.name.clone(),
            fields: fields.values,
        };
        Ok((JsonicValue::Record(record), confidence))
    }

    /// Dynamic keyed record: optional members may be absent, required ones
    /// are reported.
    pub(super) fn convert_typed_dict(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        t: &ObjType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let Value::Object(input) = value else {
            return self.mismatch(ctx, pointer, type_, value);
        };
        let mapper = self.lookup_name_mapper(type_);
        let mut fields = Fields::default();
        for member in &t.keys {
            let Some(key) = external_key(mapper, type_, member) else {
                continue;
            };
            match input.get(&key) {
                Some(v) => self.fill_member(ctx, pointer, &mut fields, member, &key, v)?,
                None if member.is_optional() => continue,
                None => self.report_missing(ctx, pointer, &mut fields, &key, input)?,
            }
            if ctx.stopped() {
                break;
            }
        }
        let confidence = match fields.missing {
            true => f64::INFINITY,
            false => fields.confidence(),
        };
        Ok((JsonicValue::Object(fields.values), confidence))
    }

    /// Named positional fields, filled from an object by name or from an
    /// array of exactly the declared arity.
    pub(super) fn convert_named_tuple(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        type_: &TypeNode,
        t: &ObjType,
        value: &Value,
    ) -> Result<Converted, ConversionError> {
        let mut fields = Fields::default();
        match value {
            Value::Object(input) => {
                let mapper = self.lookup_name_mapper(type_);
                for member in &t.keys {
                    let Some(key) = external_key(mapper, type_, member) else {
                        continue;
                    };
                    match input.get(&key) {
                        Some(v) => self.fill_member(ctx, pointer, &mut fields, member, &key, v)?,
                        None => self.report_missing(ctx, pointer, &mut fields, &key, input)?,
                    }
                    if ctx.stopped() {
                        break;
                    }
                }
            }
            Value::Array(items) => {
                if items.len() != t.keys.len() {
                    let message = format!(
                        "expecting {} items for {}, got {}",
                        t.keys.len(),
                        t.name,
                        items.len()
                    );
                    return self.fail(ctx, pointer, message);
                }
                for (i, (member, item)) in t.keys.iter().zip(items).enumerate() {
                    let (v, c) = self.convert_value(ctx, &pointer.append(i), &member.val, item)?;
                    fields.values.insert(member.key.clone(), v);
                    fields.scores.push(c);
                    if ctx.stopped() {
                        break;
                    }
                }
            }
            other => {
                let message = format!(
                    "expecting an object or array, got {}",
                    describe_json_value(other)
                );
                return self.fail(ctx, pointer, message);
            }
        }
        if fields.missing {
            return Ok(failed());
        }
        let confidence = fields.confidence();
        let record = Record {
            name: t.name.clone(),
            fields: fields.values,
        };
        Ok((JsonicValue::NamedTuple(record), confidence))
    }

    fn fill_member(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        fields: &mut Fields,
        member: &KeyType,
        key: &str,
        value: &Value,
    ) -> Result<(), ConversionError> {
        let (v, c) = self.convert_value(ctx, &pointer.append(key), &member.val, value)?;
        fields.values.insert(member.key.clone(), v);
        fields.scores.push(c);
        Ok(())
    }

    fn report_missing(
        &self,
        ctx: &mut dyn ConverterContext,
        pointer: &JsonPointer,
        fields: &mut Fields,
        key: &str,
        input: &Map<String, Value>,
    ) -> Result<(), ConversionError> {
        fields.missing = true;
        self.report_lazy(ctx, &pointer.append(key), || {
            format!(
                "property {key} does not exist in {}",
                Value::Object(input.clone())
            )
        })
    }
}

/// External key a member is read from; `None` hides the member.
fn external_key(mapper: Option<&dyn NameMapper>, type_: &TypeNode, member: &KeyType) -> Option<String> {
    match mapper {
        Some(m) => m.reverse_resolve(type_, &member.key),
        None => Some(member.key.clone()),
    }
}
