//! English descriptions of descriptors and values for violation messages.
//!
//! Nothing here may fail: every input gets some description, falling back to
//! `unknown type: ...`.

use serde_json::Value;

use crate::convert::ToJsonicConverter;
use crate::type_def::{ObjKind, ScalarKind, TypeNode};
use crate::util::english_enumerate;
use crate::value::JsonicValue;

const MAX_DEPTH: usize = 32;

/// Describe `type_` in terms of the JSON shapes it accepts, e.g.
/// `array of number` or `any of string, or object of {string: number}`.
///
/// A reference is expanded once; inside its own expansion it is printed by
/// name, so recursive aliases describe as `any of null, or array of Json`.
pub fn describe(converter: &ToJsonicConverter, type_: &TypeNode) -> String {
    Describer {
        converter,
        expanding: Vec::new(),
    }
    .describe(type_)
}

struct Describer<'a> {
    converter: &'a ToJsonicConverter,
    /// References currently being expanded, outermost first.
    expanding: Vec<&'a str>,
}

impl<'a> Describer<'a> {
    fn describe(&mut self, type_: &'a TypeNode) -> String {
        if self.expanding.len() > MAX_DEPTH {
            return format!("unknown type: {}", type_.type_id());
        }
        if let Some(custom) = self.converter.lookup_custom(type_) {
            return custom.resolve_name(type_);
        }
        match type_ {
            TypeNode::Any(_) => "any value".to_string(),
            TypeNode::Scalar(t) => describe_scalar(t.scalar).to_string(),
            TypeNode::Con(t) => {
                let items: Vec<String> = t.literals().map(literal_text).collect();
                format!("any of literal {}", english_enumerate(&items, ", or "))
            }
            TypeNode::Or(t) => {
                let items: Vec<String> = t.types.iter().map(|b| self.describe(b)).collect();
                format!("any of {}", english_enumerate(&items, ", or "))
            }
            TypeNode::Arr(t) => format!("array of {}", self.describe(&t.type_)),
            TypeNode::Set(t) => format!("array of {}", self.describe(&t.type_)),
            TypeNode::Tup(t) => {
                let items: Vec<String> = t.types.iter().map(|p| self.describe(p)).collect();
                format!("array [{}]", items.join(", "))
            }
            TypeNode::Map(t) => {
                let key = self.describe(&t.key);
                format!("object of {{{key}: {}}}", self.describe(&t.value))
            }
            TypeNode::Obj(t) => match t.obj_kind {
                ObjKind::Record | ObjKind::TypedDict => "object".to_string(),
                ObjKind::NamedTuple => "object or array".to_string(),
            },
            TypeNode::Ref(r) => self.describe_ref(r.ref_name()),
            TypeNode::Custom(t) => format!("unknown type: {}", t.name),
        }
    }

    fn describe_ref(&mut self, name: &'a str) -> String {
        if self.expanding.contains(&name) {
            return name.to_string();
        }
        let converter = self.converter;
        match converter.module().resolve(name) {
            Ok(resolved) => {
                self.expanding.push(name);
                let text = self.describe(resolved);
                self.expanding.pop();
                text
            }
            Err(_) => format!("unknown type: {name}"),
        }
    }
}

fn describe_scalar(scalar: ScalarKind) -> &'static str {
    match scalar {
        ScalarKind::Null => "null",
        ScalarKind::Bool => "boolean",
        ScalarKind::Int | ScalarKind::Float => "number",
        ScalarKind::Str | ScalarKind::Bytes => "string",
        ScalarKind::Decimal | ScalarKind::Date | ScalarKind::DateTime => "number or string",
    }
}

/// JSON category of a decoded input value.
pub fn describe_json_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON category a converted value would be written back as.
pub fn describe_jsonic_value(value: &JsonicValue) -> &'static str {
    match value {
        JsonicValue::Null => "null",
        JsonicValue::Bool(_) => "boolean",
        JsonicValue::Int(_) | JsonicValue::Float(_) => "number",
        JsonicValue::Str(_) | JsonicValue::Bytes(_) => "string",
        JsonicValue::Decimal(_) | JsonicValue::Date(_) | JsonicValue::DateTime(_) => {
            "number or string"
        }
        JsonicValue::List(_)
        | JsonicValue::Tuple(_)
        | JsonicValue::Set(_)
        | JsonicValue::NamedTuple(_) => "array",
        JsonicValue::Object(_) | JsonicValue::Record(_) => "object",
    }
}

/// Literal constants print bare: strings without quotes.
pub(crate) fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
