use crate::errors::QueryError;
use bson::{Bson, Document};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

/// Percent-decode a URI component. `+` is left untouched and a `%` not followed by two hex
/// digits is an error, matching `decodeURIComponent`.
pub fn decode_component(raw: &str) -> Result<String, QueryError> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|e| e.iter().all(u8::is_ascii_hexdigit)) {
            return Err(QueryError::Decode(format!("malformed percent escape at byte {i}")));
        }
    }
    percent_decode_str(raw)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| QueryError::Decode(format!("invalid UTF-8 after percent-decoding: {e}")))
}

/// Percent-decode a parameter value and parse it as JSON.
pub fn parse_param(raw: &str) -> Result<Value, QueryError> {
    let text = decode_component(raw)?;
    Ok(serde_json::from_str(&text)?)
}

/// Like [`parse_param`], but the JSON must be a top-level object.
pub fn parse_param_object(name: &str, raw: &str) -> Result<Map<String, Value>, QueryError> {
    match parse_param(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(QueryError::Decode(format!(
            "expected JSON object for `{name}`, got {}",
            kind_of(&other)
        ))),
    }
}

/// Convert parsed JSON into BSON without interpreting extended-JSON wrappers such as
/// `{"$oid": ...}`: user input stays plain data until the rewriter types it.
#[must_use]
pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).map_or(Bson::Int64(i), Bson::Int32)
            } else {
                Bson::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(json_object_to_document(map)),
    }
}

#[must_use]
pub fn json_object_to_document(map: Map<String, Value>) -> Document {
    let mut doc = Document::new();
    for (k, v) in map {
        doc.insert(k, json_to_bson(v));
    }
    doc
}

pub(crate) fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
