use crate::error::CompactJsonError;
use crate::value::{Key, Value};

const RECURSION_LIMIT: usize = 500;

/// Converts a parsed `serde_json` tree into the formatter's [`Value`]
/// model, tagging integers and floats separately.
///
/// Depth-limited so that adversarially deep documents fail with an
/// error instead of exhausting the stack. Integers beyond the `i64`
/// range fall back to the float variant.
pub(crate) fn convert_json_value(
    element: &serde_json::Value,
    recursion_limit: usize,
) -> Result<Value, CompactJsonError> {
    if recursion_limit == 0 {
        return Err(CompactJsonError::new("depth limit exceeded while converting JSON value"));
    }

    let converted = match element {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(val) => Value::Bool(*val),
        serde_json::Value::Number(num) => {
            if let Some(i) = num.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(num.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(val) => Value::Str(val.clone()),
        serde_json::Value::Array(arr) => {
            let mut children = Vec::with_capacity(arr.len());
            for child in arr {
                children.push(convert_json_value(child, recursion_limit - 1)?);
            }
            Value::List(children)
        }
        serde_json::Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map.iter() {
                let child = convert_json_value(value, recursion_limit - 1)?;
                entries.push((Key::Str(key.clone()), child));
            }
            Value::Dict(entries)
        }
    };

    Ok(converted)
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = CompactJsonError;

    fn try_from(element: &serde_json::Value) -> Result<Self, Self::Error> {
        convert_json_value(element, RECURSION_LIMIT)
    }
}

/// Canonical JSON text for a float. Non-finite values have no JSON
/// representation and render as `null`, matching what `serde_json`
/// produces when converting such values.
pub(crate) fn float_literal(value: f64) -> String {
    match serde_json::Number::from_f64(value) {
        Some(num) => num.to_string(),
        None => "null".to_string(),
    }
}

/// Renders a string as a quoted JSON literal. With `ensure_ascii`, every
/// non-ASCII character is escaped as `\uXXXX` (surrogate pairs above the
/// BMP), so the output is 7-bit clean.
pub(crate) fn escape_json_string(s: &str, ensure_ascii: bool) -> String {
    let quoted = match serde_json::to_string(s) {
        Ok(quoted) => quoted,
        Err(_) => format!("\"{}\"", s),
    };
    if !ensure_ascii || quoted.is_ascii() {
        return quoted;
    }

    let mut out = String::with_capacity(quoted.len());
    for ch in quoted.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else if (ch as u32) <= 0xFFFF {
            out.push_str(&format!("\\u{:04x}", ch as u32));
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}
