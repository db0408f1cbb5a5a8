use serde_json::Value;

pub const REQUIRED_FIELDS: [&str; 3] = ["uuid", "path", "service"];

/// Parses a request body into the items that should be logged.
///
/// Only the first element is checked for the required fields; when it passes,
/// every element is returned in input order. A body that parses but is not a
/// non-empty array with a valid first element yields no items.
pub fn loggable_items(body: &str) -> Result<Vec<Value>, serde_json::Error> {
    let parsed: Value = serde_json::from_str(body)?;

    let Value::Array(items) = parsed else {
        return Ok(Vec::new());
    };

    match items.first() {
        Some(first) if has_required_fields(first) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

pub fn has_required_fields(item: &Value) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| item.get(field).is_some_and(is_present))
}

/// Presence in the loose sense: empty strings, zero, `false` and `null` count
/// as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
