//! Accessors over loosely-typed upstream JSON.
//!
//! 7TV and the identity service return records whose shape varies by
//! endpoint (flat vs. nested under `user`, objects vs. one-element arrays,
//! string vs. numeric IDs). These helpers hide that variance.

use serde_json::Value;

/// Whether a JSON value counts as "present" for alias lookups.
///
/// Missing, `null`, `false`, `0` and `""` are absent. Arrays and objects are
/// always present, even when empty.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up `key` on an object, returning it only when present.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_present(v))
}

/// Return the first present field among `keys`.
pub fn first_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| field(value, key))
}

/// Unwrap a body that may be a list: arrays yield their first element.
pub fn first_of(body: Value) -> Option<Value> {
    match body {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
}

/// Render an identifier that may be a JSON string or number.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-empty string field.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    field(value, key).and_then(Value::as_str)
}

/// A 7TV user record as returned by one of the lookup endpoints.
///
/// Fields may live at the top level or under a nested `user` object; the
/// top level always wins.
#[derive(Debug, Clone)]
pub struct UserRecord(Value);

impl UserRecord {
    /// Accept a decoded lookup body if it looks like a user record.
    pub fn from_body(body: Value) -> Option<Self> {
        let record = first_of(body)?;
        let usable = ["style", "user", "username", "display_name"]
            .iter()
            .any(|key| field(&record, key).is_some());
        usable.then_some(Self(record))
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        field(&self.0, key).or_else(|| field(&self.0, "user").and_then(|u| field(u, key)))
    }

    /// The `style` block, if any.
    pub fn style(&self) -> Option<&Value> {
        self.lookup("style")
    }

    pub fn username(&self) -> Option<&str> {
        self.lookup("username").and_then(Value::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.lookup("display_name").and_then(Value::as_str)
    }
}
