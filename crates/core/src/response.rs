use crate::error::{ErrorBuilder, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

// 2^63 and 2^64, exactly representable as f64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Immutable wrapper around the `response` node of a successful call.
///
/// Every conversion is explicit and fails with a conversion error when the
/// JSON shape does not match. Numeric strings and `0`/`1` booleans are
/// accepted since the API uses both forms interchangeably.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VkResponse {
    value: Value,
}

impl VkResponse {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn raw(&self) -> &Value {
        &self.value
    }

    pub fn into_inner(self) -> Value {
        self.value
    }

    /// False for `null`, which the API uses for "no value"
    pub fn has_token(&self) -> bool {
        !self.value.is_null()
    }

    /// Child node by key, `None` when absent or null
    pub fn get(&self, key: &str) -> Option<VkResponse> {
        self.value
            .get(key)
            .filter(|v| !v.is_null())
            .map(|v| VkResponse::new(v.clone()))
    }

    /// Child node by key, failing when absent
    pub fn field(&self, key: &str) -> Result<VkResponse> {
        self.get(key)
            .ok_or_else(|| ErrorBuilder::response().missing_field(key))
    }

    pub fn as_i64(&self) -> Result<i64> {
        match &self.value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    // only whole floats within range; u64 beyond i64::MAX is rejected
                    n.as_f64()
                        .filter(|f| n.is_f64() && f.fract() == 0.0)
                        .filter(|f| *f >= -I64_BOUND && *f < I64_BOUND)
                        .map(|f| f as i64)
                })
                .ok_or_else(|| self.conversion_error("integer")),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| self.conversion_error("integer")),
            Value::Bool(b) => Ok(i64::from(*b)),
            _ => Err(self.conversion_error("integer")),
        }
    }

    pub fn as_u64(&self) -> Result<u64> {
        match &self.value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| n.is_f64() && f.fract() == 0.0)
                        .filter(|f| *f >= 0.0 && *f < U64_BOUND)
                        .map(|f| f as u64)
                })
                .ok_or_else(|| self.conversion_error("unsigned integer")),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| self.conversion_error("unsigned integer")),
            Value::Bool(b) => Ok(u64::from(*b)),
            _ => Err(self.conversion_error("unsigned integer")),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match &self.value {
            Value::Number(n) => n.as_f64().ok_or_else(|| self.conversion_error("number")),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| self.conversion_error("number")),
            _ => Err(self.conversion_error("number")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match &self.value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(self.conversion_error("boolean")),
            },
            Value::String(s) => match s.as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" => Ok(false),
                _ => Err(self.conversion_error("boolean")),
            },
            _ => Err(self.conversion_error("boolean")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        self.value
            .as_str()
            .ok_or_else(|| self.conversion_error("string"))
    }

    /// Unix timestamp; `0` and `null` mean unset
    pub fn as_datetime(&self) -> Result<Option<DateTime<Utc>>> {
        if self.value.is_null() {
            return Ok(None);
        }
        match self.as_i64()? {
            0 => Ok(None),
            seconds => DateTime::from_timestamp(seconds, 0)
                .map(Some)
                .ok_or_else(|| self.conversion_error("unix timestamp")),
        }
    }

    /// Homogeneous sequence from a JSON array, a `{count, items}` object or a
    /// comma-joined string such as `"1,2,3"`
    pub fn as_sequence_of<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        match &self.value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| VkResponse::new(item.clone()).deserialize())
                .collect(),
            Value::Object(map) if map.contains_key("items") => {
                VkResponse::new(map["items"].clone()).as_sequence_of()
            }
            Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
            Value::String(s) => s.split(',').map(|piece| parse_piece(piece.trim())).collect(),
            _ => Err(self.conversion_error("sequence")),
        }
    }

    /// Deserialize the whole node into a DTO
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.value.clone()).map_err(|e| {
            ErrorBuilder::response().conversion(
                std::any::type_name::<T>(),
                format!("{} ({e})", describe(&self.value)),
            )
        })
    }

    fn conversion_error(&self, expected: &'static str) -> crate::Error {
        ErrorBuilder::response().conversion(expected, describe(&self.value))
    }
}

impl From<Value> for VkResponse {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for VkResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

fn parse_piece<T: DeserializeOwned>(piece: &str) -> Result<T> {
    serde_json::from_str(piece)
        .or_else(|_| serde_json::from_value(Value::String(piece.to_string())))
        .map_err(|_| {
            ErrorBuilder::response().conversion(std::any::type_name::<T>(), format!("\"{piece}\""))
        })
}

fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    let mut rendered = value.to_string();
    if rendered.len() > 64 {
        let cut = (0..=64).rev().find(|i| rendered.is_char_boundary(*i)).unwrap_or(0);
        rendered.truncate(cut);
        rendered.push_str("...");
    }
    format!("{kind} {rendered}")
}
