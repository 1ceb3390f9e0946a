//! Per-field JSON-to-type rules for DTOs, used through `#[serde(with = ...)]`.
//!
//! The API is loose about scalar encodings: integers may arrive as strings,
//! booleans as `0`/`1`, and unset timestamps as `0`. Each rule reads the raw
//! JSON value and delegates to the matching [`VkResponse`] accessor.

use crate::response::VkResponse;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<VkResponse, D::Error> {
    Value::deserialize(deserializer).map(VkResponse::new)
}

/// `Option<DateTime<Utc>>` from a unix timestamp; `0` and `null` map to `None`
pub mod unix_time {
    use super::*;
    use chrono::{DateTime, Utc};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(at) => serializer.serialize_i64(at.timestamp()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        read(deserializer)?.as_datetime().map_err(D::Error::custom)
    }
}

/// `bool` from `0`/`1`, written back as `0`/`1`
pub mod int_bool {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let value = read(deserializer)?;
        if !value.has_token() {
            return Ok(false);
        }
        value.as_bool().map_err(D::Error::custom)
    }
}

/// `i64` from a number or a numeric string
pub mod lenient_i64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        read(deserializer)?.as_i64().map_err(D::Error::custom)
    }
}

/// `Option<f64>` from a number or a decimal string such as `"10.50"`
pub mod lenient_f64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(number) => serializer.serialize_f64(*number),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = read(deserializer)?;
        if !value.has_token() {
            return Ok(None);
        }
        value.as_f64().map(Some).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default, with = "unix_time")]
        date: Option<DateTime<Utc>>,
        #[serde(default, with = "int_bool")]
        flag: bool,
        #[serde(with = "lenient_i64")]
        limit: i64,
        #[serde(default, with = "lenient_f64")]
        amount: Option<f64>,
    }

    #[test]
    fn test_loose_scalars() {
        let sample: Sample = serde_json::from_value(json!({
            "date": 1609459200,
            "flag": 1,
            "limit": "100",
            "amount": "10.50"
        }))
        .unwrap();

        assert_eq!(sample.date.unwrap().timestamp(), 1609459200);
        assert!(sample.flag);
        assert_eq!(sample.limit, 100);
        assert_eq!(sample.amount, Some(10.5));
    }

    #[test]
    fn test_zero_timestamp_and_missing_fields() {
        let sample: Sample = serde_json::from_value(json!({"date": 0, "limit": 0})).unwrap();
        assert_eq!(sample.date, None);
        assert!(!sample.flag);
        assert_eq!(sample.amount, None);
    }

    #[test]
    fn test_wire_form_is_written_back() {
        let sample = Sample {
            date: None,
            flag: true,
            limit: 5,
            amount: None,
        };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["flag"], json!(1));
        assert_eq!(value["date"], json!(null));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(serde_json::from_value::<Sample>(json!({"limit": "many"})).is_err());
        assert!(serde_json::from_value::<Sample>(json!({"limit": 1, "flag": 3})).is_err());
    }
}
