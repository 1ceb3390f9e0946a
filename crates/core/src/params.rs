//! Parameter bag construction for outgoing calls.
//!
//! Each request-configuration value turns its fields into a [`ParameterBag`]
//! using one of four serialization rules:
//! - raw values through [`ToParam`] (integers, strings, `1`/`0` booleans)
//! - comma-joined lists via [`ParameterBag::add_list`]
//! - unix timestamps for `DateTime<Utc>`
//! - enum wire names for types declared with `wire_enum!`
//!
//! Unset optional values are never written. Required and mutually exclusive
//! parameters are checked with [`require`], [`at_most_one`] and [`exactly_one`]
//! before the bag ever reaches the dispatcher.

use crate::error::{ArgumentError, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Conversion of a single value into its wire string
pub trait ToParam {
    fn to_param(&self) -> String;
}

macro_rules! display_to_param {
    ($($ty:ty),+) => {
        $(impl ToParam for $ty {
            fn to_param(&self) -> String {
                self.to_string()
            }
        })+
    };
}

display_to_param!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f64, String, str);

impl ToParam for bool {
    fn to_param(&self) -> String {
        let flag = if *self { "1" } else { "0" };
        flag.to_string()
    }
}

impl ToParam for DateTime<Utc> {
    fn to_param(&self) -> String {
        self.timestamp().to_string()
    }
}

impl ToParam for url::Url {
    fn to_param(&self) -> String {
        self.as_str().to_string()
    }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

/// Ordered, key-unique set of wire parameters for one call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    entries: IndexMap<String, String>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-serialized value, replacing any previous one in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn add<V: ToParam>(&mut self, name: &str, value: V) -> &mut Self {
        self.insert(name, value.to_param())
    }

    pub fn add_opt<V: ToParam>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.add(name, value);
        }
        self
    }

    /// Comma-joined list; an empty list is treated as unset
    pub fn add_list<I, V>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToParam,
    {
        let joined = join_list(values);
        if !joined.is_empty() {
            self.insert(name, joined);
        }
        self
    }

    /// JSON-encoded value, used by endpoints taking structured payloads
    pub fn add_json<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<&mut Self> {
        let encoded = serde_json::to_string(value)?;
        Ok(self.insert(name, encoded))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterBag {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Join values with `,` using their wire form
pub fn join_list<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: ToParam,
{
    values
        .into_iter()
        .map(|v| v.to_param())
        .collect::<Vec<_>>()
        .join(",")
}

/// Unwrap a required parameter or fail locally
pub fn require<T>(name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| ArgumentError::missing_required(name).into())
}

/// Fail locally when a required list is empty
pub fn require_non_empty<T>(name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(ArgumentError::missing_required(name).into());
    }
    Ok(())
}

/// Fail locally when a required string is missing or blank
pub fn require_text<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ArgumentError::missing_required(name).into()),
    }
}

/// Mutually exclusive pair where both may be omitted
pub fn at_most_one(first: (&str, bool), second: (&str, bool)) -> Result<()> {
    if first.1 && second.1 {
        return Err(ArgumentError::conflicting(first.0, second.0).into());
    }
    Ok(())
}

/// Mutually exclusive pair where one of the two is required
pub fn exactly_one(first: (&str, bool), second: (&str, bool)) -> Result<()> {
    at_most_one(first, second)?;
    if !first.1 && !second.1 {
        return Err(ArgumentError::one_of_required(first.0, second.0).into());
    }
    Ok(())
}
