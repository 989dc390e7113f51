//! Key/value filter set passed through to page loaders
//!
//! A filter whose value is "empty" (`null`, `false`, `""`, `0`) is treated as
//! unset and dropped, so `{category: ""}` and `{}` request the same list.

use std::collections::BTreeMap;

use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, Value>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a filter, or removes it when the value is empty
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if is_empty_value(&value) {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Builder-style [`FilterSet::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn has_active_filters(&self) -> bool {
        !self.0.is_empty()
    }

    /// Checks a record's fields against every filter
    ///
    /// Strings match case-insensitively by substring, arrays match when they
    /// contain the filter value, everything else must be equal.
    pub fn matches(&self, fields: &serde_json::Map<String, Value>) -> bool {
        self.0.iter().all(|(key, expected)| {
            fields
                .get(key)
                .is_some_and(|actual| value_matches(actual, expected))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSet
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut filters = Self::new();
        for (key, value) in iter {
            filters.set(key, value);
        }
        filters
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn value_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(actual), Value::String(expected)) => actual
            .to_lowercase()
            .contains(&expected.to_lowercase()),
        (Value::Array(items), expected) => items.iter().any(|item| item == expected),
        (actual, expected) => actual == expected,
    }
}
