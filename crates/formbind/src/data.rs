//! Submitted input and bound object data.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FormError, Result};

/// Raw submitted data: every key maps to an ordered list of strings.
///
/// A key that is present with an empty list (or a single empty string) means
/// the user submitted the field empty, which is different from the key not
/// being present at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputData {
    values: HashMap<String, Vec<String>>,
}

impl InputData {
    /// Creates empty input data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces every value of a key.
    pub fn set_all(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.values.insert(key.into(), values);
    }

    /// Builder method to append a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder method to set a list of values.
    #[must_use]
    pub fn with_all<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_all(key, values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns every value submitted for a key.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Returns the first value submitted for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns whether the key was submitted at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns whether no key was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of submitted keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Parses an `application/x-www-form-urlencoded` body or query string.
    ///
    /// Repeated keys accumulate in order.
    pub fn from_query_string(query: &str) -> Self {
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next().unwrap_or("");
                let value = parts.next().unwrap_or("");
                (urlencoding_decode(key), urlencoding_decode(value))
            })
            .collect()
    }

    /// Builds input data from a JSON object.
    ///
    /// Strings are taken as-is, arrays contribute one value per item, `null`
    /// contributes an empty list and other scalars are stringified.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| FormError::ParseError(format!("expected a JSON object, got {value}")))?;

        let mut data = Self::new();
        for (key, value) in object {
            let values = match value {
                Value::Array(items) => items.iter().filter_map(stringify).collect(),
                other => stringify(other).into_iter().collect(),
            };
            data.set_all(key.clone(), values);
        }
        Ok(data)
    }
}

impl<K, V> FromIterator<(K, V)> for InputData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

impl From<HashMap<String, String>> for InputData {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HashMap<String, Vec<String>>> for InputData {
    fn from(values: HashMap<String, Vec<String>>) -> Self {
        Self { values }
    }
}

/// A domain object bound to a form, seen as a key/value mapping.
///
/// Values are kept as JSON so that any `Serialize` type can be bound; its
/// serialized field names play the role of attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectData {
    values: Map<String, Value>,
}

impl ObjectData {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes a domain object into a mapping.
    pub fn from_serialize<T: Serialize + ?Sized>(object: &T) -> Result<Self> {
        match serde_json::to_value(object)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(FormError::InvalidObject(json_type(&other).to_string())),
        }
    }

    /// Builder method to set a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the value stored under a key. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|value| !value.is_null())
    }

    /// Returns whether the object has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for ObjectData {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for ObjectData
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Renders a JSON scalar the way it would appear in a form control.
///
/// Returns `None` for `null`.
pub(crate) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Percent-decoding for urlencoded bodies. Invalid escapes are kept verbatim.
fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        result.push(byte);
                        i += 3;
                    }
                    None => {
                        result.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                result.push(b' ');
                i += 1;
            }
            byte => {
                result.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&result).into_owned()
}
