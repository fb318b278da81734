//! Normalized field values and the cleaned data of a validated form.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// A value after coercion and cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns the text if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the items if this is a list value.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts the value to JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::from(*n),
            Self::Float(f) => Value::from(*f),
            Self::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            Self::Time(t) => Value::String(t.format("%H:%M:%S").to_string()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// The committed values of a valid form, keyed by declared field name.
///
/// Fields that received no value map to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedData {
    entries: Vec<(String, Option<FieldValue>)>,
}

impl CleanedData {
    pub(crate) fn push(&mut self, name: &str, value: Option<FieldValue>) {
        self.entries.push((name.to_string(), value));
    }

    /// Returns the cleaned value of a field.
    ///
    /// The outer `Option` tells whether the field exists.
    pub fn get(&self, name: &str) -> Option<Option<&FieldValue>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_ref())
    }

    /// Returns whether a field is part of the data.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Iterates over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the form had no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the data to a JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| {
                let value = value.as_ref().map_or(Value::Null, FieldValue::to_json);
                (key.clone(), value)
            })
            .collect();
        Value::Object(map)
    }

    /// Deserializes the data into a domain type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_display() {
        let list = FieldValue::List(vec![FieldValue::Int(1), "two".into()]);
        assert_eq!(list.to_string(), "1,two");
        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(date.to_string(), "2024-01-05");
    }

    #[test]
    fn test_cleaned_data_into_struct() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Contact {
            subject: String,
            age: Option<i64>,
            born: NaiveDate,
        }

        let mut data = CleanedData::default();
        data.push("subject", Some("Hi".into()));
        data.push("age", None);
        data.push(
            "born",
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(1990, 3, 4).unwrap())),
        );

        let contact: Contact = data.deserialize().unwrap();
        assert_eq!(
            contact,
            Contact {
                subject: "Hi".to_string(),
                age: None,
                born: NaiveDate::from_ymd_opt(1990, 3, 4).unwrap(),
            }
        );
    }

    #[test]
    fn test_cleaned_data_lookup() {
        let mut data = CleanedData::default();
        data.push("lorem", None);
        data.push("ipsum", Some("bar".into()));

        assert_eq!(data.get("lorem"), Some(None));
        assert_eq!(data.get("ipsum"), Some(Some(&FieldValue::from("bar"))));
        assert_eq!(data.get("missing"), None);
        assert_eq!(
            data.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            ["lorem", "ipsum"]
        );
    }
}
