//! Splitted fields: one logical value submitted as several scalar parts.
//!
//! Each part is submitted under its own key (`name[part]`) and carries
//! exactly one value. The composing field assembles the parts, always in the
//! order returned by [`Splitted::parts`].

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::value::FieldValue;

/// The composite value a splitted field assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Splitted {
    /// `year`, `month`, `day`.
    Date,
    /// `hour`, `minute`, `second`.
    Time,
    /// `year`, `month`, `day`, `hour`, `minute`, `second`.
    DateTime,
}

impl Splitted {
    /// Names of the sub-parts in assembly order.
    pub fn parts(self) -> &'static [&'static str] {
        match self {
            Self::Date => &["year", "month", "day"],
            Self::Time => &["hour", "minute", "second"],
            Self::DateTime => &["year", "month", "day", "hour", "minute", "second"],
        }
    }

    /// Input key of one part.
    pub fn part_key(field_name: &str, part: &str) -> String {
        format!("{field_name}[{part}]")
    }

    /// Assembles stripped part values into one value.
    ///
    /// Every part must be an integer except a trailing `second`, which
    /// defaults to zero when blank. Returns `None` when the parts do not form
    /// a valid value.
    pub fn assemble(self, parts: &[String]) -> Option<FieldValue> {
        let numbers = self.numbers(parts)?;
        match self {
            Self::Date => Self::date(&numbers[..3]).map(FieldValue::Date),
            Self::Time => Self::time(&numbers[..3]).map(FieldValue::Time),
            Self::DateTime => {
                let date = Self::date(&numbers[..3])?;
                let time = Self::time(&numbers[3..])?;
                Some(FieldValue::DateTime(NaiveDateTime::new(date, time)))
            }
        }
    }

    /// Decomposes a domain value into part strings.
    ///
    /// Accepts the ISO text form of the value (what `serde` produces for
    /// chrono types) or a mapping keyed by part name.
    pub fn decompose(self, value: &Value) -> Vec<String> {
        if let Value::Object(map) = value {
            return self
                .parts()
                .iter()
                .map(|part| map.get(*part).and_then(crate::data::stringify).unwrap_or_default())
                .collect();
        }

        let Some(text) = value.as_str() else {
            return Vec::new();
        };
        let numbers: Option<Vec<u32>> = match self {
            Self::Date => coerce::date(text).map(|d| Self::date_parts(&d).to_vec()),
            Self::Time => coerce::time(text).map(|t| Self::time_parts(&t).to_vec()),
            Self::DateTime => coerce::datetime(text).map(|dt| {
                let mut parts = Self::date_parts(&dt.date()).to_vec();
                parts.extend(Self::time_parts(&dt.time()));
                parts
            }),
        };

        numbers
            .map(|numbers| numbers.iter().map(u32::to_string).collect())
            .unwrap_or_default()
    }

    fn numbers(self, parts: &[String]) -> Option<Vec<u32>> {
        let expected = self.parts();
        if parts.len() != expected.len() {
            return None;
        }
        parts
            .iter()
            .zip(expected)
            .map(|(value, name)| match (value.as_str(), *name) {
                ("", "second") => Some(0),
                (value, _) => value.parse().ok(),
            })
            .collect()
    }

    fn date(numbers: &[u32]) -> Option<NaiveDate> {
        let year = i32::try_from(numbers[0]).ok()?;
        NaiveDate::from_ymd_opt(year, numbers[1], numbers[2])
    }

    fn time(numbers: &[u32]) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(numbers[0], numbers[1], numbers[2])
    }

    fn date_parts(date: &NaiveDate) -> [u32; 3] {
        // Years before 1 CE are not representable in a form part.
        let year = u32::try_from(date.year()).unwrap_or_default();
        [year, date.month(), date.day()]
    }

    fn time_parts(time: &NaiveTime) -> [u32; 3] {
        [time.hour(), time.minute(), time.second()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_assemble_date() {
        assert_eq!(
            Splitted::Date.assemble(&strings(&["2024", "2", "29"])),
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
        assert_eq!(Splitted::Date.assemble(&strings(&["2023", "2", "29"])), None);
        assert_eq!(Splitted::Date.assemble(&strings(&["2024", "", "1"])), None);
        assert_eq!(Splitted::Date.assemble(&strings(&["2024", "1"])), None);
    }

    #[test]
    fn test_assemble_time_defaults_seconds() {
        assert_eq!(
            Splitted::Time.assemble(&strings(&["9", "30", ""])),
            Some(FieldValue::Time(NaiveTime::from_hms_opt(9, 30, 0).unwrap()))
        );
    }

    #[test]
    fn test_assemble_datetime() {
        let value = Splitted::DateTime.assemble(&strings(&["2024", "1", "15", "10", "5", "7"]));
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 5, 7)
            .unwrap();
        assert_eq!(value, Some(FieldValue::DateTime(expected)));
    }

    #[test]
    fn test_decompose() {
        assert_eq!(
            Splitted::Date.decompose(&json!("2024-01-15")),
            strings(&["2024", "1", "15"])
        );
        assert_eq!(
            Splitted::DateTime.decompose(&json!("2024-01-15T10:05:00")),
            strings(&["2024", "1", "15", "10", "5", "0"])
        );
        assert_eq!(
            Splitted::Time.decompose(&json!({"hour": 8, "minute": 15})),
            strings(&["8", "15", ""])
        );
        assert!(Splitted::Date.decompose(&json!("not a date")).is_empty());
        assert!(Splitted::Date.decompose(&json!(12)).is_empty());
    }
}
