//! Scalar coercion of raw strings into typed values.
//!
//! Every function takes an already stripped string and either returns the
//! typed value or `None` when the string is not acceptable.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid url pattern")
});

const FALSE_VALUES: &[&str] = &["", "none", "0", "no", "nope", "nah", "off", "false"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Interprets form input as a boolean. Never fails.
pub fn boolean(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    !FALSE_VALUES.contains(&lowered.as_str())
}

/// Parses an integer.
pub fn integer(value: &str) -> Option<i64> {
    value.parse().ok()
}

/// Parses a finite float.
pub fn float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Accepts a syntactically valid email address, lowercasing the domain.
pub fn email(value: &str) -> Option<String> {
    if !EMAIL_RE.is_match(value) {
        return None;
    }
    let (local, domain) = value.rsplit_once('@')?;
    Some(format!("{local}@{}", domain.to_lowercase()))
}

/// Accepts an absolute http(s) URL.
pub fn url(value: &str) -> Option<String> {
    URL_RE.is_match(value).then(|| value.to_string())
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parses a datetime, with or without seconds, `T` or space separated.
pub fn datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parses a time, with or without seconds.
pub fn time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}
