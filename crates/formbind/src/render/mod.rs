//! HTML rendering helpers.
//!
//! Rendering only reads a field's accessors (`name`, `value`, `values`,
//! `error`, `required`); it never changes field state.

mod bootstrap;
mod controls;

pub use bootstrap::{bootstrap_control, render_bootstrap_field, render_bootstrap_form};
pub use controls::Choice;

use std::collections::BTreeMap;
use std::fmt::Display;

/// Value of an HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Rendered as `key="value"`.
    Text(String),
    /// `true` renders the bare key, `false` omits the attribute.
    Flag(bool),
}

impl AttrValue {
    /// Returns the text if this is a valued attribute.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<usize> for AttrValue {
    fn from(n: usize) -> Self {
        Self::Text(n.to_string())
    }
}

/// Attributes that can be applied to a rendered control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    attrs: BTreeMap<String, AttrValue>,
}

impl Attrs {
    /// Creates new empty attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Sets an attribute unless it is already present.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Gets a valued attribute as text.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(AttrValue::as_text)
    }

    /// Removes an attribute.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Renders the attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        html_attrs(self)
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Serializes attributes.
///
/// `className` becomes `class` and underscores become hyphens. Valued
/// attributes come first, then bare boolean ones, each group sorted.
pub fn html_attrs(attrs: &Attrs) -> String {
    let mut valued = Vec::new();
    let mut flags = Vec::new();

    for (key, value) in &attrs.attrs {
        let key = if key == "className" {
            "class".to_string()
        } else {
            key.replace('_', "-")
        };
        match value {
            AttrValue::Text(text) => valued.push(format!(r#"{key}="{}""#, escape_attr(text))),
            AttrValue::Flag(true) => flags.push(key),
            AttrValue::Flag(false) => {}
        }
    }

    valued.sort();
    flags.sort();
    valued.extend(flags);
    valued.join(" ")
}

/// Escapes an attribute value. Single quotes are left alone since values
/// are always double-quoted.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Tests whether a value is among a list of values, comparing both sides
/// as strings.
pub fn in_values<V, S>(value: V, values: &[S]) -> bool
where
    V: Display,
    S: Display,
{
    let value = value.to_string();
    values.iter().any(|item| item.to_string() == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_attrs() {
        let attrs = Attrs::new()
            .with("id", "text1")
            .with("className", "myclass")
            .with("data_id", 1)
            .with("checked", true)
            .with("ignore", false);
        assert_eq!(
            html_attrs(&attrs),
            r#"class="myclass" data-id="1" id="text1" checked"#
        );
    }

    #[test]
    fn test_html_attrs_empty() {
        assert_eq!(html_attrs(&Attrs::new()), "");
    }

    #[test]
    fn test_html_attrs_bad() {
        let attrs = Attrs::new().with("myattr", "a'b\"><script>bad();</script>");
        assert_eq!(
            attrs.to_html(),
            r#"myattr="a'b&quot;&gt;&lt;script&gt;bad();&lt;/script&gt;""#
        );
    }

    #[test]
    fn test_set_default_keeps_existing() {
        let mut attrs = Attrs::new().with("name", "custom");
        attrs.set_default("name", "field");
        attrs.set_default("type", "text");
        assert_eq!(attrs.get_text("name"), Some("custom"));
        assert_eq!(attrs.get_text("type"), Some("text"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_in_values() {
        assert!(in_values("2", &[1, 2, 3]));
        assert!(in_values(2, &["1", "2"]));
        assert!(!in_values("4", &["1", "2"]));
        assert!(!in_values("a", &Vec::<String>::new()));
    }
}
