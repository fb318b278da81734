//! Field declarations loaded from serialized configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Field, FieldKind};
use crate::error::{FormError, Result};
use crate::validation::{
    ChoiceValidator, MaxLengthValidator, MinLengthValidator, RangeValidator, RegexValidator,
};

fn default_strict() -> bool {
    true
}

fn default_sep() -> String {
    ",".to_string()
}

/// Serializable description of a field.
///
/// ```rust
/// use formbind::FieldSpec;
///
/// let specs = FieldSpec::from_json(r#"[
///     {"name": "subject", "required": true, "max_length": 80},
///     {"name": "email", "kind": "email"},
///     {"name": "birthday", "kind": {"splitted": "date"}}
/// ]"#).unwrap();
/// assert_eq!(specs.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default)]
    pub collection: bool,
    #[serde(default = "default_sep")]
    pub sep: String,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_num: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_num: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub error_messages: HashMap<String, String>,
}

impl FieldSpec {
    /// Parses a JSON array of field specs.
    pub fn from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the field.
    ///
    /// Fails if `pattern` is not a valid regex. The rest of the configuration
    /// is checked when a form binds the field.
    pub fn into_field(self) -> Result<Field> {
        let mut field = Field::new(self.name.clone(), self.kind);
        if let Some(label) = self.label {
            field = field.label(label);
        }
        if let Some(text) = self.help_text {
            field = field.help_text(text);
        }
        if self.required {
            field = field.required();
        }
        if !self.strict {
            field = field.lenient();
        }
        field = field.sep(self.sep);
        if self.collection {
            field = field.collection();
        }
        if self.multiple {
            field = field.multiple();
        }
        if let Some(num) = self.min_num {
            field = field.min_num(num);
        }
        if let Some(num) = self.max_num {
            field = field.max_num(num);
        }
        if let Some(len) = self.min_length {
            field = field.validator(MinLengthValidator::new(len));
        }
        if let Some(len) = self.max_length {
            field = field.validator(MaxLengthValidator::new(len));
        }
        if let Some(pattern) = &self.pattern {
            let validator = RegexValidator::new(pattern)
                .map_err(|err| FormError::construction(&self.name, err.to_string()))?;
            field = field.validator(validator);
        }
        if self.min.is_some() || self.max.is_some() {
            field = field.validator(RangeValidator::new(self.min, self.max));
        }
        if let Some(choices) = self.choices {
            field = field.validator(ChoiceValidator::new(choices));
        }
        for (kind, message) in self.error_messages {
            field = field.error_message(kind, message);
        }
        Ok(field)
    }
}
