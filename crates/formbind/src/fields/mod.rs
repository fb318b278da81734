//! Form fields.
//!
//! A [`Field`] owns one named value slot. It keeps the raw submitted strings
//! apart from the value taken from a bound object, exposes the strings a
//! control should display ([`Field::values`]) and turns the submitted strings
//! into a committed [`FieldValue`] ([`Field::validate_and_clean`]).

mod hooks;
mod spec;
mod splitted;

pub use hooks::{CleanFn, HookRegistry, PrepareFn};
pub use spec::FieldSpec;
pub use splitted::Splitted;

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::data::stringify;
use crate::error::{self, ErrorKind, FieldError, FormError};
use crate::validation::Validator;
use crate::value::FieldValue;
use crate::SEP;

/// What a field coerces its raw strings into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    Email,
    Url,
    Boolean,
    Integer,
    Float,
    Date,
    DateTime,
    Time,
    /// A value assembled from several single-valued parts.
    Splitted(Splitted),
}

impl FieldKind {
    /// The `type` attribute used when rendering the field as an `<input>`.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text | Self::Splitted(_) => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Url => "url",
            Self::Boolean => "checkbox",
            Self::Integer | Self::Float => "number",
            Self::Date => "date",
            Self::DateTime => "datetime-local",
            Self::Time => "time",
        }
    }

    /// Whether blank strings are meaningful values for this kind.
    fn keeps_blank(self) -> bool {
        matches!(self, Self::Text | Self::Password | Self::Boolean)
    }

    fn coerce(self, value: &str) -> Option<FieldValue> {
        match self {
            Self::Text | Self::Password => Some(FieldValue::Text(value.to_string())),
            Self::Email => coerce::email(value).map(FieldValue::Text),
            Self::Url => coerce::url(value).map(FieldValue::Text),
            Self::Boolean => Some(FieldValue::Bool(coerce::boolean(value))),
            Self::Integer => coerce::integer(value).map(FieldValue::Int),
            Self::Float => coerce::float(value).map(FieldValue::Float),
            Self::Date => coerce::date(value).map(FieldValue::Date),
            Self::DateTime => coerce::datetime(value).map(FieldValue::DateTime),
            Self::Time => coerce::time(value).map(FieldValue::Time),
            Self::Splitted(_) => None,
        }
    }
}

/// A single named, typed value slot.
#[derive(Clone)]
pub struct Field {
    declared_name: String,
    name: String,
    prefix: Option<String>,
    kind: FieldKind,
    label: Option<String>,
    help_text: Option<String>,
    required: bool,
    strict: bool,
    collection: bool,
    sep: String,
    multiple: bool,
    min_num: Option<usize>,
    max_num: Option<usize>,
    error_messages: HashMap<String, String>,
    validators: Vec<Arc<dyn Validator>>,
    custom_prepare: Option<PrepareFn>,
    custom_clean: Option<CleanFn>,
    input_values: Option<Vec<String>>,
    object_value: Option<Value>,
    error: Option<FieldError>,
    error_value: Option<String>,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("collection", &self.collection)
            .field("multiple", &self.multiple)
            .field("input_values", &self.input_values)
            .field("object_value", &self.object_value)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl Field {
    /// Creates a new field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            declared_name: name.clone(),
            name,
            prefix: None,
            kind,
            label: None,
            help_text: None,
            required: false,
            strict: true,
            collection: false,
            sep: ",".to_string(),
            multiple: false,
            min_num: None,
            max_num: None,
            error_messages: HashMap::new(),
            validators: Vec::new(),
            custom_prepare: None,
            custom_clean: None,
            input_values: None,
            object_value: None,
            error: None,
            error_value: None,
        }
    }

    /// Creates a text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Creates a password field.
    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    /// Creates an email field.
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    /// Creates a URL field.
    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Url)
    }

    /// Creates a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Creates an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Creates a float field.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Creates a date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Creates a datetime field.
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Creates a time field.
    pub fn time(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Time)
    }

    /// Creates a splitted field assembled from several parts.
    pub fn splitted(name: impl Into<String>, splitted: Splitted) -> Self {
        Self::new(name, FieldKind::Splitted(splitted))
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the help text shown under the control.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Drops values that fail coercion instead of reporting an error.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Reads a list of values from one separated string.
    #[must_use]
    pub fn collection(mut self) -> Self {
        self.collection = true;
        self.multiple = false;
        self
    }

    /// Sets the separator used by collection fields.
    #[must_use]
    pub fn sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Reads a list of values from several submitted values.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self.collection = false;
        self
    }

    /// Sets the minimum number of values.
    #[must_use]
    pub fn min_num(mut self, num: usize) -> Self {
        self.min_num = Some(num);
        self
    }

    /// Sets the maximum number of values.
    #[must_use]
    pub fn max_num(mut self, num: usize) -> Self {
        self.max_num = Some(num);
        self
    }

    /// Overrides the message of an error kind (`required`, `type`, ...).
    #[must_use]
    pub fn error_message(mut self, kind: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_messages.insert(kind.into(), message.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Sets the prepare hook.
    #[must_use]
    pub fn prepare<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.custom_prepare = Some(Arc::new(hook));
        self
    }

    /// Sets the clean hook.
    #[must_use]
    pub fn clean<F>(mut self, hook: F) -> Self
    where
        F: Fn(FieldValue) -> Result<FieldValue, String> + Send + Sync + 'static,
    {
        self.custom_clean = Some(Arc::new(hook));
        self
    }

    /// Checks that the configuration is coherent.
    ///
    /// Forms run this for every field when they are bound.
    pub fn check(&self) -> error::Result<()> {
        if self.declared_name.is_empty() {
            return Err(FormError::construction("", "field name cannot be empty"));
        }
        if self.declared_name.contains(SEP) {
            return Err(FormError::construction(
                &self.declared_name,
                format!("field name cannot contain {SEP:?}"),
            ));
        }
        if matches!(self.kind, FieldKind::Splitted(_)) {
            if self.collection {
                return Err(FormError::construction(
                    &self.declared_name,
                    "a splitted field cannot be a collection",
                ));
            }
            if self.multiple {
                return Err(FormError::construction(
                    &self.declared_name,
                    "a splitted field cannot be multiple",
                ));
            }
        }
        if self.collection && self.sep.is_empty() {
            return Err(FormError::construction(
                &self.declared_name,
                "collection separator cannot be empty",
            ));
        }
        if let (Some(min), Some(max)) = (self.min_num, self.max_num) {
            if min > max {
                return Err(FormError::construction(
                    &self.declared_name,
                    format!("min_num {min} is greater than max_num {max}"),
                ));
            }
        }
        Ok(())
    }

    /// The name used in submitted data, including any form prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name the field was declared with.
    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    /// The form prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// HTML id derived from the prefix and the declared name.
    pub fn auto_id(&self) -> String {
        format!(
            "{}_{}",
            self.prefix.as_deref().unwrap_or("form"),
            self.declared_name
        )
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn input_type(&self) -> &'static str {
        self.kind.input_type()
    }

    /// The label, falling back to the declared name.
    pub fn label_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.declared_name)
    }

    pub fn help(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn custom_prepare(&self) -> Option<&PrepareFn> {
        self.custom_prepare.as_ref()
    }

    pub fn custom_clean(&self) -> Option<&CleanFn> {
        self.custom_clean.as_ref()
    }

    /// Applies the form prefix to the field name.
    pub(crate) fn apply_prefix(&mut self, prefix: &str) {
        self.name = format!("{prefix}{SEP}{}", self.declared_name);
        self.prefix = Some(prefix.to_string());
    }

    /// Attaches form-level hooks where the field declared none.
    pub(crate) fn attach_hooks(&mut self, hooks: &HookRegistry) {
        if self.custom_prepare.is_none() {
            self.custom_prepare = hooks.get_prepare(&self.declared_name).cloned();
        }
        if self.custom_clean.is_none() {
            self.custom_clean = hooks.get_clean(&self.declared_name).cloned();
        }
    }

    /// Stores submitted strings. The field becomes input-bound.
    pub fn set_input_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_values = Some(values.into_iter().map(Into::into).collect());
    }

    /// Stores the value taken from a bound object. `null` clears it.
    pub fn set_object_value(&mut self, value: impl Into<Value>) {
        let value = value.into();
        self.object_value = (!value.is_null()).then_some(value);
    }

    /// The raw submitted strings, `None` if the field was not submitted.
    pub fn input_values(&self) -> Option<&[String]> {
        self.input_values.as_deref()
    }

    pub fn object_value(&self) -> Option<&Value> {
        self.object_value.as_ref()
    }

    /// Whether the field received submitted input, even an empty one.
    pub fn is_input_bound(&self) -> bool {
        self.input_values.is_some()
    }

    /// The strings to display: submitted input if any, else the prepared
    /// object value, else nothing.
    pub fn values(&self) -> Vec<String> {
        match &self.input_values {
            Some(values) => values.clone(),
            None => self.object_values(),
        }
    }

    /// The first of [`Field::values`], or an empty string.
    pub fn value(&self) -> String {
        self.values().into_iter().next().unwrap_or_default()
    }

    /// The display value of one part of a splitted field.
    pub fn part_value(&self, part: &str) -> String {
        let FieldKind::Splitted(splitted) = self.kind else {
            return String::new();
        };
        splitted
            .parts()
            .iter()
            .position(|p| *p == part)
            .and_then(|index| self.values().into_iter().nth(index))
            .unwrap_or_default()
    }

    /// Whether the submitted input replaces what the bound object holds.
    ///
    /// Input equal to the object's projection is not an update, so an empty
    /// submission only counts over a non-empty object value. Splitted fields
    /// compare the assembled values, so `"03"` and `"3"` are the same month.
    pub fn is_updated(&self) -> bool {
        let Some(input) = &self.input_values else {
            return false;
        };
        if self.object_value.is_none() {
            return true;
        }
        let prepared = self.object_values();
        let submitted: Vec<String> = input.iter().map(|value| value.trim().to_string()).collect();
        if let FieldKind::Splitted(splitted) = self.kind {
            let assembled = (splitted.assemble(&submitted), splitted.assemble(&prepared));
            if let (Some(new), Some(old)) = assembled {
                return new != old;
            }
        }
        submitted != prepared
    }

    /// The error message of the last validation, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|err| err.message.as_str())
    }

    pub fn field_error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// The raw value that failed coercion, if that is why validation failed.
    pub fn error_value(&self) -> Option<&str> {
        self.error_value.as_deref()
    }

    /// Coerces and validates the submitted input.
    ///
    /// Returns the committed value (`None` when nothing was submitted) or the
    /// error, which is also kept on the field for display.
    pub fn validate_and_clean(&mut self) -> Result<Option<FieldValue>, FieldError> {
        self.error = None;
        self.error_value = None;

        let result = self.clean_input();
        if let Err(err) = &result {
            self.error = Some(err.clone());
        }
        result
    }

    fn clean_input(&mut self) -> Result<Option<FieldValue>, FieldError> {
        let raw: Vec<String> = self
            .input_values
            .iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .collect();

        if self.required && raw.iter().all(String::is_empty) {
            return Err(self.error_for(ErrorKind::Required, None));
        }

        if let FieldKind::Splitted(splitted) = self.kind {
            return self.clean_splitted(splitted, &raw);
        }

        let mut values = raw;
        if !self.kind.keeps_blank() {
            values.retain(|value| !value.is_empty());
        }
        if self.collection {
            values = self.split_collection(&values);
        }
        if values.is_empty() {
            return self.clean_nothing();
        }

        let mut accepted = Vec::with_capacity(values.len());
        for value in values {
            match self.kind.coerce(&value) {
                Some(typed) => accepted.push((value, typed)),
                None if self.strict => {
                    self.error_value = Some(value);
                    return Err(self.error_for(ErrorKind::Type, None));
                }
                None => {}
            }
        }
        if accepted.is_empty() {
            return self.clean_nothing();
        }

        self.check_count(accepted.len())?;
        for (value, _) in &accepted {
            for validator in &self.validators {
                validator
                    .validate(value)
                    .map_err(|message| FieldError::new(ErrorKind::Invalid, message))?;
            }
        }

        let mut typed = accepted.into_iter().map(|(_, typed)| typed);
        let value = if self.collection || self.multiple {
            FieldValue::List(typed.collect())
        } else {
            match typed.next() {
                Some(value) => value,
                None => return Ok(None),
            }
        };
        self.apply_clean(value).map(Some)
    }

    /// Outcome when no value survived cleaning. A required field fails, and
    /// a submitted field is still held to its minimum count.
    fn clean_nothing(&self) -> Result<Option<FieldValue>, FieldError> {
        if self.required {
            return Err(self.error_for(ErrorKind::Required, None));
        }
        if self.is_input_bound() && self.min_num.is_some() {
            self.check_count(0)?;
        }
        Ok(None)
    }

    fn clean_splitted(
        &mut self,
        splitted: Splitted,
        raw: &[String],
    ) -> Result<Option<FieldValue>, FieldError> {
        if raw.iter().all(String::is_empty) {
            return self.clean_nothing();
        }
        match splitted.assemble(raw) {
            Some(value) => {
                for validator in &self.validators {
                    validator
                        .validate(&value.to_string())
                        .map_err(|message| FieldError::new(ErrorKind::Invalid, message))?;
                }
                self.apply_clean(value).map(Some)
            }
            None if self.strict => {
                self.error_value = Some(raw.join(" "));
                Err(self.error_for(ErrorKind::Type, None))
            }
            None => self.clean_nothing(),
        }
    }

    fn split_collection(&self, values: &[String]) -> Vec<String> {
        let sep = self.sep.trim();
        let pattern = if sep.is_empty() {
            r"\s+".to_string()
        } else {
            format!(r"\s*{}\s*", regex::escape(sep))
        };
        // The pattern is built from an escaped literal, so it always compiles.
        let Ok(rx) = Regex::new(&pattern) else {
            return values.to_vec();
        };
        values
            .iter()
            .flat_map(|value| rx.split(value))
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    fn check_count(&self, count: usize) -> Result<(), FieldError> {
        if let Some(min) = self.min_num.filter(|min| count < *min) {
            return Err(self.error_for(ErrorKind::MinNum, Some(min)));
        }
        if let Some(max) = self.max_num.filter(|max| count > *max) {
            return Err(self.error_for(ErrorKind::MaxNum, Some(max)));
        }
        Ok(())
    }

    fn apply_clean(&self, value: FieldValue) -> Result<FieldValue, FieldError> {
        match &self.custom_clean {
            Some(clean) => clean(value).map_err(|message| FieldError::new(ErrorKind::Invalid, message)),
            None => Ok(value),
        }
    }

    fn error_for(&self, kind: ErrorKind, num: Option<usize>) -> FieldError {
        let template = self
            .error_messages
            .get(kind.as_str())
            .map_or(kind.default_message(), String::as_str);
        let message = match num {
            Some(num) => template.replace("{num}", &num.to_string()),
            None => template.to_string(),
        };
        FieldError::new(kind, message)
    }

    fn object_values(&self) -> Vec<String> {
        let Some(value) = &self.object_value else {
            return Vec::new();
        };
        match &self.custom_prepare {
            Some(prepare) => prepare(value),
            None => self.default_prepare(value),
        }
    }

    fn default_prepare(&self, value: &Value) -> Vec<String> {
        if let FieldKind::Splitted(splitted) = self.kind {
            return splitted.decompose(value);
        }
        match value {
            Value::Array(items) if self.multiple => items.iter().filter_map(stringify).collect(),
            Value::Array(items) if self.collection => {
                let items: Vec<String> = items.iter().filter_map(stringify).collect();
                vec![items.join(&self.sep)]
            }
            other => stringify(other).into_iter().collect(),
        }
    }
}
