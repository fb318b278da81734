//! Field validators.
//!
//! Validators run after coercion, once per accepted value, on the stripped
//! string form of the value.

use regex::Regex;

use crate::render::in_values;

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

impl<F> Validator for F
where
    F: Fn(&str) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, value: &str) -> Result<(), String> {
        self(value)
    }

    fn message(&self) -> &str {
        "Invalid value."
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("Ensure this value has at least {min_length} characters."),
        }
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            min_length,
            message: message.into(),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that requires the whole value to match a pattern.
///
/// The pattern is anchored on both ends, so `[a-z]+` rejects `"ab1"`.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    pattern: Regex,
    message: String,
}

impl RegexValidator {
    /// Compiles the pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{pattern})$"))?,
            message: "Enter a valid value.".to_string(),
        })
    }

    /// Sets a custom message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for RegexValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that bounds a numeric value. Either bound may be open.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: Option<f64>,
    max: Option<f64>,
    message: Option<String>,
}

impl RangeValidator {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    /// Uses one message for every failure instead of the bound-specific ones.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn fail(&self, default: String) -> Result<(), String> {
        Err(self.message.clone().unwrap_or(default))
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let Some(num) = crate::coerce::float(value) else {
            return self.fail("Enter a number.".to_string());
        };
        if let Some(min) = self.min.filter(|min| num < *min) {
            return self.fail(format!("Ensure this value is greater than or equal to {min}."));
        }
        if let Some(max) = self.max.filter(|max| num > *max) {
            return self.fail(format!("Ensure this value is less than or equal to {max}."));
        }
        Ok(())
    }

    fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("Enter a value within range.")
    }
}

/// Validator that only accepts one of a fixed set of choices.
///
/// Comparison follows the same string-equality policy used to render
/// selected options.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    choices: Vec<String>,
    message: String,
}

impl ChoiceValidator {
    /// Creates a new ChoiceValidator.
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            choices: choices.into_iter().map(|c| c.to_string()).collect(),
            message: "Select a valid choice.".to_string(),
        }
    }

    /// Sets a custom message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator for ChoiceValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if in_values(value, &self.choices) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}
