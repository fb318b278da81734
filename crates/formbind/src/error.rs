//! Error types for forms.

use thiserror::Error;

/// Errors raised while declaring or binding a form.
///
/// These are programmer errors and surface immediately. Per-field validation
/// failures are never reported through this type; they are captured on the
/// field as a [`FieldError`].
#[derive(Debug, Error)]
pub enum FormError {
    /// A field was configured in a way the field kind does not support.
    #[error("invalid configuration for field {field}: {reason}")]
    Construction { field: String, reason: String },

    /// Two fields were declared with the same name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// The bound object did not serialize to a key/value mapping.
    #[error("bound object must be a mapping, got {0}")]
    InvalidObject(String),

    /// Input data parsing error.
    #[error("failed to parse form data: {0}")]
    ParseError(String),

    /// JSON conversion error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn construction(field: &str, reason: impl Into<String>) -> Self {
        Self::Construction {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Kind of a per-field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The field is required but every submitted value was empty.
    Required,
    /// A raw value could not be coerced into the field type.
    Type,
    /// Fewer values than `min_num` were submitted.
    MinNum,
    /// More values than `max_num` were submitted.
    MaxNum,
    /// A validator or a custom clean hook rejected the value.
    Invalid,
}

impl ErrorKind {
    /// Key used to look up a custom message in a field's `error_messages`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Type => "type",
            Self::MinNum => "min_num",
            Self::MaxNum => "max_num",
            Self::Invalid => "invalid",
        }
    }

    /// Built-in message used when the field does not configure one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Required => "This field is required.",
            Self::Type => "Invalid type.",
            Self::MinNum => "You need at least {num} values.",
            Self::MaxNum => "You can have at most {num} values.",
            Self::Invalid => "Invalid value.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure captured on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Display message, already resolved against the field's configuration.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Collection of validation errors by field, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        match self.errors.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => messages.push(message.into()),
            None => self
                .errors
                .push((field.to_string(), vec![message.into()])),
        }
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Returns the names of the fields with errors.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(name, _)| name.as_str())
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
