//! Form declaration, binding and validation.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::coerce;
use crate::data::{InputData, ObjectData};
use crate::error::{FormError, Result, ValidationErrors};
use crate::fields::{Field, FieldSpec, HookRegistry};
use crate::resolve::{resolve, ValueSource};
use crate::value::{CleanedData, FieldValue};
use crate::{DELETED, SEP};

/// Trait for declared form types.
///
/// ```rust
/// use formbind::{Field, Form, HookRegistry, InputData};
///
/// struct ContactForm;
///
/// impl Form for ContactForm {
///     fn fields() -> Vec<Field> {
///         vec![
///             Field::text("subject").required(),
///             Field::email("email"),
///             Field::text("message")
///                 .required()
///                 .error_message("required", "write something!"),
///         ]
///     }
///
///     fn hooks(hooks: &mut HookRegistry) {
///         hooks.clean("subject", Ok);
///     }
/// }
///
/// let input = InputData::new().with("email", "hello@world.com");
/// let mut form = ContactForm::bind(Some(&input), None).unwrap();
/// assert!(form.validate().is_none());
/// assert_eq!(form["message"].error(), Some("write something!"));
/// ```
pub trait Form: Sized {
    /// Returns the field specifications, in display order.
    fn fields() -> Vec<Field>;

    /// Registers form-level prepare/clean hooks.
    fn hooks(_hooks: &mut HookRegistry) {}

    /// Starts a builder with this form's declaration.
    fn builder() -> FormBuilder {
        FormBuilder::declared::<Self>()
    }

    /// Binds submitted input and/or an object to a new form instance.
    fn bind(input: Option<&InputData>, object: Option<&ObjectData>) -> Result<BoundForm> {
        Self::builder().bind(input, object)
    }
}

/// Namespaces a key under a form prefix.
pub fn prefixed_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{SEP}{name}"),
        None => name.to_string(),
    }
}

/// Builds forms programmatically.
#[derive(Debug, Default)]
pub struct FormBuilder {
    fields: Vec<Field>,
    hooks: HookRegistry,
    prefix: Option<String>,
}

impl FormBuilder {
    /// Creates a new form builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a declared form type.
    pub fn declared<F: Form>() -> Self {
        let mut hooks = HookRegistry::new();
        F::hooks(&mut hooks);
        Self {
            fields: F::fields(),
            hooks,
            prefix: None,
        }
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds fields described by serialized specs.
    ///
    /// Fails if a spec carries an invalid pattern.
    pub fn specs(mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Result<Self> {
        for spec in specs {
            self.fields.push(spec.into_field()?);
        }
        Ok(self)
    }

    /// Sets the prefix used to namespace field names.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Registers a form-level prepare hook.
    #[must_use]
    pub fn prepare_hook<F>(mut self, field: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&Value) -> Vec<String> + Send + Sync + 'static,
    {
        self.hooks.prepare(field, hook);
        self
    }

    /// Registers a form-level clean hook.
    #[must_use]
    pub fn clean_hook<F>(mut self, field: impl Into<String>, hook: F) -> Self
    where
        F: Fn(FieldValue) -> std::result::Result<FieldValue, String> + Send + Sync + 'static,
    {
        self.hooks.clean(field, hook);
        self
    }

    /// Returns the field specifications.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Builds an unbound form.
    pub fn build(self) -> Result<BoundForm> {
        self.bind(None, None)
    }

    /// Builds the form and binds data to it.
    ///
    /// Fails if a field is misconfigured or declared twice.
    pub fn bind(self, input: Option<&InputData>, object: Option<&ObjectData>) -> Result<BoundForm> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            field.check()?;
            if !seen.insert(field.declared_name().to_string()) {
                return Err(FormError::DuplicateField(field.declared_name().to_string()));
            }
        }
        for name in self.hooks.names() {
            if !seen.contains(name) {
                warn!(hook = name, "hook registered for an undeclared field");
            }
        }

        let prefix = self.prefix.filter(|prefix| !prefix.is_empty());
        let mut fields = self.fields;
        let mut from_input = 0;
        for field in &mut fields {
            field.attach_hooks(&self.hooks);
            if let Some(prefix) = &prefix {
                field.apply_prefix(prefix);
            }
            if resolve(field, input, object) == ValueSource::Input {
                from_input += 1;
            }
        }

        let deleted_key = prefixed_name(prefix.as_deref(), DELETED);
        let deleted = input
            .and_then(|input| input.get(&deleted_key))
            .is_some_and(coerce::boolean);

        debug!(
            prefix = prefix.as_deref().unwrap_or(""),
            fields = fields.len(),
            from_input,
            deleted,
            "bound form"
        );

        Ok(BoundForm {
            fields,
            prefix,
            deleted,
            has_input: input.is_some_and(|input| !input.is_empty()),
            has_object: object.is_some(),
            updated_fields: None,
            state: State::Unvalidated,
        })
    }
}

#[derive(Debug, Clone)]
enum State {
    Unvalidated,
    Valid(CleanedData),
    Invalid,
}

/// A form instance with data bound to its fields.
///
/// Validation runs at most once; afterwards every call reads the cached
/// result.
#[derive(Debug)]
pub struct BoundForm {
    fields: Vec<Field>,
    prefix: Option<String>,
    deleted: bool,
    has_input: bool,
    has_object: bool,
    updated_fields: Option<Vec<String>>,
    state: State,
}

impl BoundForm {
    /// Validates every field and returns the cleaned data if all passed.
    ///
    /// A form bound to an object without submitted input never validates.
    pub fn validate(&mut self) -> Option<&CleanedData> {
        if matches!(self.state, State::Unvalidated) {
            self.state = self.run_validation();
        }
        match &self.state {
            State::Valid(data) => Some(data),
            State::Unvalidated | State::Invalid => None,
        }
    }

    /// Validates if needed and tells whether the form is valid.
    pub fn is_valid(&mut self) -> bool {
        self.validate().is_some()
    }

    /// Whether validation already ran.
    pub fn is_validated(&self) -> bool {
        !matches!(self.state, State::Unvalidated)
    }

    /// The cleaned data, if the form was validated successfully.
    pub fn cleaned_data(&self) -> Option<&CleanedData> {
        match &self.state {
            State::Valid(data) => Some(data),
            State::Unvalidated | State::Invalid => None,
        }
    }

    /// Validates and deserializes the cleaned data into a domain type.
    ///
    /// Returns `Ok(None)` when the form is invalid.
    pub fn cleaned_into<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        self.validate()
            .map(|data| data.deserialize::<T>())
            .transpose()
    }

    fn run_validation(&mut self) -> State {
        if self.has_object && !self.has_input {
            debug!("form bound to an object without input is never valid");
            self.updated_fields = Some(Vec::new());
            return State::Invalid;
        }

        let mut data = CleanedData::default();
        let mut updated = Vec::new();
        let mut failed = 0;

        for field in &mut self.fields {
            match field.validate_and_clean() {
                Ok(value) => {
                    if field.is_updated() {
                        updated.push(field.declared_name().to_string());
                    }
                    data.push(field.declared_name(), value);
                }
                Err(err) => {
                    failed += 1;
                    debug!(field = field.name(), kind = %err.kind, "field failed validation");
                }
            }
        }

        debug!(failed, updated = updated.len(), "validated form");
        self.updated_fields = Some(updated);

        if failed == 0 {
            State::Valid(data)
        } else {
            State::Invalid
        }
    }

    /// Declared names of the fields whose value came from submitted input.
    ///
    /// `None` until the form is validated.
    pub fn updated_fields(&self) -> Option<&[String]> {
        self.updated_fields.as_deref()
    }

    /// Error messages of the failing fields, in declaration order.
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Some(message) = field.error() {
                errors.add(field.declared_name(), message);
            }
        }
        errors
    }

    /// Whether the submitted input carries the deletion marker.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// The key of the deletion marker for this form.
    pub fn deleted_key(&self) -> String {
        prefixed_name(self.prefix.as_deref(), DELETED)
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns a field by declared name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.declared_name() == name)
    }

    /// Iterates over the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::declared_name).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::ops::Index<&str> for BoundForm {
    type Output = Field;

    fn index(&self, name: &str) -> &Field {
        self.field(name)
            .unwrap_or_else(|| panic!("form has no field named {name:?}"))
    }
}
