//! Value source resolution.
//!
//! Decides, per field, where its working values come from:
//!
//! 1. an entry for the field's (prefixed) key in the submitted input, even an
//!    empty one, wins entirely;
//! 2. otherwise the bound object's value for the declared name is used;
//! 3. otherwise the field has no value.
//!
//! Resolution never fails.

use tracing::trace;

use crate::data::{InputData, ObjectData};
use crate::fields::{Field, FieldKind, Splitted};

/// Where a field's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Input,
    Object,
    Empty,
}

/// Extracts the submitted values for a field.
///
/// Splitted fields read one value per part key and count as submitted when
/// any part key is present; missing parts resolve to an empty string.
pub fn input_values(field: &Field, input: &InputData) -> Option<Vec<String>> {
    match field.kind() {
        FieldKind::Splitted(splitted) => {
            let keys: Vec<String> = splitted
                .parts()
                .iter()
                .map(|part| Splitted::part_key(field.name(), part))
                .collect();
            if !keys.iter().any(|key| input.contains_key(key)) {
                return None;
            }
            Some(
                keys.iter()
                    .map(|key| input.get(key).unwrap_or_default().to_string())
                    .collect(),
            )
        }
        _ => input.get_all(field.name()).map(<[String]>::to_vec),
    }
}

/// Loads both value sources into a field and reports which one wins.
pub fn resolve(field: &mut Field, input: Option<&InputData>, object: Option<&ObjectData>) -> ValueSource {
    if let Some(values) = input.and_then(|input| input_values(field, input)) {
        field.set_input_values(values);
    }
    if let Some(value) = object.and_then(|object| object.get(field.declared_name())) {
        field.set_object_value(value.clone());
    }

    let source = if field.is_input_bound() {
        ValueSource::Input
    } else if field.object_value().is_some() {
        ValueSource::Object
    } else {
        ValueSource::Empty
    };
    trace!(field = field.name(), ?source, "resolved field value");
    source
}
