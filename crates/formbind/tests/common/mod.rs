#![allow(dead_code)]

use formbind::{BoundForm, Field, FieldValue, Form, HookRegistry, InputData, ObjectData};
use serde::{Deserialize, Serialize};

/// Routes `tracing` output through the test harness. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub struct ContactForm;

impl Form for ContactForm {
    fn fields() -> Vec<Field> {
        vec![
            Field::text("subject").required(),
            Field::email("email"),
            Field::text("message")
                .required()
                .error_message("required", "write something!"),
        ]
    }
}

pub struct LoremForm;

impl Form for LoremForm {
    fn fields() -> Vec<Field> {
        vec![Field::text("lorem"), Field::text("ipsum")]
    }
}

pub struct AbcdForm;

impl Form for AbcdForm {
    fn fields() -> Vec<Field> {
        ["a", "b", "c", "d"].into_iter().map(Field::text).collect()
    }
}

pub struct ProfileForm;

impl Form for ProfileForm {
    fn fields() -> Vec<Field> {
        vec![
            Field::text("name").required().label("Name"),
            Field::integer("age"),
            Field::splitted("born", formbind::Splitted::Date),
            Field::text("tags").collection(),
        ]
    }

    fn hooks(hooks: &mut HookRegistry) {
        hooks.clean("name", |value| match value {
            FieldValue::Text(name) => Ok(FieldValue::Text(name.trim_matches('*').to_string())),
            other => Ok(other),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub subject: String,
    pub email: Option<String>,
    pub message: String,
}

pub fn contact() -> Contact {
    Contact {
        subject: "Hello world".to_string(),
        email: Some("hello@world.com".to_string()),
        message: "Lorem ipsum.".to_string(),
    }
}

pub fn contact_input() -> InputData {
    InputData::new()
        .with("subject", "Hello world")
        .with("email", "hello@world.com")
        .with("message", "Lorem ipsum.")
}

pub fn bind<F: Form>(input: Option<&InputData>, object: Option<&ObjectData>) -> BoundForm {
    F::bind(input, object).unwrap_or_else(|e| panic!("Failed to bind form: {e}"))
}
