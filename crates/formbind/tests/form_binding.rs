//! Tests for binding submitted input and objects to forms.

mod common;
use common::*;

use formbind::{prefixed_name, Form, InputData, ObjectData, DELETED, SEP};
use serde_json::json;

#[test]
fn declare_form() {
    let form = bind::<ContactForm>(None, None);

    assert_eq!(form.field_names(), ["subject", "email", "message"]);
    assert!(form.updated_fields().is_none());
    assert_eq!(form["subject"].name(), "subject");
    assert_eq!(form["email"].name(), "email");
    assert_eq!(form["message"].name(), "message");
    assert!(!form.is_deleted());
}

#[test]
fn declare_form_with_prefix() {
    let form = ContactForm::builder().prefix("myform").build().unwrap();

    assert_eq!(form.field_names(), ["subject", "email", "message"]);
    assert_eq!(form["subject"].name(), format!("myform{SEP}subject"));
    assert_eq!(form["email"].name(), format!("myform{SEP}email"));
    assert_eq!(form["message"].name(), format!("myform{SEP}message"));
    assert_eq!(form["email"].auto_id(), "myform_email");
}

#[test]
fn prefixed_input_is_read_under_the_prefix() {
    let input = InputData::new()
        .with("subject", "unprefixed")
        .with(prefixed_name(Some("p"), "subject"), "prefixed");
    let form = ContactForm::builder()
        .prefix("p")
        .bind(Some(&input), None)
        .unwrap();

    assert_eq!(form["subject"].value(), "prefixed");
    assert_eq!(form["email"].value(), "");
}

#[test]
fn load_object_data() {
    init_tracing();
    let object = ObjectData::new()
        .with("subject", "Hello world")
        .with("email", "hello@world.com")
        .with("message", "Lorem ipsum.");
    let form = bind::<ContactForm>(Some(&InputData::new()), Some(&object));

    assert_eq!(form["subject"].value(), "Hello world");
    assert_eq!(form["email"].value(), "hello@world.com");
    assert_eq!(form["message"].value(), "Lorem ipsum.");
}

#[test]
fn load_object_instance() {
    let obj = contact();
    let object = ObjectData::from_serialize(&obj).unwrap();
    let form = bind::<ContactForm>(Some(&InputData::new()), Some(&object));

    assert_eq!(form["subject"].value(), obj.subject);
    assert_eq!(Some(form["email"].value()), obj.email);
    assert_eq!(form["message"].value(), obj.message);
}

#[test]
fn null_object_value_is_absent() {
    let obj = Contact {
        email: None,
        ..contact()
    };
    let object = ObjectData::from_serialize(&obj).unwrap();
    let form = bind::<ContactForm>(None, Some(&object));

    assert!(form["email"].object_value().is_none());
    assert!(form["email"].values().is_empty());
}

#[test]
fn input_wins_over_object() {
    let input = InputData::new().with("subject", "").with("email", "new@world.com");
    let object = ObjectData::from_serialize(&contact()).unwrap();
    let form = bind::<ContactForm>(Some(&input), Some(&object));

    assert_eq!(form["subject"].value(), "");
    assert_eq!(form["email"].value(), "new@world.com");
    assert_eq!(form["message"].value(), "Lorem ipsum.");
}

#[test]
fn bind_from_query_string() {
    let input = InputData::from_query_string("subject=Hi%20there&message=a+b&email=x%40y.io");
    let form = bind::<ContactForm>(Some(&input), None);

    assert_eq!(form["subject"].value(), "Hi there");
    assert_eq!(form["message"].value(), "a b");
    assert_eq!(form["email"].value(), "x@y.io");
}

#[test]
fn bind_from_json_input() {
    let input = InputData::from_json(&json!({
        "a": "1",
        "b": ["x", "y"],
    }))
    .unwrap();
    let form = bind::<AbcdForm>(Some(&input), None);

    assert_eq!(form["a"].values(), ["1"]);
    assert_eq!(form["b"].values(), ["x", "y"]);
    assert!(form["c"].values().is_empty());
}

#[test]
fn deleted() {
    let input = contact_input().with(DELETED, "1");
    let form = bind::<ContactForm>(Some(&input), None);

    assert!(form.is_deleted());
    assert_eq!(form["subject"].value(), "Hello world");
    assert_eq!(form["email"].value(), "hello@world.com");
    assert_eq!(form["message"].value(), "Lorem ipsum.");
}

#[test]
fn deleted_with_prefix() {
    let prefix = "yass";
    let input = InputData::new()
        .with(format!("{prefix}{SEP}{DELETED}"), "1")
        .with(format!("{prefix}{SEP}subject"), "Hello world")
        .with(format!("{prefix}{SEP}email"), "hello@world.com")
        .with(format!("{prefix}{SEP}message"), "Lorem ipsum.");
    let form = ContactForm::builder()
        .prefix(prefix)
        .bind(Some(&input), None)
        .unwrap();

    assert!(form.is_deleted());
    assert_eq!(form.deleted_key(), "yass--_deleted");
    assert_eq!(form["subject"].value(), "Hello world");
    assert_eq!(form["email"].value(), "hello@world.com");
    assert_eq!(form["message"].value(), "Lorem ipsum.");
}

#[test]
fn deleted_marker_is_prefix_specific() {
    let input = contact_input().with(DELETED, "1");
    let form = ContactForm::builder()
        .prefix("other")
        .bind(Some(&input), None)
        .unwrap();
    assert!(!form.is_deleted());
}

#[test]
fn falsy_deleted_marker() {
    let input = contact_input().with(DELETED, "false");
    let form = bind::<ContactForm>(Some(&input), None);
    assert!(!form.is_deleted());
}

#[test]
fn updated_fields_from_empty() {
    let input = InputData::new().with("b", "foo").with("d", "bar");
    let mut form = bind::<AbcdForm>(Some(&input), None);

    assert!(form.is_valid());
    assert_eq!(form.updated_fields().unwrap(), ["b", "d"]);
}

#[test]
fn updated_fields_from_object() {
    init_tracing();
    let input = InputData::new()
        .with("a", "a")
        .with("b", "new")
        .with("c", "c")
        .with("d", "new");
    let object = ObjectData::new()
        .with("a", "a")
        .with("b", "b")
        .with("c", "c")
        .with("d", "d");
    let mut form = bind::<AbcdForm>(Some(&input), Some(&object));

    assert!(form.is_valid());
    assert_eq!(form.updated_fields().unwrap(), ["b", "d"]);
}

#[test]
fn updated_fields_include_cleared_values() {
    let input = InputData::new().with("a", "");
    let object = ObjectData::new().with("a", "a").with("b", "b");
    let mut form = bind::<AbcdForm>(Some(&input), Some(&object));

    assert!(form.is_valid());
    assert_eq!(form.updated_fields().unwrap(), ["a"]);
}
