//! # formbind
//!
//! Form declaration, data binding and validation.
//!
//! A form is a list of [`Field`]s. Binding a form takes submitted input
//! ([`InputData`], a multi-valued string map) and/or the current state of a
//! domain object ([`ObjectData`]). Each field displays the submitted strings
//! if it got any, else the object's value, and validation turns the
//! submitted strings into typed [`FieldValue`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use formbind::{Field, FieldValue, FormBuilder, InputData, ObjectData};
//!
//! let input = InputData::from_query_string("name=Ada&age=36&tags=a&tags=b");
//! let object = ObjectData::new().with("name", "Ada L.").with("age", 35);
//!
//! let mut form = FormBuilder::new()
//!     .field(Field::text("name").required())
//!     .field(Field::integer("age"))
//!     .field(Field::text("tags").multiple())
//!     .bind(Some(&input), Some(&object))
//!     .unwrap();
//!
//! let data = form.validate().unwrap();
//! assert_eq!(data.get("age"), Some(Some(&FieldValue::Int(36))));
//! assert_eq!(form.updated_fields().unwrap(), ["name", "age", "tags"]);
//! ```
//!
//! ## Declared forms
//!
//! ```rust
//! use formbind::{Field, Form, InputData};
//!
//! struct LoginForm;
//!
//! impl Form for LoginForm {
//!     fn fields() -> Vec<Field> {
//!         vec![Field::email("login").required(), Field::password("password").required()]
//!     }
//! }
//!
//! let input = InputData::new().with("login", "someone@example.com");
//! let mut form = LoginForm::bind(Some(&input), None).unwrap();
//! assert!(!form.is_valid());
//! assert_eq!(form.errors().get("password").unwrap(), ["This field is required."]);
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use formbind::{Field, FormBuilder};
//! use formbind::render::{render_bootstrap_form, Attrs};
//!
//! let form = FormBuilder::new()
//!     .field(Field::text("username").label("Username").required())
//!     .build()
//!     .unwrap();
//!
//! let html = render_bootstrap_form(&form, "/signup", "post");
//! assert!(html.contains("Username *"));
//!
//! let input = form["username"].as_input(None, Attrs::new().with("className", "wide"));
//! assert_eq!(input, r#"<input class="wide" name="username" type="text" value="" required>"#);
//! ```

mod error;
mod form;

pub mod coerce;
pub mod data;
pub mod fields;
pub mod render;
pub mod resolve;
pub mod validation;
pub mod value;

/// Separator between a form prefix and a field name.
pub const SEP: &str = "--";

/// Input key that marks a bound form for deletion.
pub const DELETED: &str = "_deleted";

pub use data::{InputData, ObjectData};
pub use error::{ErrorKind, FieldError, FormError, Result, ValidationErrors};
pub use fields::{Field, FieldKind, FieldSpec, HookRegistry, Splitted};
pub use form::{prefixed_name, BoundForm, Form, FormBuilder};
pub use render::{render_bootstrap_field, render_bootstrap_form};
pub use value::{CleanedData, FieldValue};
