//! Bootstrap 5 markup for bound fields and forms.

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};

use super::{escape_attr, Attrs};
use crate::fields::{Field, FieldKind};
use crate::form::BoundForm;

/// Renders the field's control with Bootstrap classes.
///
/// Fields with an error get `is-invalid`.
pub fn bootstrap_control(field: &Field) -> String {
    let invalid = if field.error().is_some() { " is-invalid" } else { "" };

    match field.kind() {
        FieldKind::Boolean => {
            let attrs = Attrs::new()
                .with("className", format!("form-check-input{invalid}"))
                .with("id", field.auto_id());
            field.as_checkbox(None, attrs)
        }
        FieldKind::Splitted(splitted) => {
            let parts: Vec<String> = splitted
                .parts()
                .iter()
                .map(|part| {
                    let attrs = Attrs::new()
                        .with("className", format!("form-control{invalid}"))
                        .with("id", format!("{}_{part}", field.auto_id()))
                        .with("placeholder", *part);
                    field.as_input_part(part, None, attrs)
                })
                .collect();
            html! { div.class("input-group") }
                .raw(parts.join(""))
                .render()
        }
        _ => {
            let attrs = Attrs::new()
                .with("className", format!("form-control{invalid}"))
                .with("id", field.auto_id());
            field.as_input(None, attrs)
        }
    }
}

/// Renders a field with its label, error and help text.
pub fn render_bootstrap_field(field: &Field) -> String {
    let id = match field.kind() {
        FieldKind::Splitted(splitted) => match splitted.parts().first() {
            Some(part) => format!("{}_{part}", field.auto_id()),
            None => field.auto_id(),
        },
        _ => field.auto_id(),
    };
    let required_marker = if field.is_required() { " *" } else { "" };
    let label_text = format!("{}{}", field.label_text(), required_marker);
    let control = bootstrap_control(field);
    let help_text = field.help();

    let (wrapper_class, label_el) = if field.kind() == FieldKind::Boolean {
        (
            "mb-3 form-check",
            html! { label.for_(#id).class("form-check-label") { #label_text } },
        )
    } else {
        (
            "mb-3",
            html! { label.for_(#id).class("form-label") { #label_text } },
        )
    };

    let wrapper = html! { div.class(#wrapper_class) };
    let wrapper = if field.kind() == FieldKind::Boolean {
        wrapper.raw(&control).raw(label_el.render())
    } else {
        wrapper.raw(label_el.render()).raw(&control)
    };

    wrapper
        .children(field.error().into_iter(), |error, div: Element<Div>| {
            div.class("invalid-feedback").text(error)
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| h.class("form-text").text(help_text.unwrap_or("")))
        })
        .render()
}

/// Renders a complete bound form.
///
/// Errors of the last validation are listed in an alert above the fields.
/// A form carrying the deletion marker keeps it as a hidden input.
pub fn render_bootstrap_form(form: &BoundForm, action: &str, method: &str) -> String {
    let mut html_form = html! {
        form.action(#action).method(#method)
    };

    let errors = form.errors();
    if !errors.is_empty() {
        html_form = html_form.child::<Div, _>(|d| {
            d.class("alert alert-danger")
                .attr("role", "alert")
                .child::<Ul, _>(|ul| {
                    ul.class("mb-0").children(
                        errors.all_errors(),
                        |(field, message), li: Element<Li>| {
                            let text = format!("{}: {}", form[field].label_text(), message);
                            li.text(&text)
                        },
                    )
                })
        });
    }

    if form.is_deleted() {
        let marker = format!(
            r#"<input type="hidden" name="{}" value="1">"#,
            escape_attr(&form.deleted_key())
        );
        html_form = html_form.child::<Div, _>(|d| d.raw(&marker));
    }

    for field in form.fields() {
        let field_html = render_bootstrap_field(field);
        html_form = html_form.child::<Div, _>(|d| d.raw(&field_html));
    }

    html_form = html_form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                "Submit"
            }
        };
        d.raw(btn.render())
    });

    html_form.render()
}
