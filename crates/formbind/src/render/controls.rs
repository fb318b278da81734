//! Plain HTML controls for a bound field.

use super::{escape_attr, html_attrs, html_escape, in_values, Attrs};
use crate::coerce;
use crate::fields::{Field, FieldKind, Splitted};

/// An entry of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// A single `<option>`.
    Option {
        label: String,
        value: Option<String>,
        attrs: Attrs,
    },
    /// An `<optgroup>` of options.
    Group { label: String, options: Vec<Choice> },
}

impl Choice {
    /// An option whose value is its label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self::Option {
            label: label.into(),
            value: None,
            attrs: Attrs::new(),
        }
    }

    /// An option with an explicit value.
    pub fn option(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Option {
            label: label.into(),
            value: Some(value.into()),
            attrs: Attrs::new(),
        }
    }

    /// An option group.
    pub fn group(label: impl Into<String>, options: Vec<Choice>) -> Self {
        Self::Group {
            label: label.into(),
            options,
        }
    }

    /// Sets extra attributes on an option. Groups are left unchanged.
    #[must_use]
    pub fn attrs(mut self, extra: Attrs) -> Self {
        if let Self::Option { attrs, .. } = &mut self {
            *attrs = extra;
        }
        self
    }
}

fn with_label(html: String, id: Option<&str>, label: Option<&str>) -> String {
    match label {
        Some(label) => format!(
            "<label for=\"{}\">{}</label>\n{html}",
            escape_attr(id.unwrap_or_default()),
            html_escape(label)
        ),
        None => html,
    }
}

impl Field {
    /// Renders arbitrary attributes.
    pub fn render_attrs(&self, attrs: &Attrs) -> String {
        html_attrs(attrs)
    }

    /// Renders the field as an `<input>`, of the field's input type unless
    /// `attrs` sets another one.
    pub fn as_input(&self, label: Option<&str>, mut attrs: Attrs) -> String {
        attrs.set_default("name", self.name());
        attrs.set_default("required", self.is_required());
        attrs.set_default("type", self.input_type());
        attrs.set_default("value", self.value());
        if label.is_some() {
            attrs.set_default("id", self.auto_id());
        }
        let html = format!("<input {}>", html_attrs(&attrs));
        with_label(html, attrs.get_text("id"), label)
    }

    /// Renders one part of a splitted field as a text `<input>`.
    pub fn as_input_part(&self, part: &str, label: Option<&str>, mut attrs: Attrs) -> String {
        attrs.set_default("name", Splitted::part_key(self.name(), part));
        attrs.set_default("value", self.part_value(part));
        attrs.set_default("required", self.is_required());
        attrs.set_default("type", "text");
        if label.is_some() {
            attrs.set_default("id", format!("{}_{part}", self.auto_id()));
        }
        let html = format!("<input {}>", html_attrs(&attrs));
        with_label(html, attrs.get_text("id"), label)
    }

    /// Renders the field as a `<textarea>`.
    pub fn as_textarea(&self, label: Option<&str>, mut attrs: Attrs) -> String {
        let value = attrs
            .remove("value")
            .and_then(|value| value.as_text().map(ToString::to_string))
            .unwrap_or_else(|| self.value());
        attrs.set_default("name", self.name());
        attrs.set_default("required", self.is_required());
        if label.is_some() {
            attrs.set_default("id", self.auto_id());
        }
        let html = format!(
            "<textarea {}>{}</textarea>",
            html_attrs(&attrs),
            html_escape(&value)
        );
        with_label(html, attrs.get_text("id"), label)
    }

    /// Renders the field as a checkbox.
    ///
    /// With a `value` attribute the box is checked when that value is among
    /// the field's values; without one, when the field's value is truthy.
    pub fn as_checkbox(&self, label: Option<&str>, attrs: Attrs) -> String {
        self.render_checkable("checkbox", label, attrs)
    }

    /// Renders the field as a radio button. Same checked rules as
    /// [`Field::as_checkbox`].
    pub fn as_radio(&self, label: Option<&str>, attrs: Attrs) -> String {
        self.render_checkable("radio", label, attrs)
    }

    fn render_checkable(&self, input_type: &str, label: Option<&str>, mut attrs: Attrs) -> String {
        attrs.set_default("name", self.name());
        attrs.set("type", input_type);
        attrs.set_default("required", self.is_required());

        let checked = match attrs.get_text("value") {
            Some(value) => in_values(value, &self.values()),
            None => coerce::boolean(&self.value()),
        };
        attrs.set_default("checked", checked);

        let html = format!("<input {}>", html_attrs(&attrs));
        match label {
            Some(label) => format!(
                r#"<label class="{input_type}">{html} {}</label>"#,
                html_escape(label)
            ),
            None => html,
        }
    }

    /// Renders only the opening `<select>` tag.
    pub fn as_select_tag(&self, label: Option<&str>, mut attrs: Attrs) -> String {
        attrs.set_default("name", self.name());
        attrs.set_default("required", self.is_required());
        attrs.set_default("multiple", self.is_multiple());
        if label.is_some() {
            attrs.set_default("id", self.auto_id());
        }
        let html = format!("<select {}>", html_attrs(&attrs));
        with_label(html, attrs.get_text("id"), label)
    }

    /// Renders a complete `<select>` with its options.
    pub fn as_select(&self, choices: &[Choice], label: Option<&str>, attrs: Attrs) -> String {
        let mut html = vec![self.as_select_tag(label, attrs)];
        html.extend(choices.iter().map(|choice| self.render_choice(choice)));
        html.push("</select>".to_string());
        html.join("\n")
    }

    fn render_choice(&self, choice: &Choice) -> String {
        match choice {
            Choice::Option {
                label,
                value,
                attrs,
            } => self.render_option(label, value.as_deref(), attrs.clone()),
            Choice::Group { label, options } => self.render_optgroup(label, options, Attrs::new()),
        }
    }

    /// Renders an `<optgroup>` with its options.
    pub fn render_optgroup(&self, label: &str, options: &[Choice], mut attrs: Attrs) -> String {
        attrs.set("label", label);
        let mut html = vec![format!("<optgroup {}>", html_attrs(&attrs))];
        for option in options {
            html.push(match option {
                Choice::Option {
                    label,
                    value,
                    attrs,
                } => self.render_option(label, value.as_deref(), attrs.clone()),
                // Groups cannot nest in HTML; inner groups contribute their options.
                Choice::Group { options, .. } => options
                    .iter()
                    .map(|inner| self.render_choice(inner))
                    .collect::<Vec<_>>()
                    .join("\n"),
            });
        }
        html.push("</optgroup>".to_string());
        html.join("\n")
    }

    /// Renders an `<option>`, selected when its value is among the field's
    /// values. The value defaults to the label.
    pub fn render_option(&self, label: &str, value: Option<&str>, mut attrs: Attrs) -> String {
        let value = value.unwrap_or(label);
        attrs.set_default("value", value);
        attrs.set("selected", in_values(value, &self.values()));
        format!("<option {}>{}</option>", html_attrs(&attrs), html_escape(label))
    }

    /// Renders the error message, or nothing if the field has no error.
    pub fn render_error(&self, tag: &str, mut attrs: Attrs) -> String {
        let Some(error) = self.error() else {
            return String::new();
        };
        attrs.set_default("className", "error");
        format!(
            "<{tag} {}>{}</{tag}>",
            html_attrs(&attrs),
            html_escape(error)
        )
    }

    /// Renders the default control for the field kind.
    pub fn as_widget(&self, label: Option<&str>, attrs: Attrs) -> String {
        match self.kind() {
            FieldKind::Boolean => self.as_checkbox(label, attrs),
            FieldKind::Splitted(splitted) => splitted
                .parts()
                .iter()
                .map(|part| {
                    let mut part_attrs = attrs.clone();
                    if let Some(id) = attrs.get_text("id") {
                        part_attrs.set("id", format!("{id}_{part}"));
                    }
                    self.as_input_part(part, None, part_attrs)
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => self.as_input(label, attrs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_attrs() {
        let field = Field::text("t");
        let attrs = Attrs::new()
            .with("id", "text1")
            .with("className", "myclass")
            .with("data_id", 1)
            .with("checked", true)
            .with("ignore", false);
        assert_eq!(
            field.render_attrs(&attrs),
            r#"class="myclass" data-id="1" id="text1" checked"#
        );
        assert_eq!(field.render_attrs(&Attrs::new()), "");
    }

    #[test]
    fn test_as_input() {
        let mut field = Field::email("email").required();
        field.set_input_values(["a@b.co"]);
        assert_eq!(
            field.as_input(None, Attrs::new()),
            r#"<input name="email" type="email" value="a@b.co" required>"#
        );
    }

    #[test]
    fn test_as_input_with_label() {
        let field = Field::text("name");
        assert_eq!(
            field.as_input(Some("Your <name>"), Attrs::new().with("className", "x")),
            "<label for=\"form_name\">Your &lt;name&gt;</label>\n\
             <input class=\"x\" id=\"form_name\" name=\"name\" type=\"text\" value=\"\">"
        );
    }

    #[test]
    fn test_as_textarea_escapes_value() {
        let mut field = Field::text("body");
        field.set_input_values(["<b>hi</b>"]);
        assert_eq!(
            field.as_textarea(None, Attrs::new()),
            r#"<textarea name="body">&lt;b&gt;hi&lt;/b&gt;</textarea>"#
        );
    }

    #[test]
    fn test_checkbox_checked_state() {
        let mut field = Field::text("tags").multiple();
        field.set_input_values(["1", "3"]);
        let html = field.as_checkbox(None, Attrs::new().with("value", 3));
        assert_eq!(html, r#"<input name="tags" type="checkbox" value="3" checked>"#);
        let html = field.as_checkbox(None, Attrs::new().with("value", 2));
        assert_eq!(html, r#"<input name="tags" type="checkbox" value="2">"#);

        let mut flag = Field::boolean("agree");
        flag.set_input_values(["on"]);
        assert!(flag.as_checkbox(Some("I agree"), Attrs::new()).contains("checked"));
        flag.set_input_values(["off"]);
        assert!(!flag.as_checkbox(None, Attrs::new()).contains("checked"));
    }

    #[test]
    fn test_as_radio_label() {
        let field = Field::text("size");
        assert_eq!(
            field.as_radio(Some("Small"), Attrs::new().with("value", "s")),
            r#"<label class="radio"><input name="size" type="radio" value="s"> Small</label>"#
        );
    }

    #[test]
    fn test_as_select() {
        let mut field = Field::text("color");
        field.set_object_value("g");
        let html = field.as_select(
            &[
                Choice::option("Red", "r"),
                Choice::group("Greens", vec![Choice::option("Green", "g"), Choice::labeled("Lime")]),
            ],
            None,
            Attrs::new(),
        );
        assert_eq!(
            html,
            "<select name=\"color\">\n\
             <option value=\"r\">Red</option>\n\
             <optgroup label=\"Greens\">\n\
             <option value=\"g\" selected>Green</option>\n\
             <option value=\"Lime\">Lime</option>\n\
             </optgroup>\n\
             </select>"
        );
    }

    #[test]
    fn test_select_tag_multiple() {
        let field = Field::text("tags").multiple().required();
        assert_eq!(
            field.as_select_tag(None, Attrs::new()),
            r#"<select name="tags" multiple required>"#
        );
    }

    #[test]
    fn test_render_error() {
        let mut field = Field::integer("age");
        assert_eq!(field.render_error("div", Attrs::new()), "");
        field.set_input_values(["x"]);
        let _ = field.validate_and_clean();
        assert_eq!(
            field.render_error("span", Attrs::new()),
            r#"<span class="error">Invalid type.</span>"#
        );
    }

    #[test]
    fn test_splitted_widget() {
        let mut field = Field::splitted("born", Splitted::Date);
        field.set_object_value("1990-03-04");
        let html = field.as_widget(None, Attrs::new());
        assert!(html.contains(r#"name="born[year]" type="text" value="1990""#));
        assert!(html.contains(r#"name="born[day]" type="text" value="4""#));
    }

    #[test]
    fn test_splitted_widget_part_ids() {
        let field = Field::splitted("at", Splitted::Time);
        let html = field.as_widget(None, Attrs::new().with("id", "start"));
        assert!(html.contains(r#"id="start_hour""#));
        assert!(html.contains(r#"id="start_minute""#));
        assert!(html.contains(r#"id="start_second""#));
        assert!(!html.contains(r#"id="start""#));
    }
}
