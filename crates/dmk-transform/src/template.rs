use std::collections::BTreeMap;

use dmk_core::{format_number, FieldState, ModValue};
use dmk_schema::{FieldKind, FieldSpec};

pub mod environment;
pub mod scenario;

pub use environment::environment_template;
pub use scenario::scenario_template;

pub fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders a scalar attribute value. Only `Present` values with non-empty
/// text make it into output; `Unset` and `Disabled` both mean "omit".
pub(crate) fn attr_text(state: &FieldState) -> Option<String> {
    let rendered = state.value()?.render();
    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Time-period attribute: exactly one trailing `y`, even when the stored
/// value already carries the unit.
pub(crate) fn attr_period(state: &FieldState) -> Option<String> {
    let rendered = match state.value()? {
        ModValue::Text(text) => {
            let trimmed = text.trim();
            trimmed.strip_suffix('y').unwrap_or(trimmed).to_string()
        }
        other => other.render(),
    };
    if rendered.is_empty() {
        None
    } else {
        Some(format!("{}y", rendered))
    }
}

pub(crate) fn push_attr(attrs: &mut Vec<String>, name: &str, value: Option<String>) {
    if let Some(value) = value {
        attrs.push(format!("{}=\"{}\"", name, xml_escape(&value)));
    }
}

/// Range fields serialize as a `min_*`/`max_*` attribute pair.
pub(crate) fn push_range_attrs(attrs: &mut Vec<String>, name: &str, state: &FieldState) {
    if let Some(ModValue::Range { min, max }) = state.value() {
        attrs.push(format!("min_{}=\"{}\"", name, format_number(*min)));
        attrs.push(format!("max_{}=\"{}\"", name, format_number(*max)));
    }
}

/// Appends one attribute in the representation its spec kind mandates.
/// Callers invoke this in their declared field order, which fixes the
/// attribute order of the output.
pub(crate) fn push_spec_attr(attrs: &mut Vec<String>, spec: &FieldSpec, state: &FieldState) {
    match spec.kind {
        FieldKind::Period => push_attr(attrs, spec.name, attr_period(state)),
        FieldKind::Range => push_range_attrs(attrs, spec.name, state),
        _ => push_attr(attrs, spec.name, attr_text(state)),
    }
}

/// Self-closing element; an attribute-less leaf is a dead node and
/// renders as the empty string.
pub(crate) fn leaf(name: &str, attrs: Vec<String>) -> String {
    if attrs.is_empty() {
        String::new()
    } else {
        format!("<{} {}/>", name, attrs.join(" "))
    }
}

/// Nesting element: renders the open/close pair only when at least one
/// child produced non-empty output; falls back to a self-closing tag when
/// it still carries attributes, and to nothing at all otherwise.
pub(crate) fn container(name: &str, attrs: Vec<String>, children: &[String]) -> String {
    let body = children
        .iter()
        .filter(|child| !child.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    let head = if attrs.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, attrs.join(" "))
    };

    if !body.is_empty() {
        format!("<{}>\n{}\n</{}>", head, indent(&body), name)
    } else if !attrs.is_empty() {
        format!("<{}/>", head)
    } else {
        String::new()
    }
}

/// Scalar section element: `<name value="..."/>`.
pub(crate) fn value_element(name: &str, state: &FieldState) -> String {
    match attr_text(state) {
        Some(value) => format!("<{} value=\"{}\"/>", name, xml_escape(&value)),
        None => String::new(),
    }
}

static UNSET: FieldState = FieldState::Unset;

pub(crate) fn get_field<'a>(
    fields: &'a BTreeMap<String, FieldState>,
    name: &str,
) -> &'a FieldState {
    fields.get(name).unwrap_or(&UNSET)
}

pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("  {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod template_tests {
    use super::*;

    #[test]
    fn xml_escape_covers_markup_characters() {
        assert_eq!(
            xml_escape(r#"<a & "b">"#),
            "&lt;a &amp; &quot;b&quot;&gt;"
        );
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn attr_period_never_double_suffixes() {
        let number = FieldState::present(ModValue::Number(1.5));
        assert_eq!(attr_period(&number), Some("1.5y".to_string()));

        let already_suffixed = FieldState::present(ModValue::Text("1.5y".to_string()));
        assert_eq!(attr_period(&already_suffixed), Some("1.5y".to_string()));
    }

    #[test]
    fn attr_text_omits_unset_disabled_and_empty() {
        assert_eq!(attr_text(&FieldState::Unset), None);
        assert_eq!(attr_text(&FieldState::Disabled), None);
        assert_eq!(
            attr_text(&FieldState::present(ModValue::Text("  ".to_string()))),
            None
        );
    }

    #[test]
    fn empty_composite_renders_as_empty_string_not_empty_tag_pair() {
        assert_eq!(container("goals", Vec::new(), &[]), "");
        assert_eq!(
            container("goals", Vec::new(), &[String::new(), String::new()]),
            ""
        );
    }

    #[test]
    fn container_with_children_indents_them() {
        let rendered = container(
            "goals",
            Vec::new(),
            &["<goal id=\"a\"/>".to_string()],
        );
        assert_eq!(rendered, "<goals>\n  <goal id=\"a\"/>\n</goals>");
    }

    #[test]
    fn leaf_without_attributes_is_a_dead_node() {
        assert_eq!(leaf("disaster", Vec::new()), "");
    }
}
