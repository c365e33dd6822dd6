use dmk_core::{FieldState, ModValue, ScenarioState};

use crate::template::xml_escape;

/// One entry of the companion localization file. The game resolves
/// user-facing text (goal and milestone descriptions) through these keys
/// rather than inline attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    pub text: String,
}

/// Collects the localizable texts a scenario references: each enabled
/// goal's and milestone's description, keyed by the element's id.
pub fn scenario_strings(state: &ScenarioState) -> Vec<StringEntry> {
    let mut entries = Vec::new();
    for goal in &state.goals {
        push_entry(&mut entries, &goal.id, &goal.description, goal.disabled);
    }
    for milestone in &state.milestones {
        push_entry(
            &mut entries,
            &milestone.id,
            &milestone.description,
            milestone.disabled,
        );
    }
    entries
}

fn push_entry(
    entries: &mut Vec<StringEntry>,
    name: &str,
    description: &FieldState,
    disabled: bool,
) {
    if disabled {
        return;
    }
    let Some(text) = description.value().and_then(ModValue::as_text) else {
        return;
    };
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    entries.push(StringEntry {
        name: name.to_string(),
        text: text.to_string(),
    });
}

/// `<strings>` document. No entries means no document: the caller skips
/// writing the file instead of shipping an empty tag pair.
pub fn strings_template(entries: &[StringEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push("<strings>".to_string());
    for entry in entries {
        lines.push(format!(
            "  <string name=\"{}\">{}</string>",
            xml_escape(&entry.name),
            xml_escape(&entry.text)
        ));
    }
    lines.push("</strings>".to_string());
    lines.join("\n")
}
