use std::collections::{BTreeMap, BTreeSet};

use dmk_core::{Collection, EntityRecord, FieldState, ModState, ModValue};
use dmk_parser::{DocumentKind, XmlDocument, XmlElementNode};
use dmk_schema::{field_spec, Domain, FieldKind, FieldSpec};

use crate::normalize::{normalize_range, normalize_value};

pub mod environment;
pub mod scenario;

pub use environment::environment_from_tree;
pub use scenario::scenario_from_tree;

/// Forward transform entry point: parsed document → editor state. Never
/// fails on user data; anything malformed resolves to the unset state of
/// the field it would have filled.
pub fn state_from_document(document: &XmlDocument) -> ModState {
    match document.kind {
        DocumentKind::Environment => {
            ModState::Environment(environment_from_tree(&document.root))
        }
        DocumentKind::Scenario => ModState::Scenario(scenario_from_tree(&document.root)),
    }
}

/// Reads one attribute through its spec. Missing or invalid input resolves
/// to `Unset` — the single null-resolution convention for the whole
/// forward transform.
pub(crate) fn read_attr(node: &XmlElementNode, spec: &FieldSpec) -> FieldState {
    match spec.kind {
        FieldKind::Range => read_range_attrs(node, spec),
        _ => match node.attr(spec.name) {
            Some(raw) => FieldState::from_normalized(normalize_value(spec, raw)),
            None => FieldState::Unset,
        },
    }
}

/// Range fields arrive as a `min_*`/`max_*` attribute pair. A half-present
/// pair counts as absent: partial imports are disallowed.
fn read_range_attrs(node: &XmlElementNode, spec: &FieldSpec) -> FieldState {
    let min_name = format!("min_{}", spec.name);
    let max_name = format!("max_{}", spec.name);
    match (node.attr(&min_name), node.attr(&max_name)) {
        (Some(min_raw), Some(max_raw)) => {
            FieldState::from_normalized(normalize_range(spec, min_raw, max_raw))
        }
        _ => FieldState::Unset,
    }
}

/// Reads a scalar section stored as `<name value="..."/>` under `parent`.
/// `<name enabled="false"/>` maps to the explicit `Disabled` state so the
/// UI can tell "switched off" apart from "never configured".
pub(crate) fn read_value_element(
    parent: &XmlElementNode,
    domain: Domain,
    name: &str,
) -> FieldState {
    let Some(spec) = field_spec(domain, name) else {
        return FieldState::Unset;
    };
    let Some(child) = parent.find_child(name) else {
        return FieldState::Unset;
    };
    if child.attr("enabled") == Some("false") {
        return FieldState::Disabled;
    }
    match child.attr("value") {
        Some(raw) => FieldState::from_normalized(normalize_value(spec, raw)),
        None => FieldState::Unset,
    }
}

/// Same convention for token-list sections (`<deposits values="..."/>`).
pub(crate) fn read_tokens_element(
    parent: &XmlElementNode,
    domain: Domain,
    name: &str,
) -> FieldState {
    let Some(spec) = field_spec(domain, name) else {
        return FieldState::Unset;
    };
    let Some(child) = parent.find_child(name) else {
        return FieldState::Unset;
    };
    if child.attr("enabled") == Some("false") {
        return FieldState::Disabled;
    }
    match child.attr("values") {
        Some(raw) => FieldState::from_normalized(normalize_value(spec, raw)),
        None => FieldState::Unset,
    }
}

/// Builds an EntityRecord from a node's attributes. A missing or invalid
/// `required` field drops the whole record — never a half-populated
/// entity.
pub(crate) fn entity_record(
    node: &XmlElementNode,
    kind: &str,
    specs: &'static [FieldSpec],
    required: Option<&str>,
) -> Option<EntityRecord> {
    let mut record = EntityRecord::new(kind);
    for spec in specs {
        let state = read_attr(node, spec);
        if required == Some(spec.name) && !state.is_present() {
            return None;
        }
        if state.is_present() {
            record.set_field(spec.name, state);
        }
    }
    Some(record)
}

pub(crate) struct ListOptions {
    pub group_tag: &'static str,
    pub item_tag: &'static str,
    pub unique_key: Option<&'static str>,
    pub min_items: usize,
    pub max_items: usize,
}

/// Reads a repeated-element collection in document order. Deduplicates by
/// `unique_key` when set (first occurrence wins); an out-of-bounds item
/// count resolves the whole collection to empty.
pub(crate) fn read_record_list(
    parent: &XmlElementNode,
    options: &ListOptions,
    mut reader: impl FnMut(&XmlElementNode) -> Option<EntityRecord>,
) -> Collection {
    let Some(group) = parent.find_child(options.group_tag) else {
        return Collection::default();
    };

    let mut seen = BTreeSet::new();
    let mut records = Vec::new();
    for child in group.element_children() {
        if child.name != options.item_tag {
            continue;
        }
        let Some(record) = reader(child) else {
            continue;
        };
        if let Some(key) = options.unique_key {
            let Some(value) = record.value(key).map(ModValue::render) else {
                continue;
            };
            if !seen.insert(value) {
                continue;
            }
        }
        records.push(record);
    }

    if records.len() < options.min_items || records.len() > options.max_items {
        return Collection::default();
    }
    records.into_iter().collect()
}

/// Collects present states for a whole spec table from one node.
pub(crate) fn read_fields(
    node: &XmlElementNode,
    specs: &'static [FieldSpec],
) -> BTreeMap<String, FieldState> {
    let mut fields = BTreeMap::new();
    for spec in specs {
        let state = read_attr(node, spec);
        if state.is_present() {
            fields.insert(spec.name.to_string(), state);
        }
    }
    fields
}

pub(crate) fn non_empty_attr(node: &XmlElementNode, name: &str) -> Option<String> {
    let raw = node.attr(name)?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
