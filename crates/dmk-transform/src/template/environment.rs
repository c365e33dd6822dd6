use dmk_core::{EntityRecord, EnvironmentState, FieldState};
use dmk_schema::{domain_fields, Domain};

use super::{
    attr_text, container, get_field, leaf, push_attr, push_spec_attr, value_element,
    xml_escape,
};

const SCALAR_SECTIONS: &[&str] = &[
    "ford_width",
    "ford_distance_factor",
    "sun_angle_factor",
    "resource_factor",
    "trees_everywhere",
];

pub fn environment_template(state: &EnvironmentState, allow_render: bool) -> String {
    if !allow_render {
        return String::new();
    }

    let mut children = Vec::new();
    for name in SCALAR_SECTIONS {
        children.push(value_element(name, get_field(&state.general, name)));
    }
    children.push(tokens_element("deposits", &state.deposits));
    children.push(tokens_element("trees", &state.trees));

    let mut terrain_attrs = Vec::new();
    for spec in domain_fields(Domain::Terrain) {
        push_spec_attr(&mut terrain_attrs, spec, get_field(&state.terrain, spec.name));
    }
    children.push(leaf("terrain", terrain_attrs));

    let seasons = state
        .seasons
        .records()
        .map(|record| season_template(record, true))
        .collect::<Vec<_>>();
    children.push(container("seasons", Vec::new(), &seasons));

    let details = state
        .detail_overrides
        .records()
        .map(|record| detail_override_template(record, true))
        .collect::<Vec<_>>();
    children.push(container("detail_overrides", Vec::new(), &details));

    let objects = state
        .object_overrides
        .records()
        .map(|record| object_override_template(record, true))
        .collect::<Vec<_>>();
    children.push(container("object_overrides", Vec::new(), &objects));

    let mut attrs = Vec::new();
    push_attr(&mut attrs, "id", state.id.clone());
    container("environment", attrs, &children)
}

pub fn season_template(record: &EntityRecord, allow_render: bool) -> String {
    if !allow_render || record.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    for spec in domain_fields(Domain::Season) {
        push_spec_attr(&mut attrs, spec, record.field(spec.name));
    }
    leaf("season", attrs)
}

pub fn detail_override_template(record: &EntityRecord, allow_render: bool) -> String {
    if !allow_render || record.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    for spec in domain_fields(Domain::DetailOverride) {
        push_spec_attr(&mut attrs, spec, record.field(spec.name));
    }
    leaf("detail_override", attrs)
}

pub fn object_override_template(record: &EntityRecord, allow_render: bool) -> String {
    if !allow_render || record.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    for spec in domain_fields(Domain::ObjectOverride) {
        push_spec_attr(&mut attrs, spec, record.field(spec.name));
    }
    leaf("object_override", attrs)
}

fn tokens_element(name: &str, state: &FieldState) -> String {
    match attr_text(state) {
        Some(values) => format!("<{} values=\"{}\"/>", name, xml_escape(&values)),
        None => String::new(),
    }
}
