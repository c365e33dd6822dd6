use dmk_core::{EntityRecord, EnvironmentState, FieldState};
use dmk_parser::XmlElementNode;
use dmk_schema::{domain_fields, Domain};

use super::{
    entity_record, non_empty_attr, read_fields, read_record_list, read_tokens_element,
    read_value_element, ListOptions,
};

const SCALAR_SECTIONS: &[&str] = &[
    "ford_width",
    "ford_distance_factor",
    "sun_angle_factor",
    "resource_factor",
    "trees_everywhere",
];

const SEASONS: ListOptions = ListOptions {
    group_tag: "seasons",
    item_tag: "season",
    unique_key: Some("id"),
    min_items: 0,
    max_items: 4,
};

const DETAIL_OVERRIDES: ListOptions = ListOptions {
    group_tag: "detail_overrides",
    item_tag: "detail_override",
    unique_key: Some("id"),
    min_items: 0,
    max_items: 256,
};

const OBJECT_OVERRIDES: ListOptions = ListOptions {
    group_tag: "object_overrides",
    item_tag: "object_override",
    unique_key: Some("object_type"),
    min_items: 0,
    max_items: 256,
};

pub fn environment_from_tree(root: &XmlElementNode) -> EnvironmentState {
    let mut state = EnvironmentState::default();
    if root.name != "environment" {
        return state;
    }

    state.id = non_empty_attr(root, "id");

    for name in SCALAR_SECTIONS {
        let field = read_value_element(root, Domain::EnvironmentGeneral, name);
        if field != FieldState::Unset {
            state.general.insert((*name).to_string(), field);
        }
    }

    state.deposits = read_tokens_element(root, Domain::EnvironmentGeneral, "deposits");
    state.trees = read_tokens_element(root, Domain::EnvironmentGeneral, "trees");

    if let Some(terrain) = root.find_child("terrain") {
        state.terrain = read_fields(terrain, domain_fields(Domain::Terrain));
    }

    state.seasons = read_record_list(root, &SEASONS, season_record);
    state.detail_overrides = read_record_list(root, &DETAIL_OVERRIDES, detail_override_record);
    state.object_overrides = read_record_list(root, &OBJECT_OVERRIDES, object_override_record);

    state
}

fn season_record(node: &XmlElementNode) -> Option<EntityRecord> {
    entity_record(node, "season", domain_fields(Domain::Season), Some("id"))
}

fn detail_override_record(node: &XmlElementNode) -> Option<EntityRecord> {
    entity_record(
        node,
        "detail_override",
        domain_fields(Domain::DetailOverride),
        Some("id"),
    )
}

fn object_override_record(node: &XmlElementNode) -> Option<EntityRecord> {
    entity_record(
        node,
        "object_override",
        domain_fields(Domain::ObjectOverride),
        Some("object_type"),
    )
}

#[cfg(test)]
mod environment_forward_tests {
    use super::*;
    use dmk_core::{FieldState, ModValue};
    use dmk_parser::parse_mod_document;

    fn tree(source: &str) -> dmk_parser::XmlDocument {
        parse_mod_document(source).expect("test xml should parse")
    }

    #[test]
    fn scalar_sections_import_with_clamping() {
        let document = tree(
            r#"
<environment id="eurasia">
  <ford_width value="250"/>
  <sun_angle_factor value="1.25"/>
</environment>
"#,
        );
        let state = environment_from_tree(&document.root);
        assert_eq!(state.id.as_deref(), Some("eurasia"));
        assert_eq!(
            state.general.get("ford_width"),
            Some(&FieldState::present(ModValue::Number(100.0)))
        );
        assert_eq!(
            state.general.get("sun_angle_factor"),
            Some(&FieldState::present(ModValue::Number(1.25)))
        );
        assert!(state.general.get("resource_factor").is_none());
    }

    #[test]
    fn disabled_section_imports_as_explicitly_disabled() {
        let document = tree(r#"<environment><trees_everywhere enabled="false"/></environment>"#);
        let state = environment_from_tree(&document.root);
        assert_eq!(
            state.general.get("trees_everywhere"),
            Some(&FieldState::Disabled)
        );
    }

    #[test]
    fn deposits_import_as_tokens_with_catalog_filtering() {
        let document =
            tree(r#"<environment><deposits values="Flint Adamantium Tin"/></environment>"#);
        let state = environment_from_tree(&document.root);
        assert_eq!(
            state.deposits,
            FieldState::present(ModValue::Tokens(vec![
                "Flint".to_string(),
                "Tin".to_string()
            ]))
        );
    }

    #[test]
    fn terrain_ranges_reorder_on_import() {
        let document = tree(
            r#"<environment><terrain min_altitude="50" max_altitude="-5" density="0.4"/></environment>"#,
        );
        let state = environment_from_tree(&document.root);
        assert_eq!(
            state.terrain.get("altitude"),
            Some(&FieldState::present(ModValue::Range {
                min: -5.0,
                max: 50.0
            }))
        );
        assert_eq!(
            state.terrain.get("density"),
            Some(&FieldState::present(ModValue::Number(0.4)))
        );
    }

    #[test]
    fn seasons_deduplicate_by_id_first_wins() {
        let document = tree(
            r#"
<environment>
  <seasons>
    <season id="Spring" duration="0.3"/>
    <season id="Spring" duration="0.7"/>
    <season id="Winter" duration="0.2"/>
  </seasons>
</environment>
"#,
        );
        let state = environment_from_tree(&document.root);
        assert_eq!(state.seasons.len(), 2);
        let spring = state
            .seasons
            .records()
            .find(|record| record.value("id").and_then(ModValue::as_text) == Some("Spring"))
            .expect("spring season kept");
        assert_eq!(
            spring.value("duration").and_then(ModValue::as_number),
            Some(0.3)
        );
    }

    #[test]
    fn season_with_unknown_id_is_dropped_entirely() {
        let document = tree(
            r#"
<environment>
  <seasons>
    <season id="Monsoon" duration="0.5"/>
    <season id="Fall" duration="0.25"/>
  </seasons>
</environment>
"#,
        );
        let state = environment_from_tree(&document.root);
        assert_eq!(state.seasons.len(), 1);
    }

    #[test]
    fn season_count_stays_in_bounds_once_invalid_ids_drop() {
        let document = tree(
            r#"
<environment>
  <seasons>
    <season id="Spring"/>
    <season id="Summer"/>
    <season id="Fall"/>
    <season id="Winter"/>
    <season id="Sprinter"/>
  </seasons>
</environment>
"#,
        );
        let state = environment_from_tree(&document.root);
        // Five season elements, one invalid id: four remain, inside bounds.
        assert_eq!(state.seasons.len(), 4);
    }

    #[test]
    fn object_override_without_object_type_is_dropped() {
        let document = tree(
            r#"
<environment>
  <object_overrides>
    <object_override density="0.5"/>
    <object_override object_type="flint_deposit" density="0.5"/>
  </object_overrides>
</environment>
"#,
        );
        let state = environment_from_tree(&document.root);
        assert_eq!(state.object_overrides.len(), 1);
    }
}
