use dmk_core::{
    ActionNode, ConditionNode, EntityRecord, EventRecord, FieldState, GoalRecord,
    MilestoneRecord, ModValue, ScenarioState,
};
use dmk_parser::XmlElementNode;
use dmk_schema::{domain_fields, ActionType, ConditionType, Domain};

use super::{
    entity_record, non_empty_attr, read_attr, read_fields, read_record_list,
    read_value_element, ListOptions,
};

const SCALAR_SECTIONS: &[&str] = &[
    "group_id",
    "size",
    "hardcore_mode_allowed",
    "nomad_mode_allowed",
    "show_completion_icon",
    "required_scenario",
    "starting_era",
];

const DISASTERS: ListOptions = ListOptions {
    group_tag: "disasters",
    item_tag: "disaster",
    unique_key: None,
    min_items: 0,
    max_items: 24,
};

const LOCATIONS: ListOptions = ListOptions {
    group_tag: "locations",
    item_tag: "location",
    unique_key: Some("id"),
    min_items: 0,
    max_items: 100,
};

pub fn scenario_from_tree(root: &XmlElementNode) -> ScenarioState {
    let mut state = ScenarioState::default();
    if root.name != "scenario" {
        return state;
    }

    state.id = non_empty_attr(root, "id");

    for name in SCALAR_SECTIONS {
        let field = read_value_element(root, Domain::ScenarioGeneral, name);
        if field != FieldState::Unset {
            state.general.insert((*name).to_string(), field);
        }
    }

    if let Some(node) = root.find_child("starting_conditions") {
        state.starting_conditions =
            read_fields(node, domain_fields(Domain::StartingConditions));
    }

    state.disasters = read_record_list(root, &DISASTERS, disaster_record);
    state.locations = read_record_list(root, &LOCATIONS, location_record);

    if let Some(goals) = root.find_child("goals") {
        state.goals = goals
            .element_children()
            .filter(|child| child.name == "goal")
            .filter_map(goal_record)
            .collect();
    }

    if let Some(milestones) = root.find_child("milestones") {
        state.milestones = milestones
            .element_children()
            .filter(|child| child.name == "milestone")
            .filter_map(milestone_record)
            .collect();
    }

    if let Some(events) = root.find_child("events") {
        state.events = events
            .element_children()
            .filter(|child| child.name == "event")
            .map(event_record)
            .collect();
    }

    state
}

fn disaster_record(node: &XmlElementNode) -> Option<EntityRecord> {
    entity_record(
        node,
        "disaster",
        domain_fields(Domain::Disaster),
        Some("disaster_type"),
    )
}

fn location_record(node: &XmlElementNode) -> Option<EntityRecord> {
    entity_record(node, "location", domain_fields(Domain::Location), Some("id"))
}

fn goal_record(node: &XmlElementNode) -> Option<GoalRecord> {
    let id = non_empty_attr(node, "id")?;
    let description = match non_empty_attr(node, "description") {
        Some(text) => FieldState::present(ModValue::Text(text)),
        None => FieldState::Unset,
    };
    Some(GoalRecord {
        id,
        description,
        condition: node.find_child("condition").and_then(condition_record),
        disabled: false,
    })
}

fn milestone_record(node: &XmlElementNode) -> Option<MilestoneRecord> {
    let id = non_empty_attr(node, "id")?;
    let description = match non_empty_attr(node, "description") {
        Some(text) => FieldState::present(ModValue::Text(text)),
        None => FieldState::Unset,
    };
    Some(MilestoneRecord {
        id,
        description,
        conditions: node
            .element_children()
            .filter(|child| child.name == "condition")
            .filter_map(condition_record)
            .collect(),
        disabled: false,
    })
}

fn event_record(node: &XmlElementNode) -> EventRecord {
    let flags = node
        .attr("flags")
        .map(|raw| raw.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    let actions = node
        .find_child("actions")
        .map(|group| {
            group
                .element_children()
                .filter(|child| child.name == "action")
                .filter_map(action_record)
                .collect()
        })
        .unwrap_or_default();
    EventRecord {
        flags,
        condition: node.find_child("condition").and_then(condition_record),
        actions,
        disabled: false,
    }
}

/// A condition with an unknown or missing `type` resolves to nothing —
/// hand-edited XML must not half-import logic trees.
pub(crate) fn condition_record(node: &XmlElementNode) -> Option<ConditionNode> {
    let type_name = node.attr("type")?;
    let condition_type = ConditionType::from_name(type_name).ok()?;

    let mut condition = ConditionNode::new(condition_type.name());
    for spec in condition_type.field_specs() {
        let state = read_attr(node, spec);
        if state.is_present() {
            condition.fields.insert(spec.name.to_string(), state);
        }
    }

    if condition_type.has_sub_conditions() {
        if let Some(group) = node.find_child("sub_conditions") {
            condition.sub_conditions = group
                .element_children()
                .filter(|child| child.name == "condition")
                .filter_map(condition_record)
                .collect();
        }
    }

    Some(condition)
}

pub(crate) fn action_record(node: &XmlElementNode) -> Option<ActionNode> {
    let type_name = node.attr("type")?;
    let action_type = ActionType::from_name(type_name).ok()?;

    let mut action = ActionNode::new(action_type.name());
    for spec in action_type.field_specs() {
        let state = read_attr(node, spec);
        if state.is_present() {
            action.fields.insert(spec.name.to_string(), state);
        }
    }
    Some(action)
}

#[cfg(test)]
mod scenario_forward_tests {
    use super::*;
    use dmk_parser::parse_mod_document;

    fn scenario(source: &str) -> ScenarioState {
        let document = parse_mod_document(source).expect("test xml should parse");
        scenario_from_tree(&document.root)
    }

    #[test]
    fn general_sections_import_with_normalization() {
        let state = scenario(
            r#"
<scenario id="first_settlers">
  <size value="9"/>
  <hardcore_mode_allowed value="true"/>
  <starting_era value="Paleolithic"/>
</scenario>
"#,
        );
        assert_eq!(state.id.as_deref(), Some("first_settlers"));
        assert_eq!(
            state.general.get("size"),
            Some(&FieldState::present(ModValue::Number(4.0)))
        );
        assert_eq!(
            state.general.get("hardcore_mode_allowed"),
            Some(&FieldState::present(ModValue::Bool(true)))
        );
        assert_eq!(
            state.general.get("starting_era"),
            Some(&FieldState::present(ModValue::Text("Paleolithic".to_string())))
        );
    }

    #[test]
    fn location_missing_required_id_is_dropped_without_partial_import() {
        let state = scenario(
            r#"
<scenario>
  <locations>
    <location seed="42" river="true"/>
    <location id="north_camp" seed="7"/>
  </locations>
</scenario>
"#,
        );
        assert_eq!(state.locations.len(), 1);
        let kept = state.locations.records().next().expect("one location");
        assert_eq!(kept.value("id").and_then(ModValue::as_text), Some("north_camp"));
    }

    #[test]
    fn locations_preserve_document_order() {
        let state = scenario(
            r#"
<scenario>
  <locations>
    <location id="b"/>
    <location id="a"/>
    <location id="c"/>
  </locations>
</scenario>
"#,
        );
        let ids = state
            .locations
            .records()
            .filter_map(|record| record.value("id").and_then(ModValue::as_text))
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn disaster_period_strips_year_suffix_on_import() {
        let state = scenario(
            r#"
<scenario>
  <disasters>
    <disaster disaster_type="Storm" period="1.5y" variance="0.3"/>
  </disasters>
</scenario>
"#,
        );
        let disaster = state.disasters.records().next().expect("one disaster");
        assert_eq!(
            disaster.value("period").and_then(ModValue::as_number),
            Some(1.5)
        );
        assert_eq!(
            disaster.value("variance").and_then(ModValue::as_number),
            Some(0.3)
        );
    }

    #[test]
    fn nested_logical_conditions_import_recursively() {
        let state = scenario(
            r#"
<scenario>
  <events>
    <event flags="RequiresPrevious">
      <condition type="And">
        <sub_conditions>
          <condition type="TimeElapsed" timer="RealTime" value="10"/>
          <condition type="EraUnlocked" era="Mesolithic"/>
        </sub_conditions>
      </condition>
      <actions>
        <action type="SetWeather" value="Rainy"/>
      </actions>
    </event>
  </events>
</scenario>
"#,
        );
        let event = state.events.first().expect("one event");
        assert_eq!(event.flags, vec!["RequiresPrevious"]);
        let condition = event.condition.as_ref().expect("condition imported");
        assert_eq!(condition.kind, "And");
        assert_eq!(condition.sub_conditions.len(), 2);
        assert_eq!(condition.sub_conditions[0].kind, "TimeElapsed");
        assert_eq!(event.actions.len(), 1);
        assert_eq!(event.actions[0].kind, "SetWeather");
    }

    #[test]
    fn unknown_condition_type_drops_the_condition_not_the_event() {
        let state = scenario(
            r#"
<scenario>
  <events>
    <event>
      <condition type="MoonPhase" value="full"/>
      <actions><action type="HideUi"/></actions>
    </event>
  </events>
</scenario>
"#,
        );
        let event = state.events.first().expect("one event");
        assert!(event.condition.is_none());
        assert_eq!(event.actions.len(), 1);
    }

    #[test]
    fn goal_imports_id_description_and_condition() {
        let state = scenario(
            r#"
<scenario>
  <goals>
    <goal id="hunt_mammoth" description="Hunt a mammoth">
      <condition type="EntityCountReached" counter="All" entity_type="mammoth" value="1"/>
    </goal>
    <goal description="missing id"/>
  </goals>
</scenario>
"#,
        );
        assert_eq!(state.goals.len(), 1);
        let goal = &state.goals[0];
        assert_eq!(goal.id, "hunt_mammoth");
        assert!(goal.condition.is_some());
    }

    #[test]
    fn milestone_collects_all_direct_conditions() {
        let state = scenario(
            r#"
<scenario>
  <milestones>
    <milestone id="era_2">
      <condition type="EraUnlocked" era="Mesolithic"/>
      <condition type="TimeElapsed" timer="GameTime" value="5"/>
    </milestone>
  </milestones>
</scenario>
"#,
        );
        assert_eq!(state.milestones.len(), 1);
        assert_eq!(state.milestones[0].conditions.len(), 2);
    }
}
