use dmk_core::{
    ActionNode, ConditionNode, EntityRecord, EventRecord, GoalRecord, MilestoneRecord,
    ScenarioState,
};
use dmk_schema::{domain_fields, ActionType, ConditionType, Domain};

use super::{
    container, get_field, leaf, push_attr, push_spec_attr, value_element, xml_escape,
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

/// Serializes the whole scenario document. The `allow_render` flag is the
/// single authoritative switch deciding whether this section appears in
/// output at all.
pub fn scenario_template(state: &ScenarioState, allow_render: bool) -> String {
    if !allow_render {
        return String::new();
    }

    let mut children = Vec::new();
    for name in SCALAR_SECTIONS {
        children.push(value_element(name, get_field(&state.general, name)));
    }

    let mut starting_attrs = Vec::new();
    for spec in domain_fields(Domain::StartingConditions) {
        push_spec_attr(
            &mut starting_attrs,
            spec,
            get_field(&state.starting_conditions, spec.name),
        );
    }
    children.push(leaf("starting_conditions", starting_attrs));

    let disasters = state
        .disasters
        .records()
        .map(|record| disaster_template(record, true))
        .collect::<Vec<_>>();
    children.push(container("disasters", Vec::new(), &disasters));

    let locations = state
        .locations
        .records()
        .map(|record| location_template(record, true))
        .collect::<Vec<_>>();
    children.push(container("locations", Vec::new(), &locations));

    let goals = state
        .goals
        .iter()
        .map(|goal| goal_template(goal, true))
        .collect::<Vec<_>>();
    children.push(container("goals", Vec::new(), &goals));

    let milestones = state
        .milestones
        .iter()
        .map(|milestone| milestone_template(milestone, true))
        .collect::<Vec<_>>();
    children.push(container("milestones", Vec::new(), &milestones));

    let events = state
        .events
        .iter()
        .map(|event| event_template(event, true))
        .collect::<Vec<_>>();
    children.push(container("events", Vec::new(), &events));

    let mut attrs = Vec::new();
    push_attr(&mut attrs, "id", state.id.clone());
    container("scenario", attrs, &children)
}

pub fn disaster_template(record: &EntityRecord, allow_render: bool) -> String {
    if !allow_render || record.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    for spec in domain_fields(Domain::Disaster) {
        push_spec_attr(&mut attrs, spec, record.field(spec.name));
    }
    leaf("disaster", attrs)
}

pub fn location_template(record: &EntityRecord, allow_render: bool) -> String {
    if !allow_render || record.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    for spec in domain_fields(Domain::Location) {
        push_spec_attr(&mut attrs, spec, record.field(spec.name));
    }
    leaf("location", attrs)
}

pub fn condition_template(condition: &ConditionNode, allow_render: bool) -> String {
    if !allow_render {
        return String::new();
    }
    // A kind outside the registry is schema drift; render nothing rather
    // than emit XML the game cannot read.
    let Ok(condition_type) = ConditionType::from_name(&condition.kind) else {
        return String::new();
    };

    let mut attrs = vec![format!("type=\"{}\"", xml_escape(&condition.kind))];
    for spec in condition_type.field_specs() {
        push_spec_attr(&mut attrs, spec, condition.field(spec.name));
    }

    if condition_type.has_sub_conditions() {
        let subs = condition
            .sub_conditions
            .iter()
            .map(|sub| condition_template(sub, true))
            .collect::<Vec<_>>();
        let group = container("sub_conditions", Vec::new(), &subs);
        container("condition", attrs, &[group])
    } else {
        leaf("condition", attrs)
    }
}

pub fn action_template(action: &ActionNode, allow_render: bool) -> String {
    if !allow_render {
        return String::new();
    }
    let Ok(action_type) = ActionType::from_name(&action.kind) else {
        return String::new();
    };

    let mut attrs = vec![format!("type=\"{}\"", xml_escape(&action.kind))];
    for spec in action_type.field_specs() {
        push_spec_attr(&mut attrs, spec, action.field(spec.name));
    }
    leaf("action", attrs)
}

pub fn event_template(event: &EventRecord, allow_render: bool) -> String {
    if !allow_render || event.disabled {
        return String::new();
    }

    let mut attrs = Vec::new();
    if !event.flags.is_empty() {
        push_attr(&mut attrs, "flags", Some(event.flags.join(" ")));
    }

    let condition = event
        .condition
        .as_ref()
        .map(|condition| condition_template(condition, true))
        .unwrap_or_default();
    let actions = event
        .actions
        .iter()
        .map(|action| action_template(action, true))
        .collect::<Vec<_>>();
    let actions_group = container("actions", Vec::new(), &actions);

    container("event", attrs, &[condition, actions_group])
}

/// Goal descriptions live in the companion strings file keyed by goal id,
/// so the element itself carries only the id and the condition.
pub fn goal_template(goal: &GoalRecord, allow_render: bool) -> String {
    if !allow_render || goal.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    push_attr(&mut attrs, "id", Some(goal.id.clone()));
    let condition = goal
        .condition
        .as_ref()
        .map(|condition| condition_template(condition, true))
        .unwrap_or_default();
    container("goal", attrs, &[condition])
}

pub fn milestone_template(milestone: &MilestoneRecord, allow_render: bool) -> String {
    if !allow_render || milestone.disabled {
        return String::new();
    }
    let mut attrs = Vec::new();
    push_attr(&mut attrs, "id", Some(milestone.id.clone()));
    let conditions = milestone
        .conditions
        .iter()
        .map(|condition| condition_template(condition, true))
        .collect::<Vec<_>>();
    container("milestone", attrs, &conditions)
}
