use dmk_core::ModKitError;

use crate::spec::FieldSpec;

pub const ERAS: &[&str] = &[
    "Paleolithic",
    "Mesolithic",
    "Neolithic",
    "CopperAge",
    "BronzeAge",
    "IronAge",
];

pub const SEASON_IDS: &[&str] = &["Spring", "Summer", "Fall", "Winter"];

pub const DISASTER_TYPES: &[&str] = &["Storm", "Blizzard"];

pub const COMPARISONS: &[&str] = &[
    "Less",
    "LessOrEquals",
    "Equals",
    "GreaterOrEquals",
    "Greater",
    "NotEquals",
];

pub const TIMER_TYPES: &[&str] = &["RealTime", "GameTime", "EraRealTime", "EraGameTime"];

pub const WEATHER_TYPES: &[&str] = &["Sunny", "Cloudy", "Rainy", "Snowy", "Stormy"];

pub const COUNTER_TYPES: &[&str] = &[
    "All",
    "PlayerEntities",
    "DomesticAnimals",
    "WildAnimals",
    "Raiders",
    "Structures",
];

pub const ENTITY_TYPES: &[&str] = &[
    "primitive_human",
    "wolf",
    "dog",
    "cave_bear",
    "cave_lion",
    "cave_hyena",
    "deer",
    "reindeer",
    "ibex",
    "wild_boar",
    "wild_horse",
    "bison",
    "aurochs",
    "megaloceros",
    "woolly_rhino",
    "mammoth",
    "sheep",
    "goat",
    "pig",
    "cattle",
    "horse",
];

pub const RESOURCE_TYPES: &[&str] = &[
    "Flint",
    "Sticks",
    "Stones",
    "BoneRemains",
    "Copper",
    "Tin",
];

pub const TREE_TYPES: &[&str] = &[
    "Oak",
    "Birch",
    "Fir",
    "Pine",
    "Spruce",
    "Rye",
    "Einkorn",
    "Emmer",
    "Flax",
    "BitterVetch",
    "Chickpeas",
    "Lentils",
    "Peas",
    "Blackberry",
    "Blueberry",
    "Raspberry",
    "Strawberry",
];

pub const TECH_TYPES: &[&str] = &[
    "spear_1",
    "spear_2",
    "bow_1",
    "sling_1",
    "domestication_1",
    "pottery_1",
    "metallurgy_1",
    "agriculture_1",
];

/// Scenario logic condition discriminators, mirroring the game's
/// `<condition type="..."/>` syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    And,
    Or,
    Not,
    AnyTasksActive,
    AnyWorkAreasActive,
    EntityCountComparison,
    EntityCountReached,
    EntityNearMarker,
    EraUnlocked,
    InitTimeExpired,
    IsAlive,
    NewGame,
    ScenarioCompleted,
    TechUnlocked,
    TimeElapsed,
    ValueEquals,
    ValueReached,
}

impl ConditionType {
    /// Unknown discriminators are a registry/schema drift bug, not a
    /// user-data problem, so the lookup fails loudly.
    pub fn from_name(name: &str) -> Result<Self, ModKitError> {
        let parsed = match name {
            "And" => Self::And,
            "Or" => Self::Or,
            "Not" => Self::Not,
            "AnyTasksActive" => Self::AnyTasksActive,
            "AnyWorkAreasActive" => Self::AnyWorkAreasActive,
            "EntityCountComparison" => Self::EntityCountComparison,
            "EntityCountReached" => Self::EntityCountReached,
            "EntityNearMarker" => Self::EntityNearMarker,
            "EraUnlocked" => Self::EraUnlocked,
            "InitTimeExpired" => Self::InitTimeExpired,
            "IsAlive" => Self::IsAlive,
            "NewGame" => Self::NewGame,
            "ScenarioCompleted" => Self::ScenarioCompleted,
            "TechUnlocked" => Self::TechUnlocked,
            "TimeElapsed" => Self::TimeElapsed,
            "ValueEquals" => Self::ValueEquals,
            "ValueReached" => Self::ValueReached,
            other => {
                return Err(ModKitError::new(
                    "UNKNOWN_CONDITION_TYPE",
                    format!("Unknown condition type \"{}\".", other),
                ))
            }
        };
        Ok(parsed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::AnyTasksActive => "AnyTasksActive",
            Self::AnyWorkAreasActive => "AnyWorkAreasActive",
            Self::EntityCountComparison => "EntityCountComparison",
            Self::EntityCountReached => "EntityCountReached",
            Self::EntityNearMarker => "EntityNearMarker",
            Self::EraUnlocked => "EraUnlocked",
            Self::InitTimeExpired => "InitTimeExpired",
            Self::IsAlive => "IsAlive",
            Self::NewGame => "NewGame",
            Self::ScenarioCompleted => "ScenarioCompleted",
            Self::TechUnlocked => "TechUnlocked",
            Self::TimeElapsed => "TimeElapsed",
            Self::ValueEquals => "ValueEquals",
            Self::ValueReached => "ValueReached",
        }
    }

    pub fn has_sub_conditions(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    pub fn field_specs(self) -> &'static [FieldSpec] {
        match self {
            Self::And | Self::Or | Self::Not | Self::NewGame => &[],
            Self::AnyTasksActive => ANY_TASKS_ACTIVE_FIELDS,
            Self::AnyWorkAreasActive => ANY_WORK_AREAS_ACTIVE_FIELDS,
            Self::EntityCountComparison => ENTITY_COUNT_COMPARISON_FIELDS,
            Self::EntityCountReached => ENTITY_COUNT_REACHED_FIELDS,
            Self::EntityNearMarker => ENTITY_NEAR_MARKER_FIELDS,
            Self::EraUnlocked => ERA_UNLOCKED_FIELDS,
            Self::InitTimeExpired | Self::TimeElapsed => TIME_ELAPSED_FIELDS,
            Self::IsAlive => IS_ALIVE_FIELDS,
            Self::ScenarioCompleted => SCENARIO_COMPLETED_FIELDS,
            Self::TechUnlocked => TECH_UNLOCKED_FIELDS,
            Self::ValueEquals | Self::ValueReached => VALUE_FIELDS,
        }
    }
}

const ANY_TASKS_ACTIVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("task_type"),
    FieldSpec::int("min_instances", 0.0, 100.0, 1.0),
];

const ANY_WORK_AREAS_ACTIVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("work_area_id"),
    FieldSpec::int("min_instances", 0.0, 100.0, 1.0),
];

const ENTITY_COUNT_COMPARISON_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("counter", COUNTER_TYPES),
    FieldSpec::enumeration("entity_type", ENTITY_TYPES),
    FieldSpec::int("value", 0.0, 10000.0, 0.0),
    FieldSpec::enumeration("comparison", COMPARISONS),
];

const ENTITY_COUNT_REACHED_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("counter", COUNTER_TYPES),
    FieldSpec::enumeration("entity_type", ENTITY_TYPES),
    FieldSpec::int("value", 0.0, 10000.0, 0.0),
];

const ENTITY_NEAR_MARKER_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("entity_type", ENTITY_TYPES),
    FieldSpec::float("distance", 0.0, 1000.0, 10.0),
];

const ERA_UNLOCKED_FIELDS: &[FieldSpec] = &[FieldSpec::enumeration("era", ERAS)];

const TIME_ELAPSED_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("timer", TIMER_TYPES),
    FieldSpec::int("value", 0.0, 10000.0, 0.0),
];

const IS_ALIVE_FIELDS: &[FieldSpec] = &[FieldSpec::text("name")];

const SCENARIO_COMPLETED_FIELDS: &[FieldSpec] = &[FieldSpec::text("id")];

const TECH_UNLOCKED_FIELDS: &[FieldSpec] = &[FieldSpec::enumeration("tech", TECH_TYPES)];

const VALUE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("id"),
    FieldSpec::int("value", 0.0, 10000.0, 0.0),
];

/// Scenario event action discriminators (`<action type="..."/>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    ClearGoals,
    ClearLocationMarkers,
    ClearUiMarkers,
    FocusCamera,
    HideUi,
    QuitGame,
    SetAnimalPopulation,
    SetBirthParameters,
    SetDiseaseParameters,
    SetFeatureEnabled,
    SetGoal,
    SetGoalsHint,
    SetLocationMarker,
    SetMigrationParameters,
    SetRaiderParameters,
    SetTimeOfYear,
    SetTimeScale,
    SetTraderPeriod,
    SetUiLocked,
    SetUiMarker,
    SetWeather,
    ShowMessage,
    Spawn,
    TriggerRaiderAttack,
    Unlock,
}

impl ActionType {
    pub fn from_name(name: &str) -> Result<Self, ModKitError> {
        let parsed = match name {
            "ClearGoals" => Self::ClearGoals,
            "ClearLocationMarkers" => Self::ClearLocationMarkers,
            "ClearUiMarkers" => Self::ClearUiMarkers,
            "FocusCamera" => Self::FocusCamera,
            "HideUi" => Self::HideUi,
            "QuitGame" => Self::QuitGame,
            "SetAnimalPopulation" => Self::SetAnimalPopulation,
            "SetBirthParameters" => Self::SetBirthParameters,
            "SetDiseaseParameters" => Self::SetDiseaseParameters,
            "SetFeatureEnabled" => Self::SetFeatureEnabled,
            "SetGoal" => Self::SetGoal,
            "SetGoalsHint" => Self::SetGoalsHint,
            "SetLocationMarker" => Self::SetLocationMarker,
            "SetMigrationParameters" => Self::SetMigrationParameters,
            "SetRaiderParameters" => Self::SetRaiderParameters,
            "SetTimeOfYear" => Self::SetTimeOfYear,
            "SetTimeScale" => Self::SetTimeScale,
            "SetTraderPeriod" => Self::SetTraderPeriod,
            "SetUiLocked" => Self::SetUiLocked,
            "SetUiMarker" => Self::SetUiMarker,
            "SetWeather" => Self::SetWeather,
            "ShowMessage" => Self::ShowMessage,
            "Spawn" => Self::Spawn,
            "TriggerRaiderAttack" => Self::TriggerRaiderAttack,
            "Unlock" => Self::Unlock,
            other => {
                return Err(ModKitError::new(
                    "UNKNOWN_ACTION_TYPE",
                    format!("Unknown action type \"{}\".", other),
                ))
            }
        };
        Ok(parsed)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ClearGoals => "ClearGoals",
            Self::ClearLocationMarkers => "ClearLocationMarkers",
            Self::ClearUiMarkers => "ClearUiMarkers",
            Self::FocusCamera => "FocusCamera",
            Self::HideUi => "HideUi",
            Self::QuitGame => "QuitGame",
            Self::SetAnimalPopulation => "SetAnimalPopulation",
            Self::SetBirthParameters => "SetBirthParameters",
            Self::SetDiseaseParameters => "SetDiseaseParameters",
            Self::SetFeatureEnabled => "SetFeatureEnabled",
            Self::SetGoal => "SetGoal",
            Self::SetGoalsHint => "SetGoalsHint",
            Self::SetLocationMarker => "SetLocationMarker",
            Self::SetMigrationParameters => "SetMigrationParameters",
            Self::SetRaiderParameters => "SetRaiderParameters",
            Self::SetTimeOfYear => "SetTimeOfYear",
            Self::SetTimeScale => "SetTimeScale",
            Self::SetTraderPeriod => "SetTraderPeriod",
            Self::SetUiLocked => "SetUiLocked",
            Self::SetUiMarker => "SetUiMarker",
            Self::SetWeather => "SetWeather",
            Self::ShowMessage => "ShowMessage",
            Self::Spawn => "Spawn",
            Self::TriggerRaiderAttack => "TriggerRaiderAttack",
            Self::Unlock => "Unlock",
        }
    }

    pub fn field_specs(self) -> &'static [FieldSpec] {
        match self {
            Self::ClearGoals
            | Self::ClearLocationMarkers
            | Self::ClearUiMarkers
            | Self::HideUi
            | Self::QuitGame
            | Self::TriggerRaiderAttack => &[],
            Self::FocusCamera => FOCUS_CAMERA_FIELDS,
            Self::SetAnimalPopulation => SET_ANIMAL_POPULATION_FIELDS,
            Self::SetBirthParameters => SET_BIRTH_PARAMETERS_FIELDS,
            Self::SetDiseaseParameters => SET_DISEASE_PARAMETERS_FIELDS,
            Self::SetFeatureEnabled => SET_FEATURE_ENABLED_FIELDS,
            Self::SetGoal | Self::SetGoalsHint => SET_GOAL_FIELDS,
            Self::SetLocationMarker => SET_LOCATION_MARKER_FIELDS,
            Self::SetMigrationParameters => SET_MIGRATION_PARAMETERS_FIELDS,
            Self::SetRaiderParameters => SET_RAIDER_PARAMETERS_FIELDS,
            Self::SetTimeOfYear => SET_TIME_OF_YEAR_FIELDS,
            Self::SetTimeScale => SET_TIME_SCALE_FIELDS,
            Self::SetTraderPeriod => SET_TRADER_PERIOD_FIELDS,
            Self::SetUiLocked => SET_UI_LOCKED_FIELDS,
            Self::SetUiMarker => SET_UI_MARKER_FIELDS,
            Self::SetWeather => SET_WEATHER_FIELDS,
            Self::ShowMessage => SHOW_MESSAGE_FIELDS,
            Self::Spawn => SPAWN_FIELDS,
            Self::Unlock => UNLOCK_FIELDS,
        }
    }
}

const FOCUS_CAMERA_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("location"),
    FieldSpec::float("distance", 0.0, 1000.0, 50.0),
];

const SET_ANIMAL_POPULATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("animal_type", ENTITY_TYPES),
    FieldSpec::int("min", 0.0, 1000.0, 0.0),
    FieldSpec::int("max", 0.0, 1000.0, 0.0),
    FieldSpec::vector("era_factors", 6, 0.0, 10.0),
];

const SET_BIRTH_PARAMETERS_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("decrease_start_population", 0.0, 1000.0, 0.0),
    FieldSpec::float("decrease_halfing_population", 0.0, 1000.0, 0.0),
];

const SET_DISEASE_PARAMETERS_FIELDS: &[FieldSpec] = &[
    FieldSpec::period("period", 0.0, 100.0, 1.5),
    FieldSpec::period("variance", 0.0, 100.0, 0.5),
    FieldSpec::float("individual_disease_chance", 0.0, 1.0, 0.5),
];

const SET_FEATURE_ENABLED_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("feature"),
    FieldSpec::boolean("value"),
];

const SET_GOAL_FIELDS: &[FieldSpec] = &[FieldSpec::text("id")];

const SET_LOCATION_MARKER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("marker_type"),
    FieldSpec::text("entity_type"),
    FieldSpec::vector("position", 2, 0.0, 2048.0),
    FieldSpec::float("scale", 0.0, 10.0, 1.0),
];

const SET_MIGRATION_PARAMETERS_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("min", 0.0, 100.0, 0.0),
    FieldSpec::int("max", 0.0, 100.0, 0.0),
    FieldSpec::period("period", 0.0, 100.0, 1.0),
    FieldSpec::float("decrease_start_population", 0.0, 1000.0, 0.0),
    FieldSpec::float("decrease_halfing_population", 0.0, 1000.0, 0.0),
];

const SET_RAIDER_PARAMETERS_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("era", ERAS),
    FieldSpec::tokens("entity_types", Some(ENTITY_TYPES)),
    FieldSpec::int("min", 0.0, 100.0, 0.0),
    FieldSpec::int("max", 0.0, 100.0, 0.0),
    FieldSpec::period("period", 0.0, 100.0, 1.0),
    FieldSpec::period("variance", 0.0, 100.0, 0.5),
    FieldSpec::period("grace_period", 0.0, 100.0, 1.0),
];

const SET_TIME_OF_YEAR_FIELDS: &[FieldSpec] = &[FieldSpec::float("value", 0.0, 1.0, 0.0)];

const SET_TIME_SCALE_FIELDS: &[FieldSpec] = &[FieldSpec::int("index", 0.0, 10.0, 1.0)];

const SET_TRADER_PERIOD_FIELDS: &[FieldSpec] = &[FieldSpec::period("value", 0.0, 100.0, 1.0)];

const SET_UI_LOCKED_FIELDS: &[FieldSpec] = &[FieldSpec::text("lock_flags")];

const SET_UI_MARKER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("marker_type"),
    FieldSpec::text("entity_type"),
    FieldSpec::text("context_action"),
    FieldSpec::text("worker_type"),
];

const SET_WEATHER_FIELDS: &[FieldSpec] = &[FieldSpec::enumeration("value", WEATHER_TYPES)];

const SHOW_MESSAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("title"),
    FieldSpec::text("text"),
];

const SPAWN_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("entity_type", ENTITY_TYPES),
    FieldSpec::int("amount", 0.0, 1000.0, 1.0),
    FieldSpec::float("angle", -360.0, 360.0, 0.0),
    FieldSpec::float("radius", 0.0, 1000.0, 1.0),
    FieldSpec::vector("position", 2, 0.0, 2048.0),
    FieldSpec::int("years_old", 0.0, 100.0, 0.0),
    FieldSpec::float("gender_ratio", 0.0, 1.0, 0.5),
];

const UNLOCK_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("tech_era", ERAS),
    FieldSpec::enumeration("tech_type", TECH_TYPES),
];

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn condition_type_round_trips_through_name() {
        for name in ["And", "TimeElapsed", "EntityCountComparison", "EraUnlocked"] {
            let parsed = ConditionType::from_name(name).expect("known condition type");
            assert_eq!(parsed.name(), name);
        }
    }

    #[test]
    fn unknown_condition_type_is_a_fatal_lookup() {
        let error =
            ConditionType::from_name("TimeWarped").expect_err("unknown type should fail");
        assert_eq!(error.code, "UNKNOWN_CONDITION_TYPE");
    }

    #[test]
    fn unknown_action_type_is_a_fatal_lookup() {
        let error = ActionType::from_name("ShowToast").expect_err("unknown type should fail");
        assert_eq!(error.code, "UNKNOWN_ACTION_TYPE");
    }

    #[test]
    fn only_logical_conditions_carry_sub_conditions() {
        assert!(ConditionType::And.has_sub_conditions());
        assert!(ConditionType::Or.has_sub_conditions());
        assert!(ConditionType::Not.has_sub_conditions());
        assert!(!ConditionType::TimeElapsed.has_sub_conditions());
    }

    #[test]
    fn action_field_specs_cover_every_discriminator() {
        let actions = [
            ActionType::ClearGoals,
            ActionType::SetRaiderParameters,
            ActionType::ShowMessage,
            ActionType::Spawn,
            ActionType::Unlock,
        ];
        for action in actions {
            // Empty spec lists are valid (flag-like actions); the lookup
            // itself must never panic.
            let _ = action.field_specs();
        }
    }
}
