use crate::catalog::{
    DISASTER_TYPES, ENTITY_TYPES, ERAS, RESOURCE_TYPES, SEASON_IDS, TREE_TYPES,
};

/// Semantic kind of one schema field. The kind drives which normalizer
/// applies and which separator/unit the serializer uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Enum { allowed: &'static [&'static str] },
    Text,
    Tokens { catalog: Option<&'static [&'static str]> },
    Vector { arity: usize },
    Range,
    /// Time value stored as a bare number, serialized with a trailing `y`.
    Period,
}

/// One schema entry: type, range and default for a single configurable
/// attribute. `min`/`max`/`default` apply to numeric kinds (per element
/// for `Vector` and `Range`); the invariant `min <= default <= max` holds
/// for every registered numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub precision: u32,
}

impl FieldSpec {
    pub const fn int(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Int,
            min,
            max,
            default,
            precision: 0,
        }
    }

    pub const fn float(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Float,
            min,
            max,
            default,
            precision: 2,
        }
    }

    pub const fn period(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Period,
            min,
            max,
            default,
            precision: 2,
        }
    }

    pub const fn range(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Range,
            min,
            max,
            default: min,
            precision: 2,
        }
    }

    pub const fn enumeration(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::Enum { allowed },
            min: 0.0,
            max: 0.0,
            default: 0.0,
            precision: 0,
        }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Bool,
            min: 0.0,
            max: 0.0,
            default: 0.0,
            precision: 0,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            min: 0.0,
            max: 0.0,
            default: 0.0,
            precision: 0,
        }
    }

    pub const fn tokens(
        name: &'static str,
        catalog: Option<&'static [&'static str]>,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Tokens { catalog },
            min: 0.0,
            max: 0.0,
            default: 0.0,
            precision: 0,
        }
    }

    pub const fn vector(name: &'static str, arity: usize, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Vector { arity },
            min,
            max,
            default: min,
            precision: 3,
        }
    }
}

/// FieldSpec namespaces, one per form panel / schema section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    EnvironmentGeneral,
    Terrain,
    Season,
    DetailOverride,
    ObjectOverride,
    ScenarioGeneral,
    StartingConditions,
    Disaster,
    Location,
    Goal,
    Milestone,
}

const ENVIRONMENT_GENERAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("ford_width", 0.0, 100.0, 2.0),
    FieldSpec::float("ford_distance_factor", 0.0, 100.0, 1.0),
    FieldSpec::float("sun_angle_factor", 0.0, 10.0, 1.0),
    FieldSpec::float("resource_factor", 0.0, 10.0, 1.0),
    FieldSpec::tokens("deposits", Some(RESOURCE_TYPES)),
    FieldSpec::tokens("trees", Some(TREE_TYPES)),
    FieldSpec::float("trees_everywhere", 0.0, 1.0, 0.0),
];

const TERRAIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::vector("noise_amplitudes", 8, 0.0, 1.0),
    FieldSpec::range("altitude", -20.0, 100.0),
    FieldSpec::range("angle", -10.0, 60.0),
    FieldSpec::range("humidity", 0.0, 1.0),
    FieldSpec::float("density", 0.0, 1.0, 1.0),
];

const SEASON_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("id", SEASON_IDS),
    FieldSpec::text("setup_id"),
    FieldSpec::float("duration", 0.0, 1.0, 0.25),
    FieldSpec::float("precipitation_chance", 0.0, 1.0, 0.25),
    FieldSpec::float("windy_chance", 0.0, 1.0, 0.5),
    FieldSpec::float("very_windy_chance", 0.0, 1.0, 0.1),
    FieldSpec::float("fish_boost", 0.0, 1.0, 0.5),
    FieldSpec::range("temperature", -50.0, 50.0),
];

const DETAIL_OVERRIDE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("id"),
    FieldSpec::float("density", 0.0, 1.0, 1.0),
    FieldSpec::range("altitude", -20.0, 100.0),
    FieldSpec::range("angle", -10.0, 60.0),
    FieldSpec::range("humidity", 0.0, 1.0),
];

const OBJECT_OVERRIDE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("object_type"),
    FieldSpec::float("density", 0.0, 1.0, 1.0),
    FieldSpec::range("altitude", -20.0, 100.0),
    FieldSpec::range("angle", -10.0, 60.0),
    FieldSpec::range("humidity", 0.0, 1.0),
];

const SCENARIO_GENERAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("group_id"),
    FieldSpec::int("size", 0.0, 4.0, 2.0),
    FieldSpec::boolean("hardcore_mode_allowed"),
    FieldSpec::boolean("nomad_mode_allowed"),
    FieldSpec::boolean("show_completion_icon"),
    FieldSpec::text("required_scenario"),
    FieldSpec::enumeration("starting_era", ERAS),
];

const STARTING_CONDITIONS_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("season_id", SEASON_IDS),
    FieldSpec::text("visual_setup_id"),
];

const DISASTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::enumeration("disaster_type", DISASTER_TYPES),
    FieldSpec::period("period", 0.0, 100.0, 2.0),
    FieldSpec::period("variance", 0.0, 100.0, 0.5),
];

const LOCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("id"),
    FieldSpec::int("seed", 0.0, 4294967295.0, 0.0),
    FieldSpec::text("environment"),
    FieldSpec::vector("map_location", 2, 0.0, 1.0),
    FieldSpec::vector("position", 2, 0.0, 2048.0),
    FieldSpec::boolean("river"),
    FieldSpec::int("lakes", 0.0, 50.0, 0.0),
    FieldSpec::tokens("entity_types", Some(ENTITY_TYPES)),
];

const GOAL_FIELDS: &[FieldSpec] = &[FieldSpec::text("id"), FieldSpec::text("description")];

const MILESTONE_FIELDS: &[FieldSpec] =
    &[FieldSpec::text("id"), FieldSpec::text("description")];

pub fn domain_fields(domain: Domain) -> &'static [FieldSpec] {
    match domain {
        Domain::EnvironmentGeneral => ENVIRONMENT_GENERAL_FIELDS,
        Domain::Terrain => TERRAIN_FIELDS,
        Domain::Season => SEASON_FIELDS,
        Domain::DetailOverride => DETAIL_OVERRIDE_FIELDS,
        Domain::ObjectOverride => OBJECT_OVERRIDE_FIELDS,
        Domain::ScenarioGeneral => SCENARIO_GENERAL_FIELDS,
        Domain::StartingConditions => STARTING_CONDITIONS_FIELDS,
        Domain::Disaster => DISASTER_FIELDS,
        Domain::Location => LOCATION_FIELDS,
        Domain::Goal => GOAL_FIELDS,
        Domain::Milestone => MILESTONE_FIELDS,
    }
}

/// Registry lookup. Unknown fields return `None`: callers treat that as
/// "not representable, omit" instead of failing into user-facing code.
pub fn field_spec(domain: Domain, name: &str) -> Option<&'static FieldSpec> {
    domain_fields(domain).iter().find(|spec| spec.name == name)
}
