use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::ModValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

static UNSET: FieldState = FieldState::Unset;

/// Tri-state replacing the web editor's `undefined`/`false`/value
/// overloading: `Unset` means never configured (omit the field entirely),
/// `Disabled` means the user explicitly switched the field off, and
/// `Present` carries a normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldState {
    #[default]
    Unset,
    Disabled,
    Present {
        value: ModValue,
    },
}

impl FieldState {
    pub fn present(value: ModValue) -> Self {
        Self::Present { value }
    }

    /// Maps a normalizer result onto the tri-state: an invalid or missing
    /// value stays `Unset`, never `Disabled`.
    pub fn from_normalized(value: Option<ModValue>) -> Self {
        match value {
            Some(value) => Self::Present { value },
            None => Self::Unset,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    pub fn value(&self) -> Option<&ModValue> {
        match self {
            Self::Present { value } => Some(value),
            _ => None,
        }
    }
}

/// One flat schema entity: a disaster, location, season, deposit or
/// prototype override. `kind` selects which FieldSpec set applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub kind: String,
    pub disabled: bool,
    pub fields: BTreeMap<String, FieldState>,
}

impl EntityRecord {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            disabled: false,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: ModValue) -> Self {
        self.fields
            .insert(name.into(), FieldState::present(value));
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, state: FieldState) {
        self.fields.insert(name.into(), state);
    }

    pub fn field(&self, name: &str) -> &FieldState {
        self.fields.get(name).unwrap_or(&UNSET)
    }

    pub fn value(&self, name: &str) -> Option<&ModValue> {
        self.field(name).value()
    }
}

/// Scenario logic condition. `And`/`Or`/`Not` carry nested sub-conditions;
/// every other kind is a leaf with attribute fields only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionNode {
    pub kind: String,
    pub fields: BTreeMap<String, FieldState>,
    pub sub_conditions: Vec<ConditionNode>,
}

impl ConditionNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
            sub_conditions: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: ModValue) -> Self {
        self.fields
            .insert(name.into(), FieldState::present(value));
        self
    }

    pub fn field(&self, name: &str) -> &FieldState {
        self.fields.get(name).unwrap_or(&UNSET)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionNode {
    pub kind: String,
    pub fields: BTreeMap<String, FieldState>,
}

impl ActionNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: ModValue) -> Self {
        self.fields
            .insert(name.into(), FieldState::present(value));
        self
    }

    pub fn field(&self, name: &str) -> &FieldState {
        self.fields.get(name).unwrap_or(&UNSET)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub flags: Vec<String>,
    pub condition: Option<ConditionNode>,
    pub actions: Vec<ActionNode>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: String,
    pub description: FieldState,
    pub condition: Option<ConditionNode>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRecord {
    pub id: String,
    pub description: FieldState,
    pub conditions: Vec<ConditionNode>,
    pub disabled: bool,
}

/// Id-keyed entity collection. Ids come from a monotonic counter and are
/// never reused after removal; ascending-id iteration is insertion order,
/// which is what keeps repeated-element order stable across round-trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CollectionRepr", into = "CollectionRepr")]
pub struct Collection {
    next_id: u64,
    entries: BTreeMap<u64, EntityRecord>,
}

/// Wire shape for `Collection`. JSON object keys are always strings, so
/// the id-keyed entries travel as `[id, record]` pairs and the map is
/// rebuilt on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionRepr {
    next_id: u64,
    entries: Vec<(u64, EntityRecord)>,
}

impl From<Collection> for CollectionRepr {
    fn from(collection: Collection) -> Self {
        Self {
            next_id: collection.next_id,
            entries: collection.entries.into_iter().collect(),
        }
    }
}

impl From<CollectionRepr> for Collection {
    fn from(repr: CollectionRepr) -> Self {
        Self {
            next_id: repr.next_id,
            entries: repr.entries.into_iter().collect(),
        }
    }
}

impl Collection {
    pub fn insert(&mut self, record: EntityRecord) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, record);
        id
    }

    pub fn remove(&mut self, id: u64) -> Option<EntityRecord> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: u64) -> Option<&EntityRecord> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut EntityRecord> {
        self.entries.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entries.values()
    }
}

impl FromIterator<EntityRecord> for Collection {
    fn from_iter<I: IntoIterator<Item = EntityRecord>>(iter: I) -> Self {
        let mut collection = Self::default();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

/// Flat editor state for one environment document. This shape is the
/// persistence-boundary contract: plain serde data, no behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentState {
    pub id: Option<String>,
    pub general: BTreeMap<String, FieldState>,
    pub terrain: BTreeMap<String, FieldState>,
    pub deposits: FieldState,
    pub trees: FieldState,
    pub seasons: Collection,
    pub detail_overrides: Collection,
    pub object_overrides: Collection,
}

/// Flat editor state for one scenario document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioState {
    pub id: Option<String>,
    pub general: BTreeMap<String, FieldState>,
    pub starting_conditions: BTreeMap<String, FieldState>,
    pub disasters: Collection,
    pub locations: Collection,
    pub goals: Vec<GoalRecord>,
    pub milestones: Vec<MilestoneRecord>,
    pub events: Vec<EventRecord>,
}

/// Either document's state, tagged for the persistence boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document", rename_all = "camelCase")]
pub enum ModState {
    Environment(EnvironmentState),
    Scenario(ScenarioState),
}
