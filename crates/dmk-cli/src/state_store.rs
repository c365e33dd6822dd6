use std::fs;
use std::path::Path;

use dmk_core::{ModKitError, ModState};
use serde::{Deserialize, Serialize};

use crate::{
    map_cli_state_encode, map_cli_state_invalid, map_cli_state_read, map_cli_state_write,
};

pub(crate) const MOD_STATE_SCHEMA: &str = "modkit-state.v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StateFileV1 {
    pub(crate) schema_version: String,
    pub(crate) state: ModState,
}

pub(crate) fn save_state(path: &Path, state: &StateFileV1) -> Result<(), ModKitError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(map_cli_state_write)?;

    let payload = serde_json::to_string(state).map_err(map_cli_state_encode)?;
    fs::write(path, payload).map_err(map_cli_state_write)
}

pub(crate) fn load_state(path: &Path) -> Result<StateFileV1, ModKitError> {
    if !path.exists() {
        return Err(ModKitError::new(
            "CLI_STATE_NOT_FOUND",
            format!("State file does not exist: {}", path.display()),
        ));
    }

    let raw = fs::read_to_string(path).map_err(map_cli_state_read)?;

    let state: StateFileV1 = serde_json::from_str(&raw).map_err(map_cli_state_invalid)?;

    if state.schema_version != MOD_STATE_SCHEMA {
        return Err(ModKitError::new(
            "CLI_STATE_SCHEMA",
            format!("Unsupported state schema: {}", state.schema_version),
        ));
    }

    Ok(state)
}
