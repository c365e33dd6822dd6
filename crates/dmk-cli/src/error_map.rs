use std::fmt::Display;

use dmk_core::ModKitError;

fn map_error(code: &'static str, error: impl Display) -> ModKitError {
    ModKitError::new(code, error.to_string())
}

/// One-line JSON error object on stdout; non-zero exit code.
pub(crate) fn emit_error(error: ModKitError) -> i32 {
    println!(
        "{}",
        serde_json::json!({
            "error": { "code": error.code, "message": error.message }
        })
    );
    1
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> ModKitError {
    map_error("CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> ModKitError {
    map_error("CLI_OUTPUT_WRITE", error)
}

pub(crate) fn map_cli_state_write(error: std::io::Error) -> ModKitError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_encode(error: serde_json::Error) -> ModKitError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_read(error: std::io::Error) -> ModKitError {
    map_error("CLI_STATE_READ", error)
}

pub(crate) fn map_cli_state_invalid(error: serde_json::Error) -> ModKitError {
    map_error("CLI_STATE_INVALID", error)
}

pub(crate) fn map_cli_scan_walk(error: walkdir::Error) -> ModKitError {
    map_error("CLI_SCAN_WALK", error)
}

pub(crate) fn map_cli_report(error: serde_json::Error) -> ModKitError {
    map_error("CLI_REPORT", error)
}
