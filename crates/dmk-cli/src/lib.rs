use std::ffi::OsString;

use clap::Parser;
use dmk_core::ModKitError;

mod cli_args;
mod commands;
mod error_map;
mod state_store;

pub(crate) use cli_args::{Cli, ImportArgs, Mode, RenderArgs, ScanArgs, ValidateArgs};
pub(crate) use error_map::{
    emit_error, map_cli_output_write, map_cli_report, map_cli_scan_walk, map_cli_source_read,
    map_cli_state_encode, map_cli_state_invalid, map_cli_state_read, map_cli_state_write,
};
pub(crate) use state_store::{load_state, save_state, StateFileV1, MOD_STATE_SCHEMA};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return error.exit_code(),
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, ModKitError> {
    match cli.command {
        Mode::Import(args) => commands::run_import(args),
        Mode::Render(args) => commands::run_render(args),
        Mode::Validate(args) => commands::run_validate(args),
        Mode::Scan(args) => commands::run_scan(args),
    }
}
