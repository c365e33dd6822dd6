use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dmk-cli")]
#[command(about = "Dawn of Man mod document transformer CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Import(ImportArgs),
    Render(RenderArgs),
    Validate(ValidateArgs),
    Scan(ScanArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "out")]
    pub(crate) out: String,
    #[arg(long = "strings-out")]
    pub(crate) strings_out: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
}

#[derive(Debug, Args)]
pub(crate) struct ScanArgs {
    #[arg(long = "dir")]
    pub(crate) dir: String,
}
