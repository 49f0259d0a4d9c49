//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Normalize SVG icons into a JSON catalog and icon font sources
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconpack.toml)
    #[arg(short = 'C', long, global = true, default_value = "iconpack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Process every icon and write the catalogs
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Process a single SVG file and print its record as JSON
    #[command(visible_alias = "i")]
    Inspect {
        #[command(flatten)]
        args: InspectArgs,
    },
}

/// Build command arguments. Each one overrides the matching config key.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Icon source directory (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub input: Option<PathBuf>,

    /// Output directory (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Extract icons in parallel
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub parallel: Option<bool>,

    /// Generate icon font sources
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub font: Option<bool>,

    /// Pretty-print JSON output
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pretty: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Inspect command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// SVG file to process
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Category to record (default: none, published as `misc`)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Override the color token
    #[arg(short, long)]
    pub token: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
}
