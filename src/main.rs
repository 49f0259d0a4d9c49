//! iconpack - normalize SVG icon sets into JSON catalogs and icon font sources.

mod cli;
mod config;
mod logger;
mod pipeline;
mod svg;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_icons, inspect::inspect_icon};
use config::IconConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = IconConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_icons(&config).map(|_| ()),
        Commands::Inspect { args } => inspect_icon(&config, args),
    }
}
