//! Project configuration for `iconpack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [build], [svg], [font]
//! ├── types/         # ConfigError, diagnostics, field paths
//! ├── util.rs        # config file discovery
//! └── mod.rs         # IconConfig (this file)
//! ```
//!
//! The config file is optional. Without one, defaults apply relative to the
//! current directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, FontConfig, PUA_END, PUA_START, SvgConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing `iconpack.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root: parent of the config file, or cwd without one
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub svg: SvgConfig,

    #[serde(default)]
    pub font: FontConfig,
}

impl IconConfig {
    /// Load configuration for the parsed command line.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.apply_command_options(cli);
        config.normalize_paths(&root);

        if cli.is_build() {
            config.validate()?;
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from a file, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Directory receiving the glyph SVGs and codepoint map.
    pub fn fonts_dir(&self) -> PathBuf {
        self.build.output.join("fonts")
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Inspect { args } => {
                Self::update_option(&mut self.svg.color_token, args.token.as_ref());
            }
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.input, args.input.as_ref());
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.parallel, args.parallel.as_ref());
        Self::update_option(&mut self.build.pretty, args.pretty.as_ref());
        Self::update_option(&mut self.font.enable, args.font.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    pub(crate) fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        if !self.config_path.as_os_str().is_empty() {
            self.config_path = normalize_path(&self.config_path);
        }
        self.build.input = normalize_path(&root.join(&self.build.input));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, printing warnings and collecting errors.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.svg.validate(&mut diag);
        self.font.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> IconConfig {
    let (parsed, ignored) = IconConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
