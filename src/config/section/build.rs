//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! input = "icons"     # Source tree, one subdirectory per category
//! output = "dist"     # Where the JSON catalogs and font sources go
//! parallel = false    # Extract icons on the rayon thread pool
//! pretty = true       # Indent JSON output
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Icon source directory (relative to project root).
    pub input: PathBuf,

    /// Output directory (relative to project root).
    pub output: PathBuf,

    /// Process icons in parallel. Output order is unaffected.
    pub parallel: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: "icons".into(),
            output: "dist".into(),
            parallel: false,
            pretty: true,
        }
    }
}

pub struct BuildConfigFields {
    pub input: FieldPath,
    pub output: FieldPath,
}

impl BuildConfig {
    pub const FIELDS: BuildConfigFields = BuildConfigFields {
        input: FieldPath::new("build.input"),
        output: FieldPath::new("build.output"),
    };

    /// Validate normalized (absolute) paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.input.exists() {
            diag.error_with_hint(
                Self::FIELDS.input,
                format!("icon directory not found: {}", self.input.display()),
                "create it or point `build.input` at an existing directory",
            );
        } else if !self.input.is_dir() {
            diag.error(
                Self::FIELDS.input,
                format!("not a directory: {}", self.input.display()),
            );
        }

        if self.output == self.input {
            diag.error(
                Self::FIELDS.output,
                "output directory must differ from the icon directory",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.input, PathBuf::from("icons"));
        assert_eq!(config.output, PathBuf::from("dist"));
        assert!(!config.parallel);
        assert!(config.pretty);
    }

    #[test]
    fn test_validate_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig {
            input: dir.path().join("missing"),
            output: dir.path().join("dist"),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, BuildConfig::FIELDS.input);
    }

    #[test]
    fn test_validate_same_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig {
            input: dir.path().to_path_buf(),
            output: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field, BuildConfig::FIELDS.output);
    }
}
