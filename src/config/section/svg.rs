//! `[svg]` section configuration.
//!
//! Settings for icon normalization and recoloring.
//!
//! # Example
//!
//! ```toml
//! [svg]
//! color_token = "currentColor"          # Paint used by the selective/invert variants
//! preserve_white = ["excel", "sheets"]  # File name keywords keeping white details
//! variant_categories = ["sources"]      # Always build variants for these categories
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::svg::ExtractOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Theme paint substituted for the main color.
    pub color_token: String,

    /// Case-insensitive file name keywords. Matching icons keep their white
    /// elements in the selective variant.
    pub preserve_white: Vec<String>,

    /// Categories whose simple icons always get recolored variants.
    pub variant_categories: Vec<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        let defaults = ExtractOptions::default();
        Self {
            color_token: defaults.color_token,
            preserve_white: defaults.preserve_white,
            variant_categories: defaults.variant_categories,
        }
    }
}

pub struct SvgConfigFields {
    pub color_token: FieldPath,
    pub preserve_white: FieldPath,
}

impl SvgConfig {
    pub const FIELDS: SvgConfigFields = SvgConfigFields {
        color_token: FieldPath::new("svg.color_token"),
        preserve_white: FieldPath::new("svg.preserve_white"),
    };

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            color_token: self.color_token.clone(),
            preserve_white: self.preserve_white.clone(),
            variant_categories: self.variant_categories.clone(),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let token = self.color_token.trim();
        if token.is_empty() {
            diag.error(Self::FIELDS.color_token, "color token must not be empty");
        } else if token.contains(['"', '<', '>', '&']) {
            diag.error_with_hint(
                Self::FIELDS.color_token,
                format!("`{token}` cannot be used as an attribute value"),
                "use a plain paint such as `currentColor` or `#000`",
            );
        }

        if self.preserve_white.iter().any(|k| k.trim().is_empty()) {
            diag.warn(
                Self::FIELDS.preserve_white,
                "empty keywords are ignored",
            );
        }
    }
}
