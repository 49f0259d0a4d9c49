//! `[font]` section configuration.
//!
//! Icon font source generation. Glyph SVGs and the codepoint map are always
//! written when enabled; compiling them into an actual font is delegated to
//! an external command.
//!
//! # Example
//!
//! ```toml
//! [font]
//! enable = true
//! name = "icons"                 # Font family / output file stem
//! prefix = "icon"                # CSS class prefix recorded in the map
//! start_codepoint = 0xE000       # First Private Use Area codepoint
//! compiler = ["fantasticon"]     # Invoked as: <cmd...> <glyph dir> <fonts dir> <name>
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Private Use Area bounds.
pub const PUA_START: u32 = 0xE000;
pub const PUA_END: u32 = 0xF8FF;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Generate font sources.
    pub enable: bool,

    /// Font name, also the stem of the map file.
    pub name: String,

    /// CSS class prefix.
    pub prefix: String,

    /// Codepoint of the first glyph.
    pub start_codepoint: u32,

    /// Optional font compiler command.
    pub compiler: Vec<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            enable: true,
            name: "icons".into(),
            prefix: "icon".into(),
            start_codepoint: PUA_START,
            compiler: Vec::new(),
        }
    }
}

pub struct FontConfigFields {
    pub name: FieldPath,
    pub start_codepoint: FieldPath,
}

impl FontConfig {
    pub const FIELDS: FontConfigFields = FontConfigFields {
        name: FieldPath::new("font.name"),
        start_codepoint: FieldPath::new("font.start_codepoint"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        let name = self.name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            diag.error_with_hint(
                Self::FIELDS.name,
                format!("invalid font name `{}`", self.name),
                "the name is used as a file name, e.g. `icons`",
            );
        }

        if !(PUA_START..=PUA_END).contains(&self.start_codepoint) {
            diag.error_with_hint(
                Self::FIELDS.start_codepoint,
                format!("U+{:04X} is outside the Private Use Area", self.start_codepoint),
                format!("use a value between 0x{PUA_START:X} and 0x{PUA_END:X}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let mut diag = ConfigDiagnostics::new();
        FontConfig::default().validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_codepoint_out_of_range() {
        let config = FontConfig {
            start_codepoint: 0x41,
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, FontConfig::FIELDS.start_codepoint);
    }

    #[test]
    fn test_disabled_skips_validation() {
        let config = FontConfig {
            enable: false,
            name: String::new(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_bad_name() {
        for name in ["", "../x", ".hidden"] {
            let config = FontConfig {
                name: name.into(),
                ..Default::default()
            };
            let mut diag = ConfigDiagnostics::new();
            config.validate(&mut diag);
            assert!(diag.has_errors(), "{name}");
        }
    }
}
