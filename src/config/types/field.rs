//! Config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path of a config key, used to point diagnostics at the offending
/// entry.
///
/// Each section exposes its paths as `Section::FIELDS`:
///
/// ```ignore
/// diag.error(FontConfig::FIELDS.name, "required");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Top-level table the key lives in (`font` for `font.name`).
    pub fn section(&self) -> &'static str {
        self.0.split_once('.').map_or(self.0, |(section, _)| section)
    }

    /// Key name within its table.
    pub fn key(&self) -> &'static str {
        self.0.rsplit_once('.').map_or(self.0, |(_, key)| key)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_and_key() {
        let field = FieldPath::new("font.start_codepoint");
        assert_eq!(field.section(), "font");
        assert_eq!(field.key(), "start_codepoint");
        assert_eq!(FieldPath::new("root").section(), "root");
    }
}
