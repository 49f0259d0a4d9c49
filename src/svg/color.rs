//! Color predicates shared by the classifier and the variant generators.

use std::sync::LazyLock;

use regex::Regex;

/// Accepted spellings of white, compared after trimming and lowercasing.
const WHITE: &[&str] = &[
    "#ffffff",
    "#fff",
    "white",
    "rgb(255,255,255)",
    "rgb(255, 255, 255)",
];

const BLACK: &[&str] = &["#000000", "#000", "black", "rgb(0,0,0)", "rgb(0, 0, 0)"];

/// Fills fainter than this are treated as shadows and left alone.
pub const SHADOW_OPACITY: f64 = 0.1;

/// Literal full-canvas background that precedes the visible shape in some
/// exported icons (an envelope set in particular). Always forced to `fill="none"`.
pub const EMAIL_BACKGROUND_PREFIX: &str = "M0 0h24v24H0V0z";

/// Path data shapes that cover the whole canvas (24-unit frames, export
/// artifacts, rounded full-canvas cards).
const BACKGROUND_PATH_PATTERNS: &[&str] = &[
    r"(?i)^M0\s+0h24v24H0V?0z?$",
    r"(?i)^M0,?0h24v24H0V?0z?$",
    r"(?i)^M0\s+0L24\s+0L24\s+24L0\s+24z?$",
    r"(?i)^M24\s+\d+(\.\d+)?V\d+(\.\d+)?C24\s+\d+(\.\d+)?.*H\d+(\.\d+)?C\d+(\.\d+)?\s+24\s+0\s+\d+(\.\d+)?\s+0\s+\d+(\.\d+)?V\d+(\.\d+)?C0\s+\d+(\.\d+)?.*Z$",
    r"(?i)^M0\s+0[hH]\d+[vV]\d+[hH]-?\d+[vV]?-?\d*[zZ]?$",
    r"(?i)^M\d+\s+\d+[hH]\d+[vV]\d+[hH]-?\d+[zZ]?$",
    r"(?i)^M\d+\s+\d+[hH]\d+[vV]\d+[hH]-?\d+[vV]-?\d+[zZ]?$",
    r"(?i)^M0\s+0h24v24H0V0z\s+M",
];

static BACKGROUND_PATHS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BACKGROUND_PATH_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

fn normalized(color: &str) -> String {
    color.trim().to_ascii_lowercase()
}

pub fn is_white(color: &str) -> bool {
    WHITE.contains(&normalized(color).as_str())
}

pub fn is_black(color: &str) -> bool {
    BLACK.contains(&normalized(color).as_str())
}

/// `none` or `transparent`.
pub fn is_transparent(color: &str) -> bool {
    matches!(normalized(color).as_str(), "none" | "transparent")
}

/// Paint server reference such as `url(#gradient)`.
pub fn is_url(color: &str) -> bool {
    color.trim_start().starts_with("url(")
}

/// An explicit paint that actually draws something.
pub fn is_solid(paint: Option<&str>) -> bool {
    paint.is_some_and(|p| !p.trim().is_empty() && !is_transparent(p))
}

/// Whether a color should be left untouched when recoloring.
///
/// Transparent paints, near-invisible shadows and white highlights are
/// skipped. Black is always recolorable, and paint server references are
/// not considered here.
pub fn should_skip(color: &str, opacity: f64) -> bool {
    if is_transparent(color) {
        return true;
    }
    if opacity < SHADOW_OPACITY {
        return true;
    }
    if is_white(color) {
        return true;
    }
    false
}

/// Whether path data draws a full-canvas background rectangle.
pub fn is_background_path(d: &str) -> bool {
    let d = WHITESPACE.replace_all(d.trim(), " ");
    BACKGROUND_PATHS.iter().any(|re| re.is_match(&d))
}

/// Parse an opacity value, defaulting to fully opaque.
pub fn parse_opacity(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_spellings() {
        for color in ["#fff", "#FFFFFF", " white ", "rgb(255,255,255)", "rgb(255, 255, 255)"] {
            assert!(is_white(color), "{color}");
        }
        assert!(!is_white("#fffffe"));
        assert!(!is_white("rgb(255,  255, 255)"));
    }

    #[test]
    fn test_black_spellings() {
        for color in ["#000", "#000000", "BLACK", "rgb(0,0,0)", "rgb(0, 0, 0)"] {
            assert!(is_black(color), "{color}");
        }
        assert!(!is_black("#111"));
    }

    #[test]
    fn test_should_skip() {
        assert!(should_skip("none", 1.0));
        assert!(should_skip("transparent", 1.0));
        assert!(should_skip("#fff", 1.0));
        assert!(should_skip("#ff0000", 0.05));
        assert!(!should_skip("#000", 1.0));
        assert!(!should_skip("#0066cc", 1.0));
        assert!(!should_skip("url(#g)", 1.0));
        assert!(!should_skip("#ff0000", 0.1));
    }

    #[test]
    fn test_background_paths() {
        assert!(is_background_path("M0 0h24v24H0V0z"));
        assert!(is_background_path("M0 0h24v24H0z"));
        assert!(is_background_path("M0,0h24v24H0V0z"));
        assert!(is_background_path("M0  0L24 0L24 24L0 24z"));
        assert!(is_background_path("M2 2h20v20h-20z"));
        assert!(is_background_path("M0 0h24v24H0V0z M5 5h2"));
        assert!(!is_background_path("M12 2L2 7v10l10 5 10-5V7L12 2z"));
        assert!(!is_background_path(""));
    }

    #[test]
    fn test_parse_opacity() {
        assert_eq!(parse_opacity(None), 1.0);
        assert_eq!(parse_opacity(Some(" 0.5 ")), 0.5);
        assert_eq!(parse_opacity(Some("abc")), 1.0);
    }

    #[test]
    fn test_is_solid() {
        assert!(is_solid(Some("#000")));
        assert!(!is_solid(Some("none")));
        assert!(!is_solid(Some("")));
        assert!(!is_solid(None));
    }
}
