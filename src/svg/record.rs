//! Icon record assembly.
//!
//! Runs the full normalization pipeline for a single source file:
//!
//! 1. parse and promote inline styles
//! 2. mark brand whites (file names matching a preserve-white keyword)
//! 3. compute dimensions against the canonical 24×24 box
//! 4. strip background artifacts
//! 5. classify, then emit either a flattened path or full markup
//! 6. build the selective and invert variants when they can differ

use serde::{Serialize, Serializer};

use super::background::strip_backgrounds;
use super::classify::{Classification, classify};
use super::color::is_background_path;
use super::dimension::{self, CANONICAL_VIEWBOX, Dimensions};
use super::dom::{self, Element};
use super::error::SvgError;
use super::naming::{icon_name, icon_tags};
use super::shape::flatten_paths;
use super::style::promote_styles;
use super::variant::{self, invert_fill, mark_preserved_whites, selective_fill};

/// Category used when an icon sits directly in the input root.
pub const DEFAULT_CATEGORY: &str = "misc";

/// Published dimensions; always the canonical size.
const CANONICAL_DIMENSION: u32 = 24;

/// Options affecting record assembly.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Paint substituted for the icon's main color.
    pub color_token: String,
    /// File name keywords whose white details are kept in the selective variant.
    pub preserve_white: Vec<String>,
    /// Categories whose simple icons always get variants.
    pub variant_categories: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            color_token: "currentColor".into(),
            preserve_white: vec!["excel".into(), "sheets".into()],
            variant_categories: vec!["sources".into()],
        }
    }
}

/// Size of the source artwork before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OriginalDimensions {
    #[serde(serialize_with = "serialize_number")]
    pub width: f64,
    #[serde(serialize_with = "serialize_number")]
    pub height: f64,
}

/// Whole numbers are written as integers.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// The drawable payload of a record: flattened path data for simple icons,
/// full inner markup for complex ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IconBody {
    Complex { content: String },
    Simple { path: String },
}

/// One published icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconRecord {
    pub height: u32,
    pub width: u32,
    pub view_box: String,
    pub is_complex: bool,
    pub category: String,
    pub original_dimensions: OriginalDimensions,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub body: IconBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective_fill_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_fill_content: Option<String>,
}

impl IconRecord {
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            IconBody::Complex { content } => Some(content),
            IconBody::Simple { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match &self.body {
            IconBody::Simple { path } => Some(path),
            IconBody::Complex { .. } => None,
        }
    }
}

/// An assembled icon together with its catalog key.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedIcon {
    pub name: String,
    pub record: IconRecord,
}

/// Normalize one SVG document into a record named after `filename`.
pub fn extract_svg_data(
    svg: &str,
    filename: &str,
    category: &str,
    options: &ExtractOptions,
) -> Result<ExtractedIcon, SvgError> {
    let root = promote_styles(dom::parse_svg(svg)?);

    let lower = filename.to_lowercase();
    let root = if options
        .preserve_white
        .iter()
        .any(|keyword| !keyword.is_empty() && lower.contains(&keyword.to_lowercase()))
    {
        mark_preserved_whites(root)
    } else {
        root
    };

    let dims = dimension::normalize(&root);
    let root = strip_backgrounds(root, &dims.source);
    let class = classify(&root, &dims);

    let simple_paths = (!class.is_complex())
        .then(|| flatten_paths(&root))
        .flatten();

    let body = match simple_paths {
        Some(paths) => IconBody::Simple {
            path: paths.join(" "),
        },
        None => IconBody::Complex {
            content: variant::rescope(&root, &dims),
        },
    };
    let is_complex = matches!(body, IconBody::Complex { .. });

    let (selective_fill_content, invert_fill_content) =
        if wants_variants(&root, &class, is_complex, category, options) {
            let token = options.color_token.as_str();
            (
                Some(variant::rescope(&selective_fill(&root, token), &dims)),
                Some(variant::rescope(
                    &invert_fill(&root, token, class.is_outline),
                    &dims,
                )),
            )
        } else {
            (None, None)
        };

    let tags = icon_tags(filename, category);
    let category = match category.trim() {
        "" => DEFAULT_CATEGORY,
        c => c,
    };

    Ok(ExtractedIcon {
        name: icon_name(filename),
        record: IconRecord {
            height: CANONICAL_DIMENSION,
            width: CANONICAL_DIMENSION,
            view_box: CANONICAL_VIEWBOX.to_owned(),
            is_complex,
            category: category.to_owned(),
            original_dimensions: original_dimensions(&dims),
            tags,
            body,
            selective_fill_content,
            invert_fill_content,
        },
    })
}

fn original_dimensions(dims: &Dimensions) -> OriginalDimensions {
    OriginalDimensions {
        width: dims.original_width,
        height: dims.original_height,
    }
}

/// Raster content cannot be recolored. Complex icons always get variants;
/// simple ones only when recoloring could change something.
fn wants_variants(
    root: &Element,
    class: &Classification,
    is_complex: bool,
    category: &str,
    options: &ExtractOptions,
) -> bool {
    if class.has_raster {
        return false;
    }
    if is_complex || !class.colors.is_empty() {
        return true;
    }
    let has_background_path = root
        .descendants()
        .filter(|el| el.is("path"))
        .filter_map(|el| el.attr("d"))
        .any(is_background_path);
    has_background_path
        || options
            .variant_categories
            .iter()
            .any(|c| c == category.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(svg: &str, filename: &str, category: &str) -> ExtractedIcon {
        extract_svg_data(svg, filename, category, &ExtractOptions::default()).unwrap()
    }

    #[test]
    fn test_simple_icon() {
        let icon = extract(
            r#"<svg viewBox="0 0 24 24"><path d="M12 2L2 7v10l10 5 10-5V7L12 2z"/></svg>"#,
            "test-icon.svg",
            "test",
        );
        assert_eq!(icon.name, "test-icon-svg");
        let r = &icon.record;
        assert_eq!(r.path(), Some("M12 2L2 7v10l10 5 10-5V7L12 2z"));
        assert_eq!(r.content(), None);
        assert!(!r.is_complex);
        assert_eq!(r.view_box, "0 0 24 24");
        assert_eq!(r.category, "test");
        assert_eq!(r.tags, ["test", "icon", "svg"]);
        assert_eq!(r.selective_fill_content, None);
    }

    #[test]
    fn test_masked_icon_is_complex() {
        let svg = r##"<svg width="24" height="24" viewBox="0 0 24 24"><defs><mask id="mask0"><rect x="6" y="6" width="12" height="12" fill="#fff"/></mask></defs><g mask="url(#mask0)"><path d="M12 2L2 7v10l10 5 10-5V7L12 2z" fill="#000"/></g></svg>"##;
        let icon = extract(svg, "masked.svg", "test");
        let r = &icon.record;
        assert!(r.is_complex);
        let content = r.content().unwrap();
        assert!(content.contains("mask"));
        assert!(content.contains("path"));
        assert_eq!(r.path(), None);
        assert!(r.selective_fill_content.is_some());
        assert!(r.invert_fill_content.is_some());
    }

    #[test]
    fn test_background_rect_in_mask_removed_everywhere() {
        let svg = r##"<svg viewBox="0 0 24 24"><defs><mask id="m"><rect x="0" y="0" width="24" height="24" fill="#000"/><path d="M4 4h16v16H4z" fill="#fff"/></mask></defs><g mask="url(#m)"><path d="M12 2L2 7v10l10 5 10-5V7L12 2z" fill="#ff0000"/></g></svg>"##;
        let r = extract(svg, "shield.svg", "test").record;
        assert!(r.is_complex);
        for markup in [
            r.content().unwrap(),
            r.selective_fill_content.as_deref().unwrap(),
            r.invert_fill_content.as_deref().unwrap(),
        ] {
            assert!(!markup.contains("<rect"), "{markup}");
        }
    }

    #[test]
    fn test_placeholder_mask_collapses_to_simple() {
        let svg = r##"<svg viewBox="0 0 24 24"><defs><mask id="m"><rect width="24" height="24" fill="#D9D9D9"/></mask></defs><g mask="url(#m)"><path d="M12 2L2 7z"/></g></svg>"##;
        let r = extract(svg, "collapsed.svg", "").record;
        assert!(!r.is_complex);
        assert_eq!(r.path(), Some("M12 2L2 7z"));
        assert_eq!(r.category, "misc");
        assert_eq!(r.tags, ["collapsed", "svg"]);
    }

    #[test]
    fn test_raster_has_no_variants() {
        let svg = r#"<svg viewBox="0 0 24 24"><image href="logo.png" width="24" height="24"/></svg>"#;
        let r = extract(svg, "photo.svg", "brands").record;
        assert!(r.is_complex);
        assert_eq!(r.selective_fill_content, None);
        assert_eq!(r.invert_fill_content, None);
    }

    #[test]
    fn test_scaled_icon() {
        let svg = r##"<svg viewBox="0 0 48 48" width="48" height="48"><path d="M4 4h40v40z" fill="#333"/></svg>"##;
        let r = extract(svg, "big.svg", "test").record;
        assert!(r.is_complex);
        assert_eq!(r.original_dimensions.width, 48.0);
        assert!(r.content().unwrap().starts_with(r#"<g transform="translate(0, 0) scale(0.5)">"#));
        assert!(r.selective_fill_content.as_deref().unwrap().contains("currentColor"));
    }

    #[test]
    fn test_colored_simple_icon_gets_variants() {
        let svg = r##"<svg viewBox="0 0 24 24"><path d="M1 1h5" style="fill:#0066cc"/></svg>"##;
        let r = extract(svg, "blue.svg", "test").record;
        assert!(!r.is_complex);
        assert_eq!(
            r.selective_fill_content.as_deref(),
            Some(r#"<path d="M1 1h5" fill="currentColor"/>"#)
        );
        assert_eq!(
            r.invert_fill_content.as_deref(),
            Some(r#"<path d="M1 1h5" fill="white"/>"#)
        );
    }

    #[test]
    fn test_variant_category_forces_variants() {
        let svg = r#"<svg viewBox="0 0 24 24"><path d="M1 1h5"/></svg>"#;
        let r = extract(svg, "plain.svg", "sources").record;
        assert!(r.selective_fill_content.is_some());
    }

    #[test]
    fn test_preserve_white_keyword() {
        let svg = r##"<svg viewBox="0 0 24 24"><path d="M1 1h5" fill="#1D6F42"/><path d="M2 2h5" fill="#fff"/></svg>"##;
        let r = extract(svg, "Excel.svg", "brands").record;
        let selective = r.selective_fill_content.as_deref().unwrap();
        assert!(selective.contains(r##"fill="#fff""##));
        assert!(!selective.contains("data-preserve-white"));
        assert!(!r.content().unwrap().contains("data-preserve-white"));
    }

    #[test]
    fn test_invariants_hold() {
        let inputs = [
            "<svg/>",
            r#"<svg width="10px"><circle r="2"/></svg>"#,
            r##"<svg viewBox="0 0 16 32"><path d="M1 1" fill="#f00"/><path d="M2 2" fill="#00f"/></svg>"##,
        ];
        for input in inputs {
            let r = extract(input, "x.svg", "").record;
            assert_eq!(r.view_box, "0 0 24 24");
            assert_eq!((r.width, r.height), (24, 24));
            assert!(r.path().is_some() != r.content().is_some());
        }
    }

    #[test]
    fn test_json_shape() {
        let r = extract(r#"<svg><path d="M0 0L1 1"/></svg>"#, "a.svg", "ui").record;
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(
            json,
            r#"{"height":24,"width":24,"viewBox":"0 0 24 24","isComplex":false,"category":"ui","originalDimensions":{"width":24,"height":24},"tags":["ui","svg"],"path":"M0 0L1 1"}"#
        );
    }

    #[test]
    fn test_parse_failure() {
        let err = extract_svg_data("<svg><g></svg>", "bad.svg", "", &ExtractOptions::default());
        assert!(err.is_err());
        let err = extract_svg_data("<html/>", "bad.svg", "", &ExtractOptions::default());
        assert!(matches!(err, Err(SvgError::MissingRoot)));
    }
}
