//! Complexity and outline detection.
//!
//! A *simple* icon can be published as a single path string. Anything that
//! relies on paint servers, masking, multiple colors, transforms or raster
//! content must ship its full markup instead.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::color::{is_black, is_transparent, is_url, is_white};
use super::dimension::Dimensions;
use super::dom::Element;

/// Elements whose mere presence makes an icon complex.
const COMPLEX_ELEMENTS: &[&str] = &[
    "mask",
    "filter",
    "linearGradient",
    "radialGradient",
    "pattern",
    "clipPath",
    "defs",
];

/// Elements whose paints count towards the color total.
const COLORED_ELEMENTS: &[&str] = &["path", "rect", "circle", "ellipse", "polygon", "polyline", "g"];

/// Elements inspected for outline detection.
const OUTLINE_ELEMENTS: &[&str] = &["path", "rect", "circle", "ellipse", "polygon", "polyline"];

/// Path data some exporters produce with run-together negative numbers.
static MALFORMED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[a-zA-Z]-\d+\.\d*-\d+\.\d*-\d+|[a-zA-Z]-\d+-\d+-\d+|[qQtTlLhHvVcCsSaAzZ]-[\d\.-]+[qQtTlLhHvVcCsSaAzZ]",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexityReason {
    /// Mask, filter, gradient, pattern, clip path or defs element.
    Element(String),
    /// Group carrying a filter or mask attribute.
    GroupEffect,
    MultipleColors(usize),
    NestedGroups,
    FillRule,
    Raster,
    GroupTransform,
    Scaling,
    MalformedPath,
}

impl fmt::Display for ComplexityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(name) => write!(f, "<{name}> element"),
            Self::GroupEffect => f.write_str("group filter or mask"),
            Self::MultipleColors(n) => write!(f, "{n} colors"),
            Self::NestedGroups => f.write_str("nested groups"),
            Self::FillRule => f.write_str("fill-rule or clip-rule"),
            Self::Raster => f.write_str("embedded image"),
            Self::GroupTransform => f.write_str("group transform"),
            Self::Scaling => f.write_str("non-canonical view box"),
            Self::MalformedPath => f.write_str("malformed path data"),
        }
    }
}

/// Result of inspecting a stripped `<svg>` element.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub reasons: Vec<ComplexityReason>,
    /// Distinct explicit paints, lowercased, excluding `none` and `currentColor`.
    pub colors: BTreeSet<String>,
    pub is_outline: bool,
    pub has_raster: bool,
}

impl Classification {
    pub fn is_complex(&self) -> bool {
        !self.reasons.is_empty()
    }
}

pub fn classify(svg: &Element, dims: &Dimensions) -> Classification {
    let mut reasons = Vec::new();

    for name in COMPLEX_ELEMENTS {
        if svg.descendants().any(|el| el.is(name)) {
            reasons.push(ComplexityReason::Element((*name).to_owned()));
        }
    }
    if svg
        .descendants()
        .any(|el| el.is("g") && (el.has_attr("filter") || el.has_attr("mask")))
    {
        reasons.push(ComplexityReason::GroupEffect);
    }

    let colors = collect_colors(svg);
    if colors.len() > 1 {
        reasons.push(ComplexityReason::MultipleColors(colors.len()));
    }

    let mut nested = false;
    svg.walk(&mut |el, scope| nested |= el.is("g") && scope.within("g"));
    if nested {
        reasons.push(ComplexityReason::NestedGroups);
    }

    if svg
        .descendants()
        .any(|el| el.has_attr("fill-rule") || el.has_attr("clip-rule"))
    {
        reasons.push(ComplexityReason::FillRule);
    }

    let has_raster = svg.descendants().any(|el| el.is("image"));
    if has_raster {
        reasons.push(ComplexityReason::Raster);
    }
    if svg.descendants().any(|el| el.is("g") && el.has_attr("transform")) {
        reasons.push(ComplexityReason::GroupTransform);
    }
    if dims.needs_scaling() {
        reasons.push(ComplexityReason::Scaling);
    }
    if svg
        .descendants()
        .filter(|el| el.is("path"))
        .filter_map(|el| el.attr("d"))
        .any(is_malformed_path)
    {
        reasons.push(ComplexityReason::MalformedPath);
    }

    Classification {
        reasons,
        colors,
        is_outline: is_outline(svg),
        has_raster,
    }
}

fn collect_colors(svg: &Element) -> BTreeSet<String> {
    svg.descendants()
        .filter(|el| COLORED_ELEMENTS.contains(&el.local_name()))
        .flat_map(|el| [el.attr("fill"), el.attr("stroke")])
        .flatten()
        .filter(|c| !c.eq_ignore_ascii_case("none") && !c.eq_ignore_ascii_case("currentColor"))
        .map(|c| c.trim().to_ascii_lowercase())
        .collect()
}

/// Whether an icon is drawn only in black and/or white (or has no explicit
/// paint at all).
pub fn is_outline(svg: &Element) -> bool {
    let colors: BTreeSet<String> = svg
        .descendants()
        .filter(|el| OUTLINE_ELEMENTS.contains(&el.local_name()))
        .flat_map(|el| [el.attr("fill"), el.attr("stroke")])
        .flatten()
        .filter(|c| !is_transparent(c) && !is_url(c))
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();

    colors.len() <= 2 && colors.iter().all(|c| is_white(c) || is_black(c))
}

pub fn is_malformed_path(d: &str) -> bool {
    MALFORMED_PATH.is_match(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::{dimension, dom};

    fn classify_markup(markup: &str) -> Classification {
        let svg = dom::parse(markup).unwrap();
        let dims = dimension::normalize(&svg);
        classify(&svg, &dims)
    }

    #[test]
    fn test_single_path_is_simple() {
        let c = classify_markup(r#"<svg viewBox="0 0 24 24"><path d="M12 2L2 7z"/></svg>"#);
        assert!(!c.is_complex());
        assert!(c.is_outline);
    }

    #[test]
    fn test_mask_is_complex() {
        let c = classify_markup(r#"<svg><mask id="m"><path d="M0 0"/></mask></svg>"#);
        assert_eq!(c.reasons, [ComplexityReason::Element("mask".into())]);
    }

    #[test]
    fn test_color_count() {
        let c = classify_markup(
            r##"<svg><path fill="#F00"/><path fill="#f00"/><path fill="currentColor" stroke="none"/></svg>"##,
        );
        assert_eq!(c.colors.len(), 1);
        assert!(!c.is_complex());

        let c = classify_markup(r##"<svg><path fill="#f00"/><path stroke="#00f"/></svg>"##);
        assert_eq!(c.reasons, [ComplexityReason::MultipleColors(2)]);
    }

    #[test]
    fn test_structure_reasons() {
        let c = classify_markup("<svg><g><g><path/></g></g></svg>");
        assert!(c.reasons.contains(&ComplexityReason::NestedGroups));

        let c = classify_markup(r#"<svg><g transform="rotate(45)"><path/></g></svg>"#);
        assert!(c.reasons.contains(&ComplexityReason::GroupTransform));

        let c = classify_markup(r#"<svg><path fill-rule="evenodd" d="M0 0"/></svg>"#);
        assert!(c.reasons.contains(&ComplexityReason::FillRule));

        let c = classify_markup(r#"<svg><image href="a.png"/></svg>"#);
        assert!(c.has_raster);
    }

    #[test]
    fn test_scaling_is_complex() {
        let c = classify_markup(r#"<svg viewBox="0 0 48 48"><path d="M0 0"/></svg>"#);
        assert_eq!(c.reasons, [ComplexityReason::Scaling]);
    }

    #[test]
    fn test_malformed_path() {
        assert!(is_malformed_path("M10 10l-1.5-2.5-3"));
        assert!(is_malformed_path("M1 1c-1-2-3"));
        assert!(!is_malformed_path("M12 2L2 7v10l10 5 10-5V7L12 2z"));
    }

    #[test]
    fn test_outline_detection() {
        assert!(is_outline(&dom::parse("<svg><path/></svg>").unwrap()));
        assert!(is_outline(
            &dom::parse(r##"<svg><path fill="#000" stroke="white"/></svg>"##).unwrap()
        ));
        assert!(is_outline(
            &dom::parse(r##"<svg><path fill="none" stroke="#000"/><rect fill="url(#g)"/></svg>"##).unwrap()
        ));
        assert!(!is_outline(
            &dom::parse(r##"<svg><path fill="#000"/><path fill="#f00"/></svg>"##).unwrap()
        ));
        assert!(!is_outline(
            &dom::parse(r##"<svg><path fill="#000"/><path fill="#fff"/><path fill="black"/></svg>"##)
                .unwrap()
        ));
    }
}
