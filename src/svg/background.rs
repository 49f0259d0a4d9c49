//! Removal of design-tool background artifacts.
//!
//! Exported icons often carry a canvas-sized rectangle, either drawn
//! directly or as a placeholder inside a `<mask>`. Those shapes would turn
//! into a solid square once recolored, so they are removed before
//! classification. Masks left without drawable content are removed too,
//! along with any reference to them.
//!
//! All geometry is measured against the *source* view box.

use rustc_hash::FxHashSet;

use super::color::is_solid;
use super::dimension::{CANONICAL_SIZE, ViewBox, parse_leading_number};
use super::dom::{self, Element};
use super::error::SvgError;

/// A mask rect at least this large in both directions is a placeholder.
pub const MASK_RECT_MIN_SIZE: f64 = 20.0;
/// Alternatively, a mask rect covering this share of each view box side.
pub const MASK_RECT_MIN_RATIO: f64 = 0.8;
/// Absolute slack when comparing a rect side with the view box.
pub const SIZE_TOLERANCE: f64 = 2.0;
/// Relative slack when comparing a rect side with the view box.
pub const RELATIVE_SIZE_RANGE: (f64, f64) = (0.9, 1.1);
/// Absolute slack when comparing a rect origin with the view box origin.
pub const POSITION_TOLERANCE: f64 = 2.0;
/// Minimum covered area for a solid rect inside a mask.
pub const MASK_COVERAGE: f64 = 0.8;
/// Minimum covered area for a solid rect inside a mask, second chance.
pub const MASK_FULL_COVERAGE: f64 = 0.9;
/// Slack for a mask rect matching the canonical 24×24 size.
pub const CANONICAL_RECT_TOLERANCE: f64 = 0.5;
/// Slack for a mask rect matching the view box size exactly.
pub const VIEWBOX_RECT_TOLERANCE: f64 = 1.0;

/// Elements that count as mask content.
const MASK_CONTENT: &[&str] = &["rect", "path", "circle", "ellipse", "polygon", "polyline", "g"];

/// Run every removal pass on an `<svg>` element.
pub fn strip_backgrounds(svg: Element, view_box: &ViewBox) -> Element {
    let svg = remove_mask_placeholders(svg, view_box);
    let svg = remove_background_rects(svg, view_box);
    cleanup_masks(svg)
}

/// Markup-level entry point taking the view box as `"x y w h"`. An invalid
/// view box string means the canonical box.
pub fn strip_background_markup(markup: &str, view_box: &str) -> Result<String, SvgError> {
    let view_box = ViewBox::parse(view_box).unwrap_or(ViewBox::CANONICAL);
    let svg = dom::parse_svg(markup)?;
    Ok(strip_backgrounds(svg, &view_box).to_markup())
}

/// Numeric rect attribute read from its leading number, so `24px` is 24.
/// Absent means 0; no leading number means NaN, which fails every
/// comparison below.
fn rect_number(rect: &Element, key: &str) -> f64 {
    match rect.attr(key) {
        None => 0.0,
        Some(value) => parse_leading_number(value).unwrap_or(f64::NAN),
    }
}

struct RectGeometry {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    solid: bool,
}

impl RectGeometry {
    fn of(rect: &Element) -> Self {
        Self {
            x: rect_number(rect, "x"),
            y: rect_number(rect, "y"),
            width: rect_number(rect, "width"),
            height: rect_number(rect, "height"),
            solid: is_solid(rect.attr("fill")),
        }
    }
}

fn remove_mask_placeholders(svg: Element, vb: &ViewBox) -> Element {
    svg.filter_map(&mut |el, scope| {
        if el.is("rect") && scope.within("mask") {
            let r = RectGeometry::of(&el);
            let large = (r.width >= MASK_RECT_MIN_SIZE && r.height >= MASK_RECT_MIN_SIZE)
                || (r.width >= vb.width * MASK_RECT_MIN_RATIO
                    && r.height >= vb.height * MASK_RECT_MIN_RATIO);
            if large && r.solid {
                return None;
            }
        }
        Some(el)
    })
}

fn remove_background_rects(svg: Element, vb: &ViewBox) -> Element {
    svg.filter_map(&mut |el, scope| {
        if el.is("rect") && is_background_rect(&el, scope.within("mask"), vb) {
            return None;
        }
        Some(el)
    })
}

/// Whether a `<rect>` is a canvas-covering background.
pub fn is_background_rect(rect: &Element, in_mask: bool, vb: &ViewBox) -> bool {
    let r = RectGeometry::of(rect);
    let (low, high) = RELATIVE_SIZE_RANGE;

    let width_close = (r.width - vb.width).abs() < SIZE_TOLERANCE
        || (r.width >= vb.width * low && r.width <= vb.width * high);
    let height_close = (r.height - vb.height).abs() < SIZE_TOLERANCE
        || (r.height >= vb.height * low && r.height <= vb.height * high);
    let x_close = (r.x - vb.x).abs() < POSITION_TOLERANCE || r.x <= vb.x + 1.0;
    let y_close = (r.y - vb.y).abs() < POSITION_TOLERANCE || r.y <= vb.y + 1.0;

    let coverage = (r.width * r.height) / vb.area();
    let canonical_size = (r.width - CANONICAL_SIZE).abs() < CANONICAL_RECT_TOLERANCE
        && (r.height - CANONICAL_SIZE).abs() < CANONICAL_RECT_TOLERANCE;
    let view_box_size = (r.width - vb.width).abs() < VIEWBOX_RECT_TOLERANCE
        && (r.height - vb.height).abs() < VIEWBOX_RECT_TOLERANCE;

    if in_mask && coverage > MASK_COVERAGE && r.solid {
        return true;
    }
    if width_close && height_close && x_close && y_close && r.solid {
        return true;
    }
    if in_mask && (canonical_size || view_box_size) {
        return true;
    }
    if in_mask && canonical_size && r.solid {
        return true;
    }
    in_mask && coverage > MASK_FULL_COVERAGE && r.solid
}

fn mask_has_content(mask: &Element) -> bool {
    mask.elements().next().is_some()
        && mask
            .descendants()
            .any(|el| MASK_CONTENT.contains(&el.local_name()))
}

/// Id referenced by `url(#id)`.
fn url_target(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("url(")?.strip_suffix(')')?;
    let inner = inner.trim().trim_matches(|c| c == '"' || c == '\'');
    inner.strip_prefix('#')
}

fn cleanup_masks(svg: Element) -> Element {
    let svg = svg.filter_map(&mut |el, _| (!el.is("mask") || mask_has_content(&el)).then_some(el));

    let mut ids: FxHashSet<String> = FxHashSet::default();
    if let Some(id) = svg.attr("id") {
        ids.insert(id.to_owned());
    }
    for el in svg.descendants() {
        if let Some(id) = el.attr("id") {
            ids.insert(id.to_owned());
        }
    }

    let dangling = |el: &Element| {
        el.attr("mask")
            .and_then(url_target)
            .is_some_and(|id| !ids.contains(id))
    };

    let mut svg = svg;
    if dangling(&svg) {
        svg.remove_attr("mask");
    }
    let svg = svg.map(&mut |mut el, _| {
        if dangling(&el) {
            el.remove_attr("mask");
        }
        el
    });

    svg.filter_map(&mut |el, _| (!el.is("defs") || el.elements().next().is_some()).then_some(el))
}
