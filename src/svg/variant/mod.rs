//! Recolored renditions of an icon.
//!
//! Both variants work on a copy of the stripped `<svg>` tree with its
//! `<style>` sheets removed, and are emitted as inner markup re-scoped to
//! the canonical view box.

mod invert;
mod selective;

pub use invert::invert_fill;
pub use selective::selective_fill;

use super::color::is_white;
use super::dimension::Dimensions;
use super::dom::Element;

/// Marker placed on white-filled elements of icons whose brand artwork
/// must keep its white details. Never present in emitted markup.
pub const PRESERVE_WHITE_ATTR: &str = "data-preserve-white";

/// Elements rewritten by the recoloring passes.
pub(crate) const RECOLORED: &[&str] = &[
    "path", "rect", "circle", "ellipse", "polygon", "polyline", "use", "g",
];

/// Mark every element with a white fill so the selective pass leaves it.
pub fn mark_preserved_whites(svg: Element) -> Element {
    svg.map(&mut |mut el, _| {
        if el.attr("fill").is_some_and(is_white) {
            el.set_attr(PRESERVE_WHITE_ATTR, "true");
        }
        el
    })
}

pub(crate) fn is_preserved(el: &Element) -> bool {
    el.attr(PRESERVE_WHITE_ATTR) == Some("true")
}

/// Children of `svg` as markup, wrapped in a `<g transform>` when the icon
/// needs rescaling. Preservation markers are removed.
pub fn rescope(svg: &Element, dims: &Dimensions) -> String {
    let svg = svg.clone().map(&mut |mut el, _| {
        el.remove_attr(PRESERVE_WHITE_ATTR);
        el
    });
    let inner = svg.inner_markup();
    match &dims.scale_transform {
        Some(transform) => format!(r#"<g transform="{transform}">{inner}</g>"#),
        None => inner,
    }
}

/// Common preparation: a copy without `<style>` sheets.
pub(crate) fn without_style_sheets(svg: &Element) -> Element {
    svg.clone().without("style")
}
