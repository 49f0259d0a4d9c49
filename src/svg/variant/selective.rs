//! Selective fill: recolor the main color to the theme token.
//!
//! White highlights, transparent paints and faint shadows keep their
//! color. Strokes are recolored alongside fills, except on elements whose
//! fill was deliberately skipped.

use super::{RECOLORED, is_preserved, without_style_sheets};
use crate::svg::color::{
    EMAIL_BACKGROUND_PREFIX, is_background_path, is_transparent, is_url, parse_opacity,
    should_skip,
};
use crate::svg::dom::Element;

/// Gradient containers whose stops are recolored.
const GRADIENTS: &[&str] = &["linearGradient", "radialGradient"];

pub fn selective_fill(svg: &Element, token: &str) -> Element {
    without_style_sheets(svg).map(&mut |mut el, scope| {
        if el.is("stop") && scope.within_any(GRADIENTS) {
            recolor_stop(&mut el, token);
        } else if RECOLORED.contains(&el.local_name()) {
            recolor(&mut el, token);
        }
        el
    })
}

fn recolor_stop(stop: &mut Element, token: &str) {
    let Some(color) = stop.attr("stop-color") else {
        return;
    };
    let opacity = parse_opacity(stop.attr("stop-opacity"));
    if !should_skip(color, opacity) {
        stop.set_attr("stop-color", token);
    }
}

fn recolor(el: &mut Element, token: &str) {
    if is_preserved(el) {
        return;
    }
    el.remove_attr("class");

    let is_path = el.is("path");
    let fill = el.attr("fill").map(str::to_owned);
    let stroke = el.attr("stroke").map(str::to_owned);
    let d = el.attr("d").map(str::to_owned);
    let opacity = parse_opacity(el.attr("fill-opacity"));

    if let Some(d) = d.as_deref() {
        if is_path && d.trim_start().starts_with(EMAIL_BACKGROUND_PREFIX) {
            el.set_attr("fill", "none");
            return;
        }
        if is_background_path(d) && fill.as_deref().is_none_or(is_transparent) {
            return;
        }
        if is_path && fill.as_deref().is_some_and(|f| f.trim() == "none") {
            return;
        }
    }

    if fill.as_deref().is_some_and(is_url) {
        el.set_attr("fill", token);
    }
    if stroke.as_deref().is_some_and(is_url) {
        el.set_attr("stroke", token);
    }

    if let Some(f) = fill.as_deref()
        && !is_url(f)
        && should_skip(f, opacity)
    {
        return;
    }

    if el.is("use") {
        if fill.as_deref() != Some(token) {
            el.set_attr("fill", token);
        }
        return;
    }

    match fill.as_deref() {
        Some(f) if f != token => el.set_attr("fill", token),
        None if !el.is("g") && (!is_path || d.is_some()) => el.set_attr("fill", token),
        _ => {}
    }

    if let Some(s) = stroke.as_deref()
        && !is_transparent(s)
        && !is_url(s)
        && s != token
        && !should_skip(s, parse_opacity(el.attr("stroke-opacity")))
    {
        el.set_attr("stroke", token);
    }
}
