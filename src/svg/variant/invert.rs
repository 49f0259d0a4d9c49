//! Invert fill: swap the icon onto a dark surface.
//!
//! White details take the theme token and everything else becomes white.
//! Outline icons (drawn only in black and white) also paint unfilled and
//! unstroked shapes white so the outline stays visible.

use super::{RECOLORED, without_style_sheets};
use crate::svg::color::{EMAIL_BACKGROUND_PREFIX, is_transparent, is_url, is_white};
use crate::svg::dom::Element;

const WHITE: &str = "white";

pub fn invert_fill(svg: &Element, token: &str, is_outline: bool) -> Element {
    without_style_sheets(svg).map(&mut |mut el, _| {
        if RECOLORED.contains(&el.local_name()) {
            invert(&mut el, token, is_outline);
        }
        el
    })
}

fn invert(el: &mut Element, token: &str, is_outline: bool) {
    el.remove_attr("class");

    let fill = el.attr("fill").map(str::to_owned);
    let stroke = el.attr("stroke").map(str::to_owned);

    // an unpainted canvas subpath stays unpainted
    if el.is("path")
        && fill.as_deref().is_some_and(is_transparent)
        && el
            .attr("d")
            .is_some_and(|d| d.trim_start().starts_with(EMAIL_BACKGROUND_PREFIX))
    {
        el.set_attr("fill", "none");
        return;
    }

    match fill.as_deref() {
        Some(f) if is_url(f) => el.set_attr("fill", WHITE),
        Some(f) if is_white(f) => el.set_attr("fill", token),
        Some(f) if is_transparent(f) => {}
        Some(_) => el.set_attr("fill", WHITE),
        None if is_outline => el.set_attr("fill", WHITE),
        None => {}
    }

    match stroke.as_deref() {
        Some(s) if is_white(s) => el.set_attr("stroke", token),
        Some(s) if is_transparent(s) => {}
        Some(_) => el.set_attr("stroke", WHITE),
        None if is_outline => el.set_attr("stroke", WHITE),
        None => {}
    }
}
