//! Inline style promotion.
//!
//! Paint-related declarations in `style="..."` are moved to presentation
//! attributes so the recoloring passes only ever look at attributes. An
//! existing attribute wins over the style declaration; the declaration is
//! removed either way.

use super::dom::{self, Element};
use super::error::SvgError;

/// Properties moved out of inline styles.
pub const PROMOTED_PROPERTIES: [&str; 6] = [
    "fill",
    "stroke",
    "opacity",
    "fill-opacity",
    "stroke-opacity",
    "stroke-width",
];

/// Promote inline styles on `root` and every descendant.
pub fn promote_styles(mut root: Element) -> Element {
    promote_element(&mut root);
    root.map(&mut |mut el, _| {
        promote_element(&mut el);
        el
    })
}

/// Markup-level entry point: parse, promote, serialize.
pub fn normalize_styles(markup: &str) -> Result<String, SvgError> {
    let root = dom::parse(markup)?;
    Ok(promote_styles(root).to_markup())
}

fn promote_element(el: &mut Element) {
    let Some(style) = el.attr("style") else {
        return;
    };

    let mut promoted: Vec<(&'static str, String)> = Vec::new();
    let mut kept: Vec<String> = Vec::new();

    for declaration in style.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let Some((property, value)) = declaration.split_once(':') else {
            kept.push(declaration.to_owned());
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();

        match PROMOTED_PROPERTIES.iter().find(|p| **p == property) {
            Some(&name) if !value.is_empty() => {
                // later declarations override earlier ones
                match promoted.iter_mut().find(|(p, _)| *p == name) {
                    Some((_, v)) => *v = value.to_owned(),
                    None => promoted.push((name, value.to_owned())),
                }
            }
            _ => kept.push(declaration.to_owned()),
        }
    }

    for (name, value) in promoted {
        if !el.has_attr(name) {
            el.set_attr(name, value);
        }
    }

    if kept.is_empty() {
        el.remove_attr("style");
    } else {
        el.set_attr("style", kept.join(";"));
    }
}
