//! Canonical 24×24 coordinate space.
//!
//! Every icon is published with `viewBox="0 0 24 24"`. Sources drawn in a
//! different box get a uniform scale plus a centering translation.

use std::fmt;

use super::dom::Element;

pub const CANONICAL_SIZE: f64 = 24.0;
pub const CANONICAL_VIEWBOX: &str = "0 0 24 24";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub const CANONICAL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: CANONICAL_SIZE,
        height: CANONICAL_SIZE,
    };

    /// Parse `"x y w h"` (whitespace and/or comma separated). Requires four
    /// numbers and a positive width and height.
    pub fn parse(value: &str) -> Option<Self> {
        let numbers: Vec<f64> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>().ok())
            .collect::<Option<_>>()?;

        let [x, y, width, height] = numbers.as_slice() else {
            return None;
        };
        let vb = Self {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        };
        (vb.is_finite() && vb.width > 0.0 && vb.height > 0.0).then_some(vb)
    }

    fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|n| n.is_finite())
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_number(self.x),
            format_number(self.y),
            format_number(self.width),
            format_number(self.height)
        )
    }
}

/// Size information derived from the source `<svg>` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    /// Coordinate system the source was drawn in.
    pub source: ViewBox,
    pub original_width: f64,
    pub original_height: f64,
    /// `translate(tx, ty) scale(s)` mapping `source` onto the canonical box,
    /// absent when the mapping is the identity.
    pub scale_transform: Option<String>,
}

impl Dimensions {
    pub fn needs_scaling(&self) -> bool {
        self.scale_transform.is_some()
    }
}

/// Compute dimensions for an `<svg>` element. Never fails: unusable values
/// fall back to 24.
pub fn normalize(svg: &Element) -> Dimensions {
    let width = svg.attr("width").and_then(parse_length);
    let height = svg.attr("height").and_then(parse_length);

    let source = svg
        .attr("viewBox")
        .and_then(ViewBox::parse)
        .unwrap_or(ViewBox {
            x: 0.0,
            y: 0.0,
            width: width.unwrap_or(CANONICAL_SIZE),
            height: height.unwrap_or(CANONICAL_SIZE),
        });

    Dimensions {
        source,
        original_width: width.unwrap_or(source.width),
        original_height: height.unwrap_or(source.height),
        scale_transform: scale_transform(&source),
    }
}

fn scale_transform(source: &ViewBox) -> Option<String> {
    if *source == ViewBox::CANONICAL {
        return None;
    }
    let scale = (CANONICAL_SIZE / source.width).min(CANONICAL_SIZE / source.height);
    let tx = (CANONICAL_SIZE - source.width * scale) / 2.0 - source.x * scale;
    let ty = (CANONICAL_SIZE - source.height * scale) / 2.0 - source.y * scale;
    Some(format!(
        "translate({}, {}) scale({})",
        format_number(tx),
        format_number(ty),
        format_number(scale)
    ))
}

/// Leading-number parse of a length such as `"48px"`. Zero, negative and
/// non-numeric lengths are rejected.
pub fn parse_length(value: &str) -> Option<f64> {
    parse_leading_number(value).filter(|n| *n > 0.0)
}

/// Parse the longest numeric prefix of `value`, ignoring leading whitespace.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    // optional exponent
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits = bytes[exp_end..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exp_end + digits;
        }
    }
    value[..end].parse().ok()
}

/// Shortest decimal form of a coordinate: integers without a fraction and
/// no negative zero.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}
