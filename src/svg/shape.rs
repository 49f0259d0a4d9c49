//! Basic shapes to path data, and flattening of simple icons.

use super::dimension::format_number as n;
use super::dom::Element;

/// Elements that carry no geometry and are ignored when flattening.
const NON_RENDERING: &[&str] = &["title", "desc", "metadata"];

fn number(el: &Element, key: &str) -> f64 {
    el.attr(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Path data equivalent of a basic shape. `None` for elements without a
/// path form (including `<line>`) and for unusable point lists.
pub fn shape_to_path(el: &Element) -> Option<String> {
    match el.local_name() {
        "circle" => {
            let (cx, cy, r) = (number(el, "cx"), number(el, "cy"), number(el, "r"));
            Some(arc_path(cx, cy, r, r))
        }
        "ellipse" => {
            let (cx, cy) = (number(el, "cx"), number(el, "cy"));
            Some(arc_path(cx, cy, number(el, "rx"), number(el, "ry")))
        }
        "rect" => {
            let (x, y) = (number(el, "x"), number(el, "y"));
            let (w, h) = (number(el, "width"), number(el, "height"));
            Some(format!(
                "M {} {} L {} {} L {} {} L {} {} Z",
                n(x),
                n(y),
                n(x + w),
                n(y),
                n(x + w),
                n(y + h),
                n(x),
                n(y + h)
            ))
        }
        "polygon" => points_path(el.attr("points")?, true),
        "polyline" => points_path(el.attr("points")?, false),
        _ => None,
    }
}

fn arc_path(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    format!(
        "M {} {} A {} {} 0 1 0 {} {} A {} {} 0 1 0 {} {}",
        n(cx - rx),
        n(cy),
        n(rx),
        n(ry),
        n(cx + rx),
        n(cy),
        n(rx),
        n(ry),
        n(cx - rx),
        n(cy)
    )
}

fn points_path(points: &str, closed: bool) -> Option<String> {
    let coords: Vec<f64> = points
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    // an unpaired trailing coordinate cannot be drawn faithfully
    if coords.len() < 4 || coords.len() % 2 != 0 {
        return None;
    }

    let mut pairs = coords.chunks_exact(2);
    let first = pairs.next()?;
    let mut path = format!("M {} {}", n(first[0]), n(first[1]));
    for pair in pairs {
        path.push_str(&format!(" L {} {}", n(pair[0]), n(pair[1])));
    }
    if closed {
        path.push_str(" Z");
    }
    Some(path)
}

/// Collect the path data of a simple icon in document order, descending
/// into plain groups.
///
/// Returns `None` when the icon contains something that cannot be expressed
/// as path data; the caller then publishes it as complex markup.
pub fn flatten_paths(svg: &Element) -> Option<Vec<String>> {
    let mut paths = Vec::new();
    collect_paths(svg, &mut paths)?;
    (!paths.is_empty()).then_some(paths)
}

fn collect_paths(parent: &Element, out: &mut Vec<String>) -> Option<()> {
    for el in parent.elements() {
        match el.local_name() {
            "path" => {
                if let Some(d) = el.attr("d").map(str::trim).filter(|d| !d.is_empty()) {
                    out.push(d.to_owned());
                }
            }
            "circle" | "ellipse" | "rect" | "polygon" | "polyline" => out.push(shape_to_path(el)?),
            "g" => collect_paths(el, out)?,
            "line" => {}
            name if NON_RENDERING.contains(&name) => {}
            _ => return None,
        }
    }
    Some(())
}
