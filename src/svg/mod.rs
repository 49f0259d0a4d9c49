//! SVG normalization.
//!
//! Turns arbitrary exported SVG files into [`IconRecord`]s drawn in a
//! 24×24 coordinate space, with design-tool artifacts removed and
//! theme-ready recolored variants.
//!
//! # Modules
//!
//! | Module       | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `dom`        | Owned element tree, parse and serialize        |
//! | `style`      | Inline style → presentation attribute          |
//! | `dimension`  | View box parsing and canonical rescaling       |
//! | `background` | Background rect and placeholder mask removal   |
//! | `classify`   | Simple/complex and outline detection           |
//! | `shape`      | Basic shapes to path data                      |
//! | `variant`    | Selective and invert recoloring                |
//! | `naming`     | Icon names and tags                            |
//! | `record`     | Per-file pipeline and output record            |

pub mod background;
pub mod classify;
pub mod color;
pub mod dimension;
pub mod dom;
mod error;
pub mod naming;
mod record;
pub mod shape;
pub mod style;
pub mod variant;

pub use record::{ExtractOptions, ExtractedIcon, IconBody, IconRecord, extract_svg_data};
