//! Configuration section definitions.
//!
//! Each module corresponds to a section in `iconpack.toml`:
//!
//! | Module  | TOML Section | Purpose                                |
//! |---------|--------------|----------------------------------------|
//! | `build` | `[build]`    | Input/output paths, parallelism, JSON  |
//! | `svg`   | `[svg]`      | Color token and recoloring exceptions  |
//! | `font`  | `[font]`     | Icon font source generation            |

mod build;
mod font;
mod svg;

pub use build::BuildConfig;
pub use font::{FontConfig, PUA_END, PUA_START};
pub use svg::SvgConfig;
