//! Icon font sources.
//!
//! Each icon gets a standalone glyph SVG and a Private Use Area codepoint.
//! The glyphs and the codepoint map are what font tools consume; turning
//! them into a binary font is left to the configured compiler command.

use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::IconCatalog;
use super::write::write_json;
use crate::config::{FontConfig, PUA_END};
use crate::svg::dimension::CANONICAL_VIEWBOX;
use crate::svg::{IconBody, IconRecord};
use crate::utils::exec::{Cmd, FilterRule};
use crate::{debug, log};

/// Suffix every icon name carries from its `.svg` extension.
const NAME_SUFFIX: &str = "-svg";

/// Package-runner chatter printed by `npx`-style compiler commands.
static COMPILER_FILTER: FilterRule = FilterRule::new(&["npm WARN", "npm notice", "npx: installed"]);

/// Codepoints past this leave the range most font tools expect.
const BMP_PUA_SOFT_LIMIT: u32 = 0xEFFF;

/// Glyph name with the extension suffix removed.
pub fn glyph_name(icon_name: &str) -> &str {
    icon_name.strip_suffix(NAME_SUFFIX).unwrap_or(icon_name)
}

/// Sorted glyph names paired with sequential codepoints.
pub fn assign_codepoints<'a>(
    names: impl IntoIterator<Item = &'a str>,
    start: u32,
) -> Vec<(String, u32)> {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    names
        .into_iter()
        .zip(start..)
        .map(|(name, codepoint)| (glyph_name(name).to_owned(), codepoint))
        .collect()
}

/// Standalone SVG document for one glyph, in the canonical view box.
pub fn glyph_svg(record: &IconRecord) -> String {
    let body = match &record.body {
        IconBody::Complex { content } => content.clone(),
        IconBody::Simple { path } => format!(r#"<path d="{path}" fill="currentColor"/>"#),
    };
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{CANONICAL_VIEWBOX}">{body}</svg>"#)
}

/// `{ fontName, prefix, icons: { name: "E000" } }`
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMap {
    pub font_name: String,
    pub prefix: String,
    pub icons: Vec<(String, u32)>,
}

struct Codepoints<'a>(&'a [(String, u32)]);

impl Serialize for Codepoints<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, codepoint) in self.0 {
            map.serialize_entry(name, &format!("{codepoint:X}"))?;
        }
        map.end()
    }
}

impl Serialize for GlyphMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GlyphMap", 3)?;
        state.serialize_field("fontName", &self.font_name)?;
        state.serialize_field("prefix", &self.prefix)?;
        state.serialize_field("icons", &Codepoints(&self.icons))?;
        state.end()
    }
}

/// What [`build_font_sources`] produced.
#[derive(Debug)]
pub struct FontSources {
    pub glyph_dir: PathBuf,
    pub map_path: PathBuf,
    pub glyphs: usize,
}

/// Write glyph SVGs and the codepoint map under `fonts_dir`, then run the
/// font compiler if one is configured.
pub fn build_font_sources(
    catalog: &IconCatalog,
    font: &FontConfig,
    fonts_dir: &Path,
    root: &Path,
    pretty: bool,
) -> Result<FontSources> {
    let glyph_dir = fonts_dir.join("glyphs");
    fs::create_dir_all(&glyph_dir)
        .with_context(|| format!("failed to create {}", glyph_dir.display()))?;

    let icons = assign_codepoints(catalog.iter().map(|(name, _)| name), font.start_codepoint);
    if let Some((name, last)) = icons.last()
        && *last > BMP_PUA_SOFT_LIMIT
    {
        log!("warning"; "codepoints run up to U+{last:04X} ({name}), past U+{BMP_PUA_SOFT_LIMIT:04X}");
    }
    if icons.last().is_some_and(|(_, last)| *last > PUA_END) {
        anyhow::bail!("too many glyphs for the Private Use Area starting at U+{:04X}", font.start_codepoint);
    }

    for (name, record) in catalog.iter() {
        let path = glyph_dir.join(format!("{}.svg", glyph_name(name)));
        fs::write(&path, glyph_svg(record))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let map = GlyphMap {
        font_name: font.name.clone(),
        prefix: font.prefix.clone(),
        icons,
    };
    let map_path = fonts_dir.join(format!("{}.json", font.name));
    write_json(&map_path, &map, pretty)?;
    debug!("font"; "wrote {} glyphs to {}", map.icons.len(), glyph_dir.display());

    if !font.compiler.is_empty() {
        let cmd = Cmd::from_slice(&font.compiler)
            .arg(&glyph_dir)
            .arg(fonts_dir)
            .arg(&font.name)
            .cwd(root)
            .filter(&COMPILER_FILTER);
        log!("font"; "running {}", cmd.display());
        cmd.run()?;
    }

    Ok(FontSources {
        glyph_dir,
        map_path,
        glyphs: map.icons.len(),
    })
}
