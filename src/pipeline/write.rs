//! JSON catalog output.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::IconCatalog;

pub const SVG_DATA_FILE: &str = "svg-data.json";
pub const ICONS_FILE: &str = "icons.json";
pub const CATEGORIES_FILE: &str = "categories.json";

/// Serialize `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Write the icon mapping (twice, under both published names) and the
/// category index. Returns the written paths.
pub fn write_catalogs(catalog: &IconCatalog, output: &Path, pretty: bool) -> Result<Vec<PathBuf>> {
    let svg_data = output.join(SVG_DATA_FILE);
    let icons = output.join(ICONS_FILE);
    let categories = output.join(CATEGORIES_FILE);

    write_json(&svg_data, catalog, pretty)?;
    write_json(&icons, catalog, pretty)?;
    write_json(&categories, &catalog.categories(), pretty)?;

    Ok(vec![svg_data, icons, categories])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::{ExtractOptions, extract_svg_data};

    #[test]
    fn test_write_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("dist");

        let mut catalog = IconCatalog::new();
        let icon = extract_svg_data(
            r#"<svg><path d="M1 1L2 2"/></svg>"#,
            "up.svg",
            "arrows",
            &ExtractOptions::default(),
        )
        .unwrap();
        catalog.insert(icon.name, "arrows", icon.record);

        let written = write_catalogs(&catalog, &output, true).unwrap();
        assert_eq!(written.len(), 3);

        let data: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join(SVG_DATA_FILE)).unwrap()).unwrap();
        assert_eq!(data["up-svg"]["path"], "M1 1L2 2");
        assert_eq!(data["up-svg"]["viewBox"], "0 0 24 24");

        let icons = fs::read_to_string(output.join(ICONS_FILE)).unwrap();
        assert_eq!(icons, fs::read_to_string(output.join(SVG_DATA_FILE)).unwrap());
        assert!(icons.contains("\n  \"up-svg\""));

        let categories = fs::read_to_string(output.join(CATEGORIES_FILE)).unwrap();
        let categories: serde_json::Value = serde_json::from_str(&categories).unwrap();
        assert_eq!(categories["arrows"][0], "up-svg");
    }

    #[test]
    fn test_compact_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        write_json(&path, &[1, 2], false).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[1,2]");
    }
}
