//! Icon set building orchestration.
//!
//! Build phases:
//! - **Scan** - Collect `.svg` files under the input directory
//! - **Extract** - Normalize every file (optionally in parallel)
//! - **Catalog** - Fold results in scan order, last name wins
//! - **Write** - `svg-data.json`, `icons.json`, `categories.json`
//! - **Font** - Glyph SVGs, codepoint map and the optional compiler

use crate::{
    config::IconConfig,
    log,
    logger::ProgressLine,
    pipeline::{self, PROGRESS_COUNTER, font, write},
    utils::plural_count,
};
use anyhow::{Result, bail};
use std::path::PathBuf;

/// Counts reported after a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub scanned: usize,
    pub icons: usize,
    pub complex: usize,
    pub failed: usize,
    pub replaced: usize,
    pub categories: usize,
    pub glyphs: usize,
    pub written: Vec<PathBuf>,
}

/// Build the catalogs (and font sources) described by `config`.
pub fn build_icons(config: &IconConfig) -> Result<BuildSummary> {
    let sources = pipeline::scan_icons(&config.build.input)?;
    if sources.is_empty() {
        bail!("no .svg files found in {}", config.build.input.display());
    }
    log!("scan"; "found {} in {}", plural_count(sources.len(), "icon"), config.root_relative(&config.build.input).display());

    let options = config.svg.extract_options();
    let progress = ProgressLine::new("build", &[(PROGRESS_COUNTER, sources.len())]);
    let results = pipeline::extract_all(&sources, &options, config.build.parallel, Some(&progress));
    progress.finish();

    let pipeline::CatalogSummary { catalog, failed, replaced } = pipeline::build_catalog(&sources, results);
    if catalog.is_empty() {
        bail!("none of the {} could be processed", plural_count(sources.len(), "icon"));
    }
    let mut written = write::write_catalogs(&catalog, &config.build.output, config.build.pretty)?;

    let mut glyphs = 0;
    if config.font.enable {
        let fonts = font::build_font_sources(
            &catalog,
            &config.font,
            &config.fonts_dir(),
            config.get_root(),
            config.build.pretty,
        )?;
        glyphs = fonts.glyphs;
        written.push(fonts.map_path);
    }

    let summary = BuildSummary {
        scanned: sources.len(),
        icons: catalog.len(),
        complex: catalog.complex_count(),
        failed,
        replaced,
        categories: catalog.categories().len(),
        glyphs,
        written,
    };
    log_summary(config, &summary);
    Ok(summary)
}

fn log_summary(config: &IconConfig, summary: &BuildSummary) {
    log!(
        "build";
        "{} ({} simple, {} complex) in {}",
        plural_count(summary.icons, "icon"),
        summary.icons - summary.complex,
        summary.complex,
        plural_count(summary.categories, "category group"),
    );
    if summary.failed > 0 {
        log!("warning"; "{} could not be processed", plural_count(summary.failed, "file"));
    }
    if summary.glyphs > 0 {
        log!("font"; "{} ready in {}", plural_count(summary.glyphs, "glyph"), config.root_relative(config.fonts_dir()).display());
    }
    for path in &summary.written {
        crate::debug!("build"; "wrote {}", config.root_relative(path).display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    fn project(font: bool) -> (tempfile::TempDir, IconConfig) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("icons/arrows")).unwrap();
        fs::write(
            root.join("icons/arrows/up.svg"),
            r#"<svg width="24" height="24" viewBox="0 0 24 24"><path d="M12 4l8 8H4z"/></svg>"#,
        )
        .unwrap();
        fs::write(
            root.join("icons/logo.svg"),
            r##"<svg viewBox="0 0 48 48"><path d="M0 0h48v48H0z" fill="#fff"/><circle cx="24" cy="24" r="8" fill="red"/><circle cx="10" cy="10" r="2" fill="blue"/></svg>"##,
        )
        .unwrap();
        fs::write(root.join("icons/broken.svg"), "<svg><g></svg>").unwrap();

        let mut config = test_parse_config(&format!("[font]\nenable = {font}\n"));
        config.normalize_paths(root);
        (dir, config)
    }

    #[test]
    fn test_build_writes_catalogs() {
        let (dir, config) = project(false);
        let summary = build_icons(&config).unwrap();

        assert_eq!(summary.scanned, 3);
        assert_eq!(summary.icons, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.complex, 1);
        assert_eq!(summary.categories, 1);
        assert_eq!(summary.glyphs, 0);

        let dist = dir.path().join("dist");
        let icons: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dist.join("icons.json")).unwrap()).unwrap();
        assert!(icons["up-svg"]["path"].is_string());
        assert_eq!(icons["up-svg"]["category"], "arrows");
        assert_eq!(icons["logo-svg"]["isComplex"], true);
        assert_eq!(icons["logo-svg"]["category"], "misc");

        let categories: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dist.join("categories.json")).unwrap()).unwrap();
        assert_eq!(categories["arrows"], serde_json::json!(["up-svg"]));
        assert!(dist.join("svg-data.json").is_file());
        assert!(!dist.join("fonts").exists());
    }

    #[test]
    fn test_build_fails_without_icons() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        let mut config = test_parse_config("");
        config.normalize_paths(dir.path());
        assert!(build_icons(&config).is_err());

        fs::write(dir.path().join("icons/bad.svg"), "<html/>").unwrap();
        let err = build_icons(&config).unwrap_err();
        assert!(err.to_string().contains("none of the 1 icon"));
    }

    #[test]
    fn test_build_font_sources() {
        let (dir, config) = project(true);
        let summary = build_icons(&config).unwrap();
        assert_eq!(summary.glyphs, 2);

        let fonts = dir.path().join("dist/fonts");
        assert!(fonts.join("glyphs/up.svg").is_file());
        assert!(fonts.join("glyphs/logo.svg").is_file());
        assert!(fonts.join("icons.json").is_file());
    }

    #[test]
    fn test_build_output_is_deterministic() {
        let (dir, mut config) = project(false);
        build_icons(&config).unwrap();
        let first = fs::read_to_string(dir.path().join("dist/svg-data.json")).unwrap();

        config.build.parallel = true;
        build_icons(&config).unwrap();
        let second = fs::read_to_string(dir.path().join("dist/svg-data.json")).unwrap();
        assert_eq!(first, second);
    }
}
