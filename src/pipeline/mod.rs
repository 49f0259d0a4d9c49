//! Batch pipeline: scan → extract → catalog → write.
//!
//! ```text
//! input/                         output/
//! ├── arrows/up.svg     ──┐      ├── svg-data.json
//! ├── brands/x.svg        ├──▶   ├── icons.json
//! └── loose.svg         ──┘      ├── categories.json
//!                                └── fonts/{glyphs/*.svg, <name>.json}
//! ```
//!
//! Extraction is per file and independent, so it can run on rayon. Catalog
//! assembly is always sequential in scan order.

pub mod catalog;
pub mod font;
pub mod scan;
pub mod write;

pub use catalog::IconCatalog;
pub use scan::{IconSource, scan_icons};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{debug, log};
use crate::logger::ProgressLine;
use crate::svg::{ExtractOptions, ExtractedIcon, extract_svg_data};

/// Progress counter name used by [`extract_all`].
pub const PROGRESS_COUNTER: &str = "icons";

/// Read and normalize one source file.
pub fn extract_one(source: &IconSource, options: &ExtractOptions) -> Result<ExtractedIcon> {
    let markup = scan::read_source(source)?;
    extract_svg_data(&markup, &source.filename, &source.category, options)
        .with_context(|| format!("failed to process {}", source.relative_path.display()))
}

/// Extract every source, preserving input order in the result.
pub fn extract_all(
    sources: &[IconSource],
    options: &ExtractOptions,
    parallel: bool,
    progress: Option<&ProgressLine>,
) -> Vec<Result<ExtractedIcon>> {
    let run = |source: &IconSource| {
        let result = extract_one(source, options);
        if let Some(p) = progress {
            p.inc(PROGRESS_COUNTER);
        }
        result
    };

    if parallel {
        sources.par_iter().map(run).collect()
    } else {
        sources.iter().map(run).collect()
    }
}

/// Result of folding extraction results into a catalog.
#[derive(Debug, Default)]
pub struct CatalogSummary {
    pub catalog: IconCatalog,
    pub failed: usize,
    pub replaced: usize,
}

/// Insert results in order. Failures are logged and counted; a repeated
/// icon name replaces the earlier record and is logged as a warning.
pub fn build_catalog(sources: &[IconSource], results: Vec<Result<ExtractedIcon>>) -> CatalogSummary {
    let mut summary = CatalogSummary::default();

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(icon) => {
                let name = icon.name.clone();
                debug!(
                    "build";
                    "processed: {} → {}{}",
                    source.relative_path.display(),
                    name,
                    if icon.record.is_complex { " (complex)" } else { "" }
                );
                if summary
                    .catalog
                    .insert(icon.name, &source.category, icon.record)
                    .is_some()
                {
                    summary.replaced += 1;
                    log!("warning"; "`{}` defined again by {}, keeping the later one", name, source.relative_path.display());
                }
            }
            Err(err) => {
                summary.failed += 1;
                log!("error"; "{:#}", err);
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, Vec<IconSource>) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/star.svg"), r#"<svg><path d="M1 1h2"/></svg>"#).unwrap();
        fs::write(root.join("a/broken.svg"), "<svg><g></svg>").unwrap();
        fs::write(root.join("b/star.svg"), r#"<svg><path d="M3 3h2"/></svg>"#).unwrap();
        fs::write(root.join("b/moon.svg"), r#"<svg><circle r="4"/></svg>"#).unwrap();
        let sources = scan_icons(root).unwrap();
        (dir, sources)
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let (_dir, sources) = fixture();
        let options = ExtractOptions::default();

        let collect = |parallel| {
            extract_all(&sources, &options, parallel, None)
                .into_iter()
                .map(|r| r.map(|icon| (icon.name, icon.record)).ok())
                .collect::<Vec<_>>()
        };
        assert_eq!(collect(false), collect(true));
    }

    #[test]
    fn test_failures_skipped_and_last_wins() {
        let (_dir, sources) = fixture();
        let results = extract_all(&sources, &ExtractOptions::default(), false, None);
        let summary = build_catalog(&sources, results);

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.replaced, 1);
        assert_eq!(summary.catalog.len(), 2);

        // a/star.svg is scanned before b/star.svg
        let star = summary.catalog.get("star-svg").unwrap();
        assert_eq!(star.path(), Some("M3 3h2"));
        assert_eq!(star.category, "b");

        let index = summary.catalog.categories();
        assert_eq!(index.get("b").unwrap(), ["star-svg", "moon-svg"]);
        assert_eq!(index.get("a"), None);
    }

    #[test]
    fn test_progress_counts_every_file() {
        let (_dir, sources) = fixture();
        let progress = ProgressLine::new("build", &[(PROGRESS_COUNTER, sources.len())]);
        let _ = extract_all(&sources, &ExtractOptions::default(), true, Some(&progress));
        progress.finish();
    }
}
