//! Icon source discovery.

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use crate::utils::path::to_slash;

const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// One `.svg` file under the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub absolute_path: PathBuf,
    /// Path relative to the input directory.
    pub relative_path: PathBuf,
    /// Parent directory relative to the input root, `/`-separated. Empty
    /// for files directly in the root.
    pub category: String,
    pub filename: String,
}

impl IconSource {
    fn new(root: &Path, absolute_path: PathBuf) -> Option<Self> {
        let relative_path = absolute_path.strip_prefix(root).ok()?.to_path_buf();
        let filename = relative_path.file_name()?.to_string_lossy().into_owned();
        let category = relative_path.parent().map(to_slash).unwrap_or_default();
        Some(Self {
            absolute_path,
            relative_path,
            category,
            filename,
        })
    }
}

/// Collect every `.svg` file below `dir`, sorted by relative path.
pub fn scan_icons(dir: &Path) -> Result<Vec<IconSource>> {
    if !dir.is_dir() {
        bail!("icon directory not found: {}", dir.display());
    }

    let mut sources: Vec<_> = WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name) && name.ends_with(".svg")
        })
        .filter_map(|e| IconSource::new(dir, e.path()))
        .collect();

    sources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(sources)
}

/// Read a source file as UTF-8.
pub fn read_source(source: &IconSource) -> Result<String> {
    std::fs::read_to_string(&source.absolute_path)
        .with_context(|| format!("failed to read {}", source.relative_path.display()))
}
