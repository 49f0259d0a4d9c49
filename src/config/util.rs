//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the config file by searching upward from the current directory.
///
/// ```text
/// /home/user/pack/icons/brands/  ← cwd
/// /home/user/pack/iconpack.toml  ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Upward search starting at `start`.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("icons/brands");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("iconpack.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("iconpack.toml")).unwrap();
        assert_eq!(found, dir.path().join("iconpack.toml"));
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_from(dir.path(), &path), None);
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_from(Path::new("/"), &path), Some(path));
    }

    #[test]
    fn test_directory_with_config_name_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("iconpack.toml")).unwrap();
        let start = dir.path().join("x");
        fs::create_dir(&start).unwrap();
        let found = find_config_from(&start, Path::new("iconpack.toml"));
        assert_ne!(found, Some(dir.path().join("iconpack.toml")));
    }
}
