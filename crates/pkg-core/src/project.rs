use crate::paths::PROJECT_MARKERS;
use std::path::{Path, PathBuf};

/// Find the project root for `start`.
///
/// Walks upward from `start` (inclusive) and returns the first directory that
/// contains `pkg.toml` or `pyproject.toml`. When no ancestor has a marker the
/// search falls back to `start` itself, so callers always get a usable root.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut dir = start.to_path_buf();
    loop {
        if PROJECT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_pkg_toml_in_ancestor() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "").unwrap();
        let subdir = dir.path().join("src/pkg");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_project_root(&subdir), dir.path());
    }

    #[test]
    fn finds_pyproject_as_fallback_marker() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "").unwrap();
        let subdir = dir.path().join("src");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_project_root(&subdir), dir.path());
    }

    #[test]
    fn nearest_marker_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "").unwrap();
        let inner = dir.path().join("packages/web");
        std::fs::create_dir_all(inner.join("src")).unwrap();
        std::fs::write(inner.join("pyproject.toml"), "").unwrap();

        assert_eq!(find_project_root(&inner.join("src")), inner);
    }

    #[test]
    fn start_is_checked_itself() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "").unwrap();
        assert_eq!(find_project_root(dir.path()), dir.path());
    }

    #[test]
    fn falls_back_to_start_without_marker() {
        let dir = TempDir::new().unwrap();
        let subdir = dir.path().join("empty");
        std::fs::create_dir_all(&subdir).unwrap();

        // An ancestor of the temp dir could carry a marker on a dev machine;
        // only assert the fallback when none does.
        let found = find_project_root(&subdir);
        if !subdir.ancestors().any(|a| PROJECT_MARKERS.iter().any(|m| a.join(m).exists())) {
            assert_eq!(found, subdir);
        }
    }
}
