use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

/// Primary project marker, also the configuration document.
pub const CONFIG_FILE: &str = "pkg.toml";
/// Secondary project marker (Python ecosystem manifest).
pub const PYPROJECT_FILE: &str = "pyproject.toml";
pub const PACKAGE_JSON_FILE: &str = "package.json";

pub const GITIGNORE_FILE: &str = ".gitignore";
pub const AGENTS_MD: &str = "AGENTS.md";
pub const README_MD: &str = "README.md";
pub const GIT_DIR: &str = ".git";

/// Command log written by the `history` plugin.
pub const HISTORY_FILE: &str = ".pkg/history.jsonl";

pub const SRC_DIR: &str = "src";
pub const TESTS_DIR: &str = "tests";

/// Markers checked at each directory level, in priority order.
pub const PROJECT_MARKERS: [&str; 2] = [CONFIG_FILE, PYPROJECT_FILE];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn history_path(root: &Path) -> PathBuf {
    root.join(HISTORY_FILE)
}

/// Name used for the project when none is given explicitly: the root's final
/// path component.
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(config_path(root), PathBuf::from("/tmp/proj/pkg.toml"));
        assert_eq!(
            history_path(root),
            PathBuf::from("/tmp/proj/.pkg/history.jsonl")
        );
    }

    #[test]
    fn project_name_uses_last_component() {
        assert_eq!(project_name(Path::new("/work/my-app")), "my-app");
        assert_eq!(project_name(Path::new("/")), "project");
    }
}
