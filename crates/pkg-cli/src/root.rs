use pkg_core::project::find_project_root;
use std::path::{Component, Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `PKG_ROOT` env var (passed in as `explicit`)
/// 2. Nearest ancestor of `cwd` holding `pkg.toml`, then `pyproject.toml`
/// 3. Fall back to `cwd`
///
/// The result is always absolute: a relative explicit root is taken
/// against `cwd`.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => absolute_from(&cwd, p),
        None => find_project_root(&cwd),
    }
}

/// Join `rel` onto `base`, dropping `.` components so `--root .` names the
/// directory itself.
fn absolute_from(base: &Path, rel: &Path) -> PathBuf {
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .fold(base.to_path_buf(), |acc, c| acc.join(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn explicit_root_is_not_searched() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "").unwrap();
        let subdir = dir.path().join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(resolve_root(Some(&subdir)), subdir);
    }

    #[test]
    fn relative_root_is_made_absolute() {
        let base = Path::new("/work/widget");
        assert_eq!(absolute_from(base, Path::new(".")), base);
        assert_eq!(absolute_from(base, Path::new("./sub")), base.join("sub"));
        assert_eq!(absolute_from(base, Path::new("sub/inner")), base.join("sub/inner"));
    }

    #[test]
    fn resolved_root_is_always_absolute() {
        assert!(resolve_root(Some(Path::new("."))).is_absolute());
        assert!(resolve_root(None).is_absolute());
    }
}
