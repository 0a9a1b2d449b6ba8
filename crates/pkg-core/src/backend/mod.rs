//! Build backends: one implementation per underlying toolchain.
//!
//! Every backend is bound to a project root and exposes the same seven
//! lifecycle operations. Each returns `Ok(exit_code)` for every outcome the
//! toolchain can report; `Err` is reserved for environment failures such as a
//! toolchain binary missing from `PATH`.
//!
//! Shared rules:
//! - `build` runs `test` first and stops on its exit code (the `go` backend
//!   runs `go vet` before that).
//! - Scaffolding written by `init`/`uplift` is only created when absent.
//! - `clean` removes the current matches of a fixed pattern set and succeeds
//!   when nothing matches.
//! - `uplift` never re-runs the toolchain's own project bootstrap.

pub mod bash;
pub mod bun;
pub mod go;
pub mod uv;

pub use bash::BashBackend;
pub use bun::BunBackend;
pub use go::GoBackend;
pub use uv::UvBackend;

use crate::error::{PkgError, Result};
use crate::io;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub trait BuildBackend {
    fn name(&self) -> &'static str;

    fn root(&self) -> &Path;

    /// Bootstrap a new project. `name` may be empty, in which case backends
    /// that need one fall back to the root directory name.
    fn init(&self, name: &str) -> Result<i32>;

    fn build(&self) -> Result<i32>;

    fn test(&self) -> Result<i32>;

    fn install(&self) -> Result<i32>;

    /// Run a script or target through the toolchain, forwarding `args` as-is.
    fn run(&self, target: &str, args: &[String]) -> Result<i32>;

    fn clean(&self) -> Result<i32>;

    /// Bring an existing project up to date with the idempotent part of `init`.
    fn uplift(&self) -> Result<i32>;
}

// ---------------------------------------------------------------------------
// BackendKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Uv,
    Bun,
    Go,
    Bash,
}

impl BackendKind {
    pub fn all() -> &'static [BackendKind] {
        &[
            BackendKind::Uv,
            BackendKind::Bun,
            BackendKind::Go,
            BackendKind::Bash,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Uv => "uv",
            BackendKind::Bun => "bun",
            BackendKind::Go => "go",
            BackendKind::Bash => "bash",
        }
    }

    /// Comma-separated list of every backend name, for error messages.
    pub fn available() -> String {
        Self::all()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Construct the backend bound to `root`, spawning real toolchains.
    pub fn create(self, root: &Path) -> Box<dyn BuildBackend> {
        match self {
            BackendKind::Uv => Box::new(UvBackend::new(root)),
            BackendKind::Bun => Box::new(BunBackend::new(root)),
            BackendKind::Go => Box::new(GoBackend::new(root)),
            BackendKind::Bash => Box::new(BashBackend::new(root)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = PkgError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PkgError::UnknownBackend {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

/// Resolve a configured backend name and bind it to `root`.
pub fn resolve(name: &str, root: &Path) -> Result<Box<dyn BuildBackend>> {
    Ok(name.parse::<BackendKind>()?.create(root))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Write `root/rel` with `content` if absent, reporting what was created.
pub(crate) fn scaffold_file(root: &Path, rel: &str, content: &str) -> Result<bool> {
    let created = io::write_if_missing(&root.join(rel), content.as_bytes())?;
    if created {
        println!("Created {rel}");
    }
    Ok(created)
}

/// Remove every existing match of `patterns` directly under `root`.
///
/// Literal patterns name one path; patterns containing `*` are matched
/// against the file names of `root`'s entries. Returns the removed paths,
/// relative to `root`, in pattern order.
pub(crate) fn clean_patterns(root: &Path, patterns: &[&str]) -> Result<Vec<String>> {
    let mut cleaned = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            let matcher = glob::Pattern::new(pattern)?;
            let mut matches: Vec<PathBuf> = std::fs::read_dir(root)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| {
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| matcher.matches(n))
                })
                .collect();
            matches.sort();
            for path in matches {
                io::remove_path(&path)?;
                cleaned.push(relative_display(root, &path));
            }
        } else {
            let path = root.join(pattern);
            if path.symlink_metadata().is_ok() {
                io::remove_path(&path)?;
                cleaned.push(pattern.to_string());
            }
        }
    }
    Ok(cleaned)
}

pub(crate) fn report_cleaned(cleaned: &[String]) {
    if cleaned.is_empty() {
        println!("Nothing to clean");
    } else {
        println!("Cleaned: {}", cleaned.join(", "));
    }
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Command-line arguments for `run`: the target followed by forwarded args.
pub(crate) fn with_forwarded(prefix: &[&str], target: &str, args: &[String]) -> Vec<String> {
    let mut argv: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
    argv.push(target.to_string());
    argv.extend(args.iter().cloned());
    argv
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
