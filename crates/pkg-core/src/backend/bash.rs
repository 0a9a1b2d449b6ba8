//! Plain shell-script projects. There is no toolchain to delegate to, so
//! this backend does its own work:
//!
//! - `test` runs every `tests/*_test.sh` with `bash`, in name order, and
//!   fails if any of them failed.
//! - `build` installs `src/*.sh` into the user's `~/bin`, marked executable.
//! - `clean` removes those installed copies again.

use super::{scaffold_file, BuildBackend};
use crate::error::{PkgError, Result};
use crate::io;
use crate::paths::{GITIGNORE_FILE, SRC_DIR, TESTS_DIR};
use crate::runner::{CommandRunner, SystemRunner};
use crate::types::{EXIT_FAILURE, EXIT_MISSING_PREREQUISITE};
use std::path::{Path, PathBuf};

const GITIGNORE: &str = "\
*.log
.env
.env.*
.DS_Store
";

const HELLO_SCRIPT: &str = "#!/usr/bin/env bash
set -euo pipefail

echo 'Hello, World!'
";

const HELLO_TEST: &str = r#"#!/usr/bin/env bash
set -euo pipefail

output=$(bash "$(dirname "$0")/../src/hello.sh")

if [ "$output" != "Hello, World!" ]; then
  echo "FAIL: expected 'Hello, World!' but got '$output'"
  exit 1
fi

echo "PASS: hello"
"#;

const TEST_SUFFIX: &str = "_test.sh";

pub struct BashBackend {
    root: PathBuf,
    runner: Box<dyn CommandRunner>,
    /// Install directory; `None` means `~/bin`.
    bin_dir: Option<PathBuf>,
}

impl BashBackend {
    pub fn new(root: &Path) -> Self {
        Self::with_runner(root, SystemRunner)
    }

    pub fn with_runner(root: &Path, runner: impl CommandRunner + 'static) -> Self {
        Self {
            root: root.to_path_buf(),
            runner: Box::new(runner),
            bin_dir: None,
        }
    }

    /// Install scripts into `dir` instead of `~/bin`.
    pub fn with_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(dir.into());
        self
    }

    fn bin_dir(&self) -> Result<PathBuf> {
        match &self.bin_dir {
            Some(dir) => Ok(dir.clone()),
            None => home::home_dir()
                .map(|home| home.join("bin"))
                .ok_or(PkgError::HomeNotFound),
        }
    }

    fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    fn scaffold_dirs(&self) -> Result<()> {
        io::ensure_dir(&self.src_dir())?;
        io::ensure_dir(&self.root.join(TESTS_DIR))?;
        Ok(())
    }

    fn scaffold_executable(&self, rel: &str, content: &str) -> Result<()> {
        if scaffold_file(&self.root, rel, content)? {
            io::make_executable(&self.root.join(rel))?;
        }
        Ok(())
    }
}

/// Regular files in `dir` whose name satisfies `keep`, sorted by name.
/// A missing directory has no entries.
fn list_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(&keep)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn source_scripts(src: &Path) -> Result<Vec<PathBuf>> {
    list_files(src, |name| name.ends_with(".sh"))
}

impl BuildBackend for BashBackend {
    fn name(&self) -> &'static str {
        "bash"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn init(&self, _name: &str) -> Result<i32> {
        self.scaffold_dirs()?;
        self.scaffold_executable("src/hello.sh", HELLO_SCRIPT)?;
        self.scaffold_executable("tests/hello_test.sh", HELLO_TEST)?;
        scaffold_file(&self.root, GITIGNORE_FILE, GITIGNORE)?;
        Ok(0)
    }

    fn build(&self) -> Result<i32> {
        let code = self.test()?;
        if code != 0 {
            eprintln!("Build aborted: tests failed");
            return Ok(code);
        }

        let src = self.src_dir();
        if !src.is_dir() {
            eprintln!("No src directory found");
            return Ok(EXIT_MISSING_PREREQUISITE);
        }

        let scripts = source_scripts(&src)?;
        if scripts.is_empty() {
            println!("No scripts to install");
            return Ok(0);
        }

        let bin = self.bin_dir()?;
        io::ensure_dir(&bin)?;
        let mut installed = Vec::new();
        for script in &scripts {
            let name = file_name(script);
            let dest = bin.join(&name);
            std::fs::copy(script, &dest)?;
            io::make_executable(&dest)?;
            tracing::info!(script = %name, dest = %dest.display(), "installed script");
            installed.push(name);
        }
        println!("Installed to {}: {}", bin.display(), installed.join(", "));
        Ok(0)
    }

    fn test(&self) -> Result<i32> {
        let tests = list_files(&self.root.join(TESTS_DIR), |name| name.ends_with(TEST_SUFFIX))?;
        if tests.is_empty() {
            println!("No test files found");
            return Ok(0);
        }

        let mut passed = 0usize;
        let mut failed = Vec::new();
        for test in &tests {
            let arg = test.to_string_lossy().into_owned();
            if self.runner.run("bash", &[arg], &self.root)? == 0 {
                passed += 1;
            } else {
                failed.push(file_name(test));
            }
        }

        if passed > 0 {
            println!("{passed} passed");
        }
        if !failed.is_empty() {
            eprintln!("{} failed: {}", failed.len(), failed.join(", "));
            return Ok(EXIT_FAILURE);
        }
        Ok(0)
    }

    fn install(&self) -> Result<i32> {
        println!("No dependencies to install for bash projects");
        Ok(0)
    }

    fn run(&self, target: &str, args: &[String]) -> Result<i32> {
        let script = self.src_dir().join(target);
        if !script.is_file() {
            eprintln!("Script not found: {target}");
            return Ok(EXIT_FAILURE);
        }
        let mut argv = vec![script.to_string_lossy().into_owned()];
        argv.extend(args.iter().cloned());
        self.runner.run("bash", &argv, &self.root)
    }

    fn clean(&self) -> Result<i32> {
        let scripts = source_scripts(&self.src_dir())?;
        if scripts.is_empty() {
            println!("Nothing to clean");
            return Ok(0);
        }

        let bin = self.bin_dir()?;
        let mut removed = Vec::new();
        for script in &scripts {
            let name = file_name(script);
            let installed = bin.join(&name);
            if installed.is_file() {
                std::fs::remove_file(&installed)?;
                removed.push(name);
            }
        }

        if removed.is_empty() {
            println!("Nothing to clean");
        } else {
            println!("Removed from {}: {}", bin.display(), removed.join(", "));
        }
        Ok(0)
    }

    fn uplift(&self) -> Result<i32> {
        self.scaffold_dirs()?;
        scaffold_file(&self.root, GITIGNORE_FILE, GITIGNORE)?;
        Ok(0)
    }
}
