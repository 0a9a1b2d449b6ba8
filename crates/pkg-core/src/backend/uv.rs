use super::{clean_patterns, report_cleaned, scaffold_file, with_forwarded, BuildBackend};
use crate::error::Result;
use crate::io;
use crate::paths::{GITIGNORE_FILE, PYPROJECT_FILE};
use crate::runner::{argv, CommandRunner, SystemRunner};
use std::path::{Path, PathBuf};

const CLEAN: &[&str] = &[
    ".venv",
    "dist",
    "*.egg-info",
    "__pycache__",
    ".pytest_cache",
    ".ruff_cache",
    ".mypy_cache",
    ".coverage",
    "htmlcov",
    "build",
];

const GITIGNORE: &str = "\
.venv/
dist/
*.egg-info/
__pycache__/
.pytest_cache/
.ruff_cache/
.mypy_cache/
.coverage
htmlcov/
build/

*.pyc
.env
.env.*
";

const DEV_GROUP_HEADER: &str = "[dependency-groups]";

const DEV_GROUP_BLOCK: &str = r#"
[dependency-groups]
dev = ["pytest>=8.0.0", "pytest-mock>=3.12.0", "pytest-cov>=4.1.0"]

[tool.pytest.ini_options]
addopts = "--cov=. --cov-report=term-missing --cov-report=html --cov-fail-under=90"
"#;

/// Python projects managed by `uv`.
pub struct UvBackend {
    root: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl UvBackend {
    pub fn new(root: &Path) -> Self {
        Self::with_runner(root, SystemRunner)
    }

    pub fn with_runner(root: &Path, runner: impl CommandRunner + 'static) -> Self {
        Self {
            root: root.to_path_buf(),
            runner: Box::new(runner),
        }
    }

    fn uv(&self, args: Vec<String>) -> Result<i32> {
        self.runner.run("uv", &args, &self.root)
    }

    /// Append the dev dependency group and pytest options to an existing
    /// `pyproject.toml` that has no dependency groups yet.
    fn add_dev_dependencies(&self) -> Result<()> {
        let path = self.root.join(PYPROJECT_FILE);
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.contains(DEV_GROUP_HEADER) {
            return Ok(());
        }
        io::atomic_write(&path, format!("{content}{DEV_GROUP_BLOCK}").as_bytes())?;
        println!("Added dev dependencies and pytest config");
        Ok(())
    }

    fn scaffold(&self) -> Result<()> {
        self.add_dev_dependencies()?;
        scaffold_file(&self.root, GITIGNORE_FILE, GITIGNORE)?;
        Ok(())
    }
}

impl BuildBackend for UvBackend {
    fn name(&self) -> &'static str {
        "uv"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn init(&self, _name: &str) -> Result<i32> {
        let code = self.uv(argv(&["init"]))?;
        if code != 0 {
            return Ok(code);
        }
        self.scaffold()?;
        Ok(0)
    }

    fn build(&self) -> Result<i32> {
        let code = self.test()?;
        if code != 0 {
            eprintln!("Build aborted: tests failed");
            return Ok(code);
        }
        self.uv(argv(&["build"]))
    }

    fn test(&self) -> Result<i32> {
        self.uv(argv(&["run", "pytest"]))
    }

    fn install(&self) -> Result<i32> {
        self.uv(argv(&["sync", "--group", "dev"]))
    }

    fn run(&self, target: &str, args: &[String]) -> Result<i32> {
        self.uv(with_forwarded(&["run"], target, args))
    }

    fn clean(&self) -> Result<i32> {
        report_cleaned(&clean_patterns(&self.root, CLEAN)?);
        Ok(0)
    }

    fn uplift(&self) -> Result<i32> {
        self.scaffold()?;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::{line, RecordingRunner};
    use tempfile::TempDir;

    fn backend(dir: &TempDir, runner: &RecordingRunner) -> UvBackend {
        UvBackend::with_runner(dir.path(), runner.clone())
    }

    #[test]
    fn build_runs_tests_first() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        assert_eq!(backend(&dir, &runner).build().unwrap(), 0);
        assert_eq!(
            runner.calls(),
            vec![line(&["uv", "run", "pytest"]), line(&["uv", "build"])]
        );
    }

    #[test]
    fn build_stops_on_failing_tests() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new().respond("uv run pytest", 5);
        assert_eq!(backend(&dir, &runner).build().unwrap(), 5);
        assert_eq!(runner.calls(), vec![line(&["uv", "run", "pytest"])]);
    }

    #[test]
    fn run_forwards_args_in_order() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        let args = vec!["-v".to_string(), "--x".to_string()];
        backend(&dir, &runner).run("app.py", &args).unwrap();
        assert_eq!(runner.calls(), vec![line(&["uv", "run", "app.py", "-v", "--x"])]);
        assert_eq!(runner.cwds(), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn install_syncs_dev_group() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        backend(&dir, &runner).install().unwrap();
        assert_eq!(runner.calls(), vec![line(&["uv", "sync", "--group", "dev"])]);
    }

    #[test]
    fn failed_init_skips_scaffolding() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new().respond("uv init", 2);
        assert_eq!(backend(&dir, &runner).init("demo").unwrap(), 2);
        assert!(!dir.path().join(".gitignore").exists());
    }

    #[test]
    fn init_adds_dev_group_and_gitignore() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\nname = \"demo\"\n").unwrap();
        let runner = RecordingRunner::new();

        assert_eq!(backend(&dir, &runner).init("demo").unwrap(), 0);
        let pyproject = std::fs::read_to_string(dir.path().join("pyproject.toml")).unwrap();
        assert!(pyproject.starts_with("[project]"));
        assert!(pyproject.contains("[dependency-groups]"));
        assert!(pyproject.contains("pytest-cov"));
        let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(gitignore.contains(".venv/"));
    }

    #[test]
    fn uplift_is_idempotent_and_spawns_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project]\n").unwrap();
        std::fs::write(dir.path().join(".gitignore"), "custom\n").unwrap();
        let runner = RecordingRunner::new();
        let uv = backend(&dir, &runner);

        assert_eq!(uv.uplift().unwrap(), 0);
        let first = std::fs::read_to_string(dir.path().join("pyproject.toml")).unwrap();
        assert_eq!(uv.uplift().unwrap(), 0);
        let second = std::fs::read_to_string(dir.path().join("pyproject.toml")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.matches("[dependency-groups]").count(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".gitignore")).unwrap(),
            "custom\n"
        );
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn uplift_without_pyproject_only_writes_gitignore() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        assert_eq!(backend(&dir, &runner).uplift().unwrap(), 0);
        assert!(!dir.path().join("pyproject.toml").exists());
        assert!(dir.path().join(".gitignore").exists());
    }

    #[test]
    fn clean_removes_python_artifacts() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".venv/bin")).unwrap();
        std::fs::create_dir_all(dir.path().join("demo.egg-info")).unwrap();
        std::fs::write(dir.path().join(".coverage"), "").unwrap();
        std::fs::write(dir.path().join("main.py"), "").unwrap();
        let runner = RecordingRunner::new();

        assert_eq!(backend(&dir, &runner).clean().unwrap(), 0);
        assert!(!dir.path().join(".venv").exists());
        assert!(!dir.path().join("demo.egg-info").exists());
        assert!(!dir.path().join(".coverage").exists());
        assert!(dir.path().join("main.py").exists());
    }

    #[test]
    fn clean_on_empty_project_is_noop() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::new();
        assert_eq!(backend(&dir, &runner).clean().unwrap(), 0);
    }
}
