use super::{clean_patterns, report_cleaned, scaffold_file, with_forwarded, BuildBackend};
use crate::error::Result;
use crate::paths::{self, GITIGNORE_FILE};
use crate::runner::{argv, CommandRunner, SystemRunner};
use std::path::{Path, PathBuf};

const CLEAN: &[&str] = &["bin", "dist", "vendor", "coverage.out", "*.test"];

const GITIGNORE: &str = "\
bin/
dist/
vendor/
coverage.out
*.test
*.exe
*.exe~
*.dll
*.so
*.dylib
.env
.env.*
.DS_Store
";

const MAIN_GO: &str = r#"package main

import "fmt"

func main() {
	fmt.Println("Hello, World!")
}
"#;

/// Go modules built with the `go` toolchain.
///
/// `build` is staged: `go vet` → tests → `go build`, each stage aborting the
/// rest on a nonzero exit.
pub struct GoBackend {
    root: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl GoBackend {
    pub fn new(root: &Path) -> Self {
        Self::with_runner(root, SystemRunner)
    }

    pub fn with_runner(root: &Path, runner: impl CommandRunner + 'static) -> Self {
        Self {
            root: root.to_path_buf(),
            runner: Box::new(runner),
        }
    }

    fn go(&self, args: Vec<String>) -> Result<i32> {
        self.runner.run("go", &args, &self.root)
    }

    fn vet(&self) -> Result<i32> {
        self.go(argv(&["vet", "./..."]))
    }
}

impl BuildBackend for GoBackend {
    fn name(&self) -> &'static str {
        "go"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn init(&self, name: &str) -> Result<i32> {
        let module = if name.is_empty() {
            paths::project_name(&self.root)
        } else {
            name.to_string()
        };
        let code = self.go(vec!["mod".into(), "init".into(), module])?;
        if code != 0 {
            return Ok(code);
        }
        scaffold_file(&self.root, "main.go", MAIN_GO)?;
        scaffold_file(&self.root, GITIGNORE_FILE, GITIGNORE)?;
        Ok(0)
    }

    fn build(&self) -> Result<i32> {
        let code = self.vet()?;
        if code != 0 {
            eprintln!("Build aborted: go vet failed");
            return Ok(code);
        }
        let code = self.test()?;
        if code != 0 {
            eprintln!("Build aborted: tests failed");
            return Ok(code);
        }
        self.go(argv(&["build", "./..."]))
    }

    fn test(&self) -> Result<i32> {
        self.go(argv(&["test", "-cover", "./..."]))
    }

    fn install(&self) -> Result<i32> {
        self.go(argv(&["mod", "tidy"]))
    }

    fn run(&self, target: &str, args: &[String]) -> Result<i32> {
        self.go(with_forwarded(&["run"], target, args))
    }

    fn clean(&self) -> Result<i32> {
        report_cleaned(&clean_patterns(&self.root, CLEAN)?);
        Ok(0)
    }

    fn uplift(&self) -> Result<i32> {
        scaffold_file(&self.root, GITIGNORE_FILE, GITIGNORE)?;
        Ok(0)
    }
}
