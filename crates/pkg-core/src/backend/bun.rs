use super::{clean_patterns, report_cleaned, scaffold_file, with_forwarded, BuildBackend};
use crate::error::Result;
use crate::io;
use crate::paths::{GITIGNORE_FILE, PACKAGE_JSON_FILE};
use crate::runner::{argv, CommandRunner, SystemRunner};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const CLEAN: &[&str] = &[
    "node_modules",
    "dist",
    ".turbo",
    "coverage",
    ".next",
    ".nuxt",
    ".output",
    "build",
];

const GITIGNORE: &str = "\
node_modules/
dist/
.turbo/
coverage/
.next/
.nuxt/
.output/
build/
*.log
.env
.env.*
.DS_Store
";

const TYPES_PACKAGE: &str = "@types/bun";
const TEST_SCRIPT: &str = "bun test --coverage";
const BUILD_SCRIPT: &str = "bun build ./index.ts --outdir ./dist";

/// JavaScript/TypeScript projects managed by `bun`.
pub struct BunBackend {
    root: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl BunBackend {
    pub fn new(root: &Path) -> Self {
        Self::with_runner(root, SystemRunner)
    }

    pub fn with_runner(root: &Path, runner: impl CommandRunner + 'static) -> Self {
        Self {
            root: root.to_path_buf(),
            runner: Box::new(runner),
        }
    }

    fn bun(&self, args: Vec<String>) -> Result<i32> {
        self.runner.run("bun", &args, &self.root)
    }

    /// Add the bun type definitions and default `test`/`build` scripts to an
    /// existing `package.json`. A manifest already depending on the types is
    /// left untouched.
    fn add_dev_dependencies(&self) -> Result<()> {
        let path = self.root.join(PACKAGE_JSON_FILE);
        if !path.exists() {
            return Ok(());
        }
        let mut doc: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let Some(manifest) = doc.as_object_mut() else {
            tracing::warn!(path = %path.display(), "package.json is not an object; skipping");
            return Ok(());
        };

        let typed = manifest
            .get("devDependencies")
            .and_then(|dev| dev.get(TYPES_PACKAGE))
            .is_some();
        if typed {
            return Ok(());
        }

        update_object(manifest, "devDependencies", |dev| {
            dev.insert(TYPES_PACKAGE.to_string(), Value::from("latest"));
        });
        update_object(manifest, "scripts", |scripts| {
            scripts
                .entry("test")
                .or_insert_with(|| Value::from(TEST_SCRIPT));
            scripts
                .entry("build")
                .or_insert_with(|| Value::from(BUILD_SCRIPT));
        });

        let mut rendered = serde_json::to_string_pretty(&doc)?;
        rendered.push('\n');
        io::atomic_write(&path, rendered.as_bytes())?;
        println!("Added dev dependencies and scripts");
        Ok(())
    }

    fn scaffold(&self) -> Result<()> {
        self.add_dev_dependencies()?;
        scaffold_file(&self.root, GITIGNORE_FILE, GITIGNORE)?;
        Ok(())
    }
}

/// Edit the object stored under `key`, starting from an empty one when the
/// key is missing or holds something else.
fn update_object(
    manifest: &mut Map<String, Value>,
    key: &str,
    edit: impl FnOnce(&mut Map<String, Value>),
) {
    let slot = manifest.entry(key.to_string()).or_insert(Value::Null);
    let mut object = match std::mem::take(slot) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    edit(&mut object);
    *slot = Value::Object(object);
}

impl BuildBackend for BunBackend {
    fn name(&self) -> &'static str {
        "bun"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn init(&self, _name: &str) -> Result<i32> {
        let code = self.bun(argv(&["init", "-y"]))?;
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
        self.bun(argv(&["run", "build"]))
    }

    fn test(&self) -> Result<i32> {
        self.bun(argv(&["test", "--coverage"]))
    }

    fn install(&self) -> Result<i32> {
        self.bun(argv(&["install"]))
    }

    fn run(&self, target: &str, args: &[String]) -> Result<i32> {
        self.bun(with_forwarded(&["run"], target, args))
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
