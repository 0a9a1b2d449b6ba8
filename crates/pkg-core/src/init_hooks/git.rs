use super::InitStep;
use crate::error::{PkgError, Result};
use crate::paths::GIT_DIR;
use crate::runner::exit_code;
use std::path::Path;
use std::process::{Command, Stdio};

/// Initializes a git repository unless the project already has one.
pub struct GitStep;

impl InitStep for GitStep {
    fn name(&self) -> &str {
        "git"
    }

    fn enabled_by_default(&self) -> bool {
        true
    }

    fn run(&self, root: &Path, _name: &str) -> Result<i32> {
        if root.join(GIT_DIR).exists() {
            return Ok(0);
        }
        let git = which::which("git").map_err(|_| PkgError::ToolNotFound("git".into()))?;
        let output = Command::new(git)
            .arg("init")
            .current_dir(root)
            .stdin(Stdio::null())
            .output()?;
        if !output.status.success() {
            tracing::warn!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git init failed"
            );
        }
        Ok(exit_code(output.status))
    }
}
