//! Process invocation for backend toolchains.
//!
//! Every backend spawns its toolchain (`uv`, `bun`, `go`, `bash`) through a
//! [`CommandRunner`]. The runner resolves the binary on `PATH` first: a
//! missing toolchain is an environment error ([`PkgError::ToolNotFound`]),
//! while a toolchain that runs and exits nonzero is an ordinary exit code.
//!
//! stdout/stderr are inherited so toolchain output streams to the terminal.

use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::{PkgError, Result};
use crate::types::EXIT_FAILURE;

pub trait CommandRunner {
    /// Run `program args...` in `cwd`, blocking until it exits.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<i32>;
}

/// Spawns real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<i32> {
        let resolved =
            which::which(program).map_err(|_| PkgError::ToolNotFound(program.to_string()))?;

        println!("> {}", display_command(program, args));
        tracing::info!(program, cwd = %cwd.display(), "spawning toolchain");

        let status = Command::new(resolved)
            .args(args)
            .current_dir(cwd)
            .status()?;
        Ok(exit_code(status))
    }
}

/// Map a child's status to an exit code. Signal termination has no code and
/// counts as a plain failure.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(EXIT_FAILURE)
}

pub fn display_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

/// Build an owned argument vector from literals.
pub fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
