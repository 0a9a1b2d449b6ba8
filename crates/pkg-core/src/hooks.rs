//! Pre/post shell hooks configured per lifecycle command in `pkg.toml`.
//!
//! Each hook runs through `sh -c` in the project root, inheriting the parent
//! environment plus three variables describing the invocation:
//!
//! | Variable          | Value                         |
//! |-------------------|-------------------------------|
//! | `PKG_COMMAND`     | lifecycle command, e.g. build |
//! | `PKG_PHASE`       | `pre` or `post`               |
//! | `PKG_PROJECT_DIR` | absolute project root         |
//!
//! Hooks run sequentially; the first one that exits nonzero (or cannot be
//! spawned) stops the list.

use crate::config::HookSet;
use crate::types::HookPhase;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

pub const ENV_COMMAND: &str = "PKG_COMMAND";
pub const ENV_PHASE: &str = "PKG_PHASE";
pub const ENV_PROJECT_DIR: &str = "PKG_PROJECT_DIR";

/// Variables layered over the inherited environment of every hook process.
pub fn hook_env(phase: HookPhase, command: &str, root: &Path) -> Vec<(&'static str, OsString)> {
    vec![
        (ENV_COMMAND, OsString::from(command)),
        (ENV_PHASE, OsString::from(phase.as_str())),
        (ENV_PROJECT_DIR, root.as_os_str().to_os_string()),
    ]
}

/// Run `hooks` in order. Returns false at the first failing hook; hooks after
/// it are not started. An empty list succeeds without spawning anything.
pub fn run_hooks(hooks: &[String], phase: HookPhase, command: &str, root: &Path) -> bool {
    if hooks.is_empty() {
        return true;
    }

    let env = hook_env(phase, command, root);
    for hook in hooks {
        println!("Running {phase} hook: {hook}");
        tracing::info!(%phase, command, hook = %hook, "running hook");

        let status = Command::new("sh")
            .arg("-c")
            .arg(hook)
            .current_dir(root)
            .envs(env.iter().cloned())
            .status();

        let passed = match status {
            Ok(s) => s.success(),
            Err(e) => {
                tracing::warn!(hook = %hook, error = %e, "failed to spawn hook");
                false
            }
        };

        if !passed {
            eprintln!("Hook failed: {hook}");
            return false;
        }
    }

    true
}

pub fn run_pre_hooks(hooks: &HookSet, command: &str, root: &Path) -> bool {
    run_hooks(&hooks.pre, HookPhase::Pre, command, root)
}

pub fn run_post_hooks(hooks: &HookSet, command: &str, root: &Path) -> bool {
    run_hooks(&hooks.post, HookPhase::Post, command, root)
}
