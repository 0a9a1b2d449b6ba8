//! Post-initialization steps run after a backend's own `init` succeeds.
//!
//! Steps run in registration order. A step runs only when it is enabled by
//! default and its name is not in the caller's disabled set; the first
//! nonzero exit code stops the remaining steps.

mod agent_md;
mod git;
mod readme;

pub use agent_md::AgentMdStep;
pub use git::GitStep;
pub use readme::ReadmeStep;

use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;

pub trait InitStep {
    fn name(&self) -> &str;

    fn enabled_by_default(&self) -> bool;

    /// Run the step for project `name` in `root`, returning its exit code.
    fn run(&self, root: &Path, name: &str) -> Result<i32>;
}

#[derive(Default)]
pub struct InitHookRegistry {
    steps: Vec<Box<dyn InitStep>>,
}

impl InitHookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped steps: `git`, `agent-md`, then the opt-in `readme`.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(GitStep);
        registry.register(AgentMdStep);
        registry.register(ReadmeStep);
        registry
    }

    pub fn register(&mut self, step: impl InitStep + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn run_all(&self, root: &Path, name: &str, disabled: &HashSet<String>) -> Result<i32> {
        for step in &self.steps {
            let step_name = step.name();
            if disabled.contains(step_name) {
                tracing::debug!(step = step_name, "init step disabled");
                continue;
            }
            // Opt-in steps are never run from here.
            if !step.enabled_by_default() && !disabled.contains(step_name) {
                tracing::debug!(step = step_name, "init step not enabled by default");
                continue;
            }

            println!("Running {step_name}...");
            let code = step.run(root, name)?;
            if code != 0 {
                eprintln!("Hook {step_name} failed");
                return Ok(code);
            }
        }
        Ok(0)
    }
}

/// Render a markdown document whose body is `sections`, headed by `name`.
pub(crate) fn project_document(name: &str, sections: &str) -> String {
    format!("# {name}\n\n{sections}")
}
