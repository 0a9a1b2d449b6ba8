use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// A backend operation needed a directory or file that does not exist.
pub const EXIT_MISSING_PREREQUISITE: i32 = 2;

// ---------------------------------------------------------------------------
// LifecycleCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleCommand {
    Init,
    Build,
    Test,
    Install,
    Run,
    Clean,
    Uplift,
}

impl LifecycleCommand {
    pub fn all() -> &'static [LifecycleCommand] {
        &[
            LifecycleCommand::Init,
            LifecycleCommand::Build,
            LifecycleCommand::Test,
            LifecycleCommand::Install,
            LifecycleCommand::Run,
            LifecycleCommand::Clean,
            LifecycleCommand::Uplift,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleCommand::Init => "init",
            LifecycleCommand::Build => "build",
            LifecycleCommand::Test => "test",
            LifecycleCommand::Install => "install",
            LifecycleCommand::Run => "run",
            LifecycleCommand::Clean => "clean",
            LifecycleCommand::Uplift => "uplift",
        }
    }

    pub fn is_valid(s: &str) -> bool {
        Self::all().iter().any(|c| c.as_str() == s)
    }
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HookPhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    Pre,
    Post,
}

impl HookPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            HookPhase::Pre => "pre",
            HookPhase::Post => "post",
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
