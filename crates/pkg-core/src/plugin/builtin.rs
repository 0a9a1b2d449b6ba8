use super::{Plugin, PluginError};
use crate::config::ProjectConfig;
use crate::io;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const HISTORY: &str = "history";
pub const TIMING: &str = "timing";

/// Start time of the command in flight, if any.
#[derive(Debug, Default)]
struct Stopwatch(Cell<Option<Instant>>);

impl Stopwatch {
    fn start(&self) {
        self.0.set(Some(Instant::now()));
    }

    /// Elapsed time since `start`, or zero if never started.
    fn stop(&self) -> Duration {
        self.0
            .take()
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

/// One line of `.pkg/history.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub command: String,
    pub exit_code: i32,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

/// Appends a record of every finished command to `.pkg/history.jsonl`.
#[derive(Debug, Default)]
pub struct HistoryPlugin {
    path: Option<PathBuf>,
    clock: Stopwatch,
}

impl Plugin for HistoryPlugin {
    fn name(&self) -> &str {
        HISTORY
    }

    fn on_load(&mut self, root: &Path, _config: &ProjectConfig) -> Result<(), PluginError> {
        self.path = Some(paths::history_path(root));
        Ok(())
    }

    fn on_pre_command(&self, _command: &str) -> Result<(), PluginError> {
        self.clock.start();
        Ok(())
    }

    fn on_post_command(&self, command: &str, exit_code: i32) -> Result<(), PluginError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| PluginError::Failed("history plugin used before load".into()))?;
        let entry = HistoryEntry {
            command: command.to_string(),
            exit_code,
            duration_ms: u64::try_from(self.clock.stop().as_millis()).unwrap_or(u64::MAX),
            finished_at: Utc::now(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');
        io::append_text(path, &line)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// timing
// ---------------------------------------------------------------------------

/// Logs how long each command took.
#[derive(Debug, Default)]
pub struct TimingPlugin {
    clock: Stopwatch,
}

impl Plugin for TimingPlugin {
    fn name(&self) -> &str {
        TIMING
    }

    fn on_pre_command(&self, _command: &str) -> Result<(), PluginError> {
        self.clock.start();
        Ok(())
    }

    fn on_post_command(&self, command: &str, exit_code: i32) -> Result<(), PluginError> {
        let elapsed = self.clock.stop();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(command, exit_code, elapsed_ms, "command finished");
        Ok(())
    }
}
