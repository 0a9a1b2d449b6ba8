//! The hook pipeline every lifecycle command runs through.
//!
//! ```text
//! plugins.pre → pre-hooks ─fail→ return 1
//!                  │
//!                action ─Err→ propagate
//!                  │
//!         code == 0 → post-hooks (failure only reported)
//!                  │
//!            plugins.post(code) → return code
//! ```

use crate::backend::{self, BuildBackend};
use crate::config::{ProjectConfig, WarnLevel};
use crate::error::Result;
use crate::hooks;
use crate::plugin::{PluginCatalog, PluginManager};
use crate::types::EXIT_FAILURE;
use std::path::{Path, PathBuf};

/// Everything one invocation needs, assembled once before any command runs.
pub struct ExecutionContext {
    root: PathBuf,
    config: ProjectConfig,
    backend: Box<dyn BuildBackend>,
    plugins: PluginManager,
}

impl ExecutionContext {
    pub fn new(
        root: &Path,
        config: ProjectConfig,
        backend: Box<dyn BuildBackend>,
        plugins: PluginManager,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            backend,
            plugins,
        }
    }

    /// Load `pkg.toml` under `root`, resolve its backend, and load its
    /// enabled plugins from `catalog`. An unknown backend fails here, before
    /// anything runs.
    pub fn build(root: &Path, catalog: PluginCatalog) -> Result<Self> {
        let config = ProjectConfig::load(root)?;
        for warning in config.validate() {
            if warning.level != WarnLevel::Error {
                tracing::warn!("{}", warning.message);
            }
        }

        let backend = backend::resolve(&config.backend, root)?;
        let mut plugins = PluginManager::new(catalog);
        plugins.load(&config.plugins, root, &config);
        tracing::debug!(
            root = %root.display(),
            backend = backend.name(),
            plugins = ?plugins.names(),
            "execution context ready"
        );

        Ok(Self::new(root, config, backend, plugins))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> &dyn BuildBackend {
        self.backend.as_ref()
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }
}

/// Run `action` for `command` with its hooks and plugin notifications.
pub fn execute(
    ctx: &ExecutionContext,
    command: &str,
    action: impl FnOnce() -> Result<i32>,
) -> Result<i32> {
    let hook_set = ctx.config.hooks_for(command);

    ctx.plugins.on_pre_command(command);
    if !hooks::run_pre_hooks(hook_set, command, &ctx.root) {
        return Ok(EXIT_FAILURE);
    }

    let exit_code = action()?;

    if exit_code == 0 && !hooks::run_post_hooks(hook_set, command, &ctx.root) {
        tracing::warn!(command, "post-hook failed; keeping command result");
    }

    ctx.plugins.on_post_command(command, exit_code);
    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GoBackend;
    use crate::config::HookSet;
    use crate::error::PkgError;
    use crate::plugin::testing::{EventLog, RecordingPlugin};
    use crate::runner::testing::RecordingRunner;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn context(dir: &TempDir, build_hooks: HookSet, log: &EventLog) -> ExecutionContext {
        let mut config = ProjectConfig {
            backend: "go".into(),
            ..Default::default()
        };
        config.hooks.insert("build".into(), build_hooks);
        let mut plugins = PluginManager::new(PluginCatalog::new());
        plugins.add(Box::new(RecordingPlugin::new("probe", log)));
        let backend = GoBackend::with_runner(dir.path(), RecordingRunner::new());
        ExecutionContext::new(dir.path(), config, Box::new(backend), plugins)
    }

    fn hooks(pre: &[&str], post: &[&str]) -> HookSet {
        HookSet {
            pre: pre.iter().map(|s| s.to_string()).collect(),
            post: post.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn success_runs_everything() {
        let dir = TempDir::new().unwrap();
        let log = EventLog::default();
        let ctx = context(&dir, hooks(&["touch pre"], &["touch post"]), &log);

        let code = execute(&ctx, "build", || Ok(0)).unwrap();
        assert_eq!(code, 0);
        assert!(dir.path().join("pre").exists());
        assert!(dir.path().join("post").exists());
        assert_eq!(*log.borrow(), ["probe:pre:build", "probe:post:build:0"]);
    }

    #[test]
    fn failing_pre_hook_skips_action() {
        let dir = TempDir::new().unwrap();
        let log = EventLog::default();
        let ctx = context(&dir, hooks(&["false"], &["touch post"]), &log);
        let called = Cell::new(false);

        let code = execute(&ctx, "build", || {
            called.set(true);
            Ok(0)
        })
        .unwrap();

        assert_eq!(code, 1);
        assert!(!called.get());
        assert!(!dir.path().join("post").exists());
        assert_eq!(*log.borrow(), ["probe:pre:build"]);
    }

    #[test]
    fn failing_action_skips_post_hooks() {
        let dir = TempDir::new().unwrap();
        let log = EventLog::default();
        let ctx = context(&dir, hooks(&[], &["touch post"]), &log);

        assert_eq!(execute(&ctx, "build", || Ok(7)).unwrap(), 7);
        assert!(!dir.path().join("post").exists());
        assert_eq!(*log.borrow(), ["probe:pre:build", "probe:post:build:7"]);
    }

    #[test]
    fn failing_post_hook_keeps_success() {
        let dir = TempDir::new().unwrap();
        let log = EventLog::default();
        let ctx = context(&dir, hooks(&[], &["exit 9"]), &log);

        assert_eq!(execute(&ctx, "build", || Ok(0)).unwrap(), 0);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn commands_without_hooks_run_directly() {
        let dir = TempDir::new().unwrap();
        let log = EventLog::default();
        let ctx = context(&dir, hooks(&["false"], &[]), &log);

        assert_eq!(execute(&ctx, "test", || Ok(0)).unwrap(), 0);
    }

    #[test]
    fn action_error_propagates() {
        let dir = TempDir::new().unwrap();
        let log = EventLog::default();
        let ctx = context(&dir, HookSet::default(), &log);

        let err = execute(&ctx, "build", || Err(PkgError::ToolNotFound("go".into()))).unwrap_err();
        assert!(matches!(err, PkgError::ToolNotFound(_)));
        assert_eq!(*log.borrow(), ["probe:pre:build"]);
    }

    #[test]
    fn build_resolves_configured_backend() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pkg.toml"),
            "[pkg]\ntool = \"bash\"\n\n[plugins]\nenabled = [\"timing\", \"missing\"]\n",
        )
        .unwrap();

        let ctx = ExecutionContext::build(dir.path(), PluginCatalog::builtin()).unwrap();
        assert_eq!(ctx.backend().name(), "bash");
        assert_eq!(ctx.plugins().names(), ["timing"]);
        assert_eq!(ctx.root(), dir.path());
    }

    #[test]
    fn build_without_config_defaults_to_uv() {
        let dir = TempDir::new().unwrap();
        let ctx = ExecutionContext::build(dir.path(), PluginCatalog::builtin()).unwrap();
        assert_eq!(ctx.backend().name(), "uv");
        assert!(ctx.plugins().is_empty());
    }

    #[test]
    fn build_rejects_unknown_backend() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "[pkg]\ntool = \"maven\"\n").unwrap();
        let err = ExecutionContext::build(dir.path(), PluginCatalog::builtin())
            .err()
            .unwrap();
        assert!(matches!(err, PkgError::UnknownBackend { .. }));
    }
}
