use anyhow::Context;
use pkg_core::{
    backend::BuildBackend,
    pipeline::{self, ExecutionContext},
    plugin::PluginCatalog,
    types::LifecycleCommand,
};
use std::path::Path;

pub fn load_context(root: &Path) -> anyhow::Result<ExecutionContext> {
    ExecutionContext::build(root, PluginCatalog::builtin())
        .with_context(|| format!("failed to load project at {}", root.display()))
}

/// Run one backend operation for `command` through the hook pipeline.
pub fn run(
    root: &Path,
    command: LifecycleCommand,
    op: impl FnOnce(&dyn BuildBackend) -> pkg_core::Result<i32>,
) -> anyhow::Result<i32> {
    let ctx = load_context(root)?;
    let code = pipeline::execute(&ctx, command.as_str(), || op(ctx.backend()))
        .with_context(|| format!("{command} failed"))?;
    Ok(code)
}
