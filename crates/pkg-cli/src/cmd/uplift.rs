use super::lifecycle::load_context;
use anyhow::Context;
use pkg_core::{
    config::{self, ProjectConfig},
    init_hooks::InitHookRegistry,
    paths, pipeline,
    types::LifecycleCommand,
};
use std::collections::HashSet;
use std::path::Path;

/// Refresh an existing project: add a default `pkg.toml` if it has none,
/// then run the backend's uplift and the init steps through the pipeline.
pub fn run(root: &Path) -> anyhow::Result<i32> {
    let backend = ProjectConfig::load(root)
        .context("failed to load pkg.toml")?
        .backend;
    if config::write_default_config(root, &backend).context("failed to write pkg.toml")? {
        println!("Created {}", paths::CONFIG_FILE);
    }

    let ctx = load_context(root)?;
    let name = paths::project_name(root);
    let registry = InitHookRegistry::builtin();

    let command = LifecycleCommand::Uplift;
    let code = pipeline::execute(&ctx, command.as_str(), || {
        let code = ctx.backend().uplift()?;
        if code != 0 {
            return Ok(code);
        }
        registry.run_all(ctx.root(), &name, &HashSet::new())
    })
    .context("uplift failed")?;
    Ok(code)
}
