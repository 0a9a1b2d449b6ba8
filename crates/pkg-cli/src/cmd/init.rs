use anyhow::Context;
use pkg_core::{backend::BackendKind, config, init_hooks::InitHookRegistry, io, paths};
use std::collections::HashSet;
use std::path::Path;

/// Create a new project: write `pkg.toml`, run the backend's bootstrap, then
/// the init steps. Returns the backend's code if it failed, otherwise the
/// init steps' result.
pub fn run(root: &Path, name: &str, tool: &str, git: bool) -> anyhow::Result<i32> {
    let kind: BackendKind = tool.parse()?;

    println!("Initializing {name} ({kind}) in: {}", root.display());
    io::ensure_dir(root).with_context(|| format!("failed to create {}", root.display()))?;

    if config::write_default_config(root, kind.as_str()).context("failed to write pkg.toml")? {
        println!("Created {}", paths::CONFIG_FILE);
    }

    let backend = kind.create(root);
    let code = backend
        .init(name)
        .with_context(|| format!("{kind} init failed"))?;
    if code != 0 {
        return Ok(code);
    }

    let disabled: HashSet<String> = if git {
        HashSet::new()
    } else {
        HashSet::from(["git".to_string()])
    };
    let code = InitHookRegistry::builtin()
        .run_all(root, name, &disabled)
        .context("init step failed")?;
    Ok(code)
}
