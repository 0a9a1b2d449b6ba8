use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use pkg_core::config::{ProjectConfig, WarnLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the resolved configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<i32> {
    let config = ProjectConfig::load(root).context("failed to load config")?;
    match subcmd {
        ConfigSubcommand::Show => show(root, &config, json)?,
        ConfigSubcommand::Validate => validate(&config, json)?,
    }
    Ok(0)
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, config: &ProjectConfig, json: bool) -> anyhow::Result<()> {
    if json {
        let value = serde_json::json!({
            "root": root.display().to_string(),
            "config": config,
        });
        return print_json(&value);
    }

    println!("Root:    {}", root.display());
    println!("Tool:    {}", config.backend);
    if config.plugins.is_empty() {
        println!("Plugins: (none)");
    } else {
        println!("Plugins: {}", config.plugins.join(", "));
    }

    let rows: Vec<Vec<String>> = config
        .hooks
        .iter()
        .flat_map(|(command, set)| {
            let pre = set.pre.iter().map(move |h| (command, "pre", h));
            let post = set.post.iter().map(move |h| (command, "post", h));
            pre.chain(post)
        })
        .map(|(command, phase, hook)| vec![command.clone(), phase.to_string(), hook.clone()])
        .collect();

    println!();
    if rows.is_empty() {
        println!("No hooks configured.");
    } else {
        print_table(&["COMMAND", "PHASE", "HOOK"], &rows);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config: &ProjectConfig, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
