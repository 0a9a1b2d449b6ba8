//! Observer plugins notified around every pipelined command.
//!
//! Plugins are discovered from a [`PluginCatalog`], instantiated in the order
//! they are enabled in `pkg.toml`, and notified before and after each
//! command. A plugin can never change a command's exit code: callback errors
//! are logged and the remaining plugins still run.

pub mod builtin;

use crate::config::ProjectConfig;
use crate::error::PkgError;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Core(#[from] PkgError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub trait Plugin {
    fn name(&self) -> &str;

    /// Called once after instantiation. An error excludes the plugin.
    fn on_load(&mut self, _root: &Path, _config: &ProjectConfig) -> Result<(), PluginError> {
        Ok(())
    }

    fn on_pre_command(&self, _command: &str) -> Result<(), PluginError> {
        Ok(())
    }

    fn on_post_command(&self, _command: &str, _exit_code: i32) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Produces a fresh plugin instance.
pub type PluginFactory = Rc<dyn Fn() -> Box<dyn Plugin>>;

type Loader = Box<dyn Fn() -> Result<PluginFactory, String>>;

// ---------------------------------------------------------------------------
// PluginCatalog
// ---------------------------------------------------------------------------

/// Discovery source: named candidates whose loaders resolve to a factory.
/// A loader may fail, which excludes that candidate only.
#[derive(Default)]
pub struct PluginCatalog {
    candidates: Vec<(String, Loader)>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The plugins shipped with pkg.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(builtin::HISTORY, || {
            Box::new(builtin::HistoryPlugin::default())
        });
        catalog.register(builtin::TIMING, || Box::new(builtin::TimingPlugin::default()));
        catalog
    }

    pub fn register(&mut self, name: &str, factory: impl Fn() -> Box<dyn Plugin> + 'static) {
        let factory: PluginFactory = Rc::new(factory);
        self.register_loader(name, move || Ok(factory.clone()));
    }

    pub fn register_loader(
        &mut self,
        name: &str,
        loader: impl Fn() -> Result<PluginFactory, String> + 'static,
    ) {
        self.candidates.push((name.to_string(), Box::new(loader)));
    }

    /// Resolve every candidate. Failing candidates are logged and left out.
    pub fn discover(&self) -> BTreeMap<String, PluginFactory> {
        let mut found = BTreeMap::new();
        for (name, loader) in &self.candidates {
            match loader() {
                Ok(factory) => {
                    found.insert(name.clone(), factory);
                }
                Err(error) => {
                    tracing::warn!(plugin = %name, %error, "failed to load plugin candidate");
                }
            }
        }
        found
    }
}

// ---------------------------------------------------------------------------
// PluginManager
// ---------------------------------------------------------------------------

pub struct PluginManager {
    catalog: PluginCatalog,
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new(catalog: PluginCatalog) -> Self {
        Self {
            catalog,
            plugins: Vec::new(),
        }
    }

    pub fn discover(&self) -> BTreeMap<String, PluginFactory> {
        self.catalog.discover()
    }

    /// Instantiate each enabled plugin, in order, and retain those whose
    /// `on_load` succeeds. Names the catalog cannot provide are skipped.
    pub fn load(&mut self, enabled: &[String], root: &Path, config: &ProjectConfig) {
        let available = self.discover();
        for name in enabled {
            let Some(factory) = available.get(name) else {
                tracing::debug!(plugin = %name, "plugin not found; skipping");
                continue;
            };
            let mut plugin = factory();
            match plugin.on_load(root, config) {
                Ok(()) => {
                    tracing::debug!(plugin = %name, "plugin loaded");
                    self.plugins.push(plugin);
                }
                Err(e) => tracing::warn!(plugin = %name, error = %e, "plugin failed to load"),
            }
        }
    }

    /// Retain an already-loaded plugin.
    pub fn add(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn on_pre_command(&self, command: &str) {
        for plugin in &self.plugins {
            if let Err(e) = plugin.on_pre_command(command) {
                tracing::warn!(plugin = plugin.name(), command, error = %e, "pre-command notification failed");
            }
        }
    }

    pub fn on_post_command(&self, command: &str, exit_code: i32) {
        for plugin in &self.plugins {
            if let Err(e) = plugin.on_post_command(command, exit_code) {
                tracing::warn!(plugin = plugin.name(), command, error = %e, "post-command notification failed");
            }
        }
    }
}
