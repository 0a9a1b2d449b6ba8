use crate::backend::BackendKind;
use crate::error::{PkgError, Result};
use crate::paths;
use crate::types::LifecycleCommand;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub const DEFAULT_BACKEND: &str = "uv";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// HookSet
// ---------------------------------------------------------------------------

/// Shell commands run before and after one lifecycle command, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookSet {
    #[serde(default)]
    pub pre: Vec<String>,
    #[serde(default)]
    pub post: Vec<String>,
}

impl HookSet {
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }
}

static EMPTY_HOOKS: HookSet = HookSet {
    pre: Vec::new(),
    post: Vec::new(),
};

// ---------------------------------------------------------------------------
// On-disk document
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    pkg: PkgSection,
    #[serde(default)]
    hooks: BTreeMap<String, HookSet>,
    #[serde(default)]
    plugins: PluginsSection,
}

#[derive(Debug, Deserialize)]
struct PkgSection {
    #[serde(default = "default_backend")]
    tool: String,
}

impl Default for PkgSection {
    fn default() -> Self {
        Self {
            tool: default_backend(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PluginsSection {
    #[serde(default)]
    enabled: Vec<String>,
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"[pkg]
tool = "{tool}"

[hooks.build]
pre = []
post = []

[hooks.test]
pre = []
post = []

[hooks.install]
pre = []
post = []

[plugins]
enabled = []
"#;

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectConfig {
    /// Build backend name, resolved through [`BackendKind`].
    pub backend: String,
    pub hooks: BTreeMap<String, HookSet>,
    /// Enabled plugin names, in load order.
    pub plugins: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            hooks: BTreeMap::new(),
            plugins: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load `pkg.toml` from `root`. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Self::parse(&data).map_err(|source| PkgError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    fn parse(data: &str) -> std::result::Result<Self, toml::de::Error> {
        let doc: ConfigDocument = toml::from_str(data)?;
        Ok(Self {
            backend: doc.pkg.tool,
            hooks: doc.hooks,
            plugins: doc.plugins.enabled,
        })
    }

    /// Hooks configured for `command`; an unconfigured command has none.
    pub fn hooks_for(&self, command: &str) -> &HookSet {
        self.hooks.get(command).unwrap_or(&EMPTY_HOOKS)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Backend must resolve
        if self.backend.parse::<BackendKind>().is_err() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "unknown tool '{}'; available: {}",
                    self.backend,
                    BackendKind::available()
                ),
            });
        }

        // 2. Hook tables for commands that never run
        for (command, set) in &self.hooks {
            if !LifecycleCommand::is_valid(command) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("hooks configured for unknown command '{command}'"),
                });
            }

            // 3. Empty hook commands
            for (phase, list) in [("pre", &set.pre), ("post", &set.post)] {
                if list.iter().any(|h| h.trim().is_empty()) {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!("hooks.{command}.{phase} contains an empty command"),
                    });
                }
            }
        }

        // 4. Duplicate plugin names load once per entry
        let mut seen = HashSet::new();
        for name in &self.plugins {
            if !seen.insert(name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("plugin '{name}' is enabled more than once"),
                });
            }
        }

        warnings
    }
}

/// Write the default `pkg.toml` for `backend` unless one already exists.
/// Returns true if the file was created.
pub fn write_default_config(root: &Path, backend: &str) -> Result<bool> {
    let content = DEFAULT_CONFIG_TEMPLATE.replace("{tool}", backend);
    crate::io::write_if_missing(&paths::config_path(root), content.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_document() {
        let dir = TempDir::new().unwrap();
        let cfg = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.backend, "uv");
        assert!(cfg.hooks.is_empty());
        assert!(cfg.plugins.is_empty());
    }

    #[test]
    fn hooks_for_missing_command_is_empty() {
        let cfg = ProjectConfig::default();
        let hooks = cfg.hooks_for("build");
        assert!(hooks.pre.is_empty());
        assert!(hooks.post.is_empty());
    }

    #[test]
    fn loads_full_document() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pkg.toml"),
            r#"
[pkg]
tool = "go"

[hooks.build]
pre = ["echo pre"]
post = ["echo post"]

[plugins]
enabled = ["history"]
"#,
        )
        .unwrap();

        let cfg = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.backend, "go");
        assert_eq!(cfg.plugins, vec!["history".to_string()]);
        assert_eq!(cfg.hooks_for("build").pre, vec!["echo pre".to_string()]);
        assert_eq!(cfg.hooks_for("build").post, vec!["echo post".to_string()]);
    }

    #[test]
    fn missing_sections_default() {
        let cfg = ProjectConfig::parse("[hooks.test]\npre = [\"true\"]\n").unwrap();
        assert_eq!(cfg.backend, "uv");
        assert!(cfg.plugins.is_empty());
        assert_eq!(cfg.hooks_for("test").pre, vec!["true".to_string()]);
        assert!(cfg.hooks_for("test").post.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = ProjectConfig::parse(
            "[pkg]\ntool = \"bun\"\ncolor = true\n\n[extra]\nanything = 1\n",
        )
        .unwrap();
        assert_eq!(cfg.backend, "bun");
    }

    #[test]
    fn malformed_document_is_config_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "[pkg\ntool = ").unwrap();
        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, PkgError::Config { .. }));
    }

    #[test]
    fn default_template_round_trips() {
        let dir = TempDir::new().unwrap();
        assert!(write_default_config(dir.path(), "bash").unwrap());
        let content = std::fs::read_to_string(dir.path().join("pkg.toml")).unwrap();
        assert!(content.contains("tool = \"bash\""));

        let cfg = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.backend, "bash");
        assert!(cfg.hooks_for("install").is_empty());
    }

    #[test]
    fn default_template_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pkg.toml"), "existing").unwrap();
        assert!(!write_default_config(dir.path(), "uv").unwrap());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("pkg.toml")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn validate_clean_config_has_no_warnings() {
        assert!(ProjectConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_problems() {
        let mut cfg = ProjectConfig {
            backend: "npm".to_string(),
            ..Default::default()
        };
        cfg.hooks.insert(
            "biuld".to_string(),
            HookSet {
                pre: vec!["  ".to_string()],
                post: vec![],
            },
        );
        cfg.plugins = vec!["history".to_string(), "history".to_string()];

        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 4);
        assert_eq!(
            warnings.iter().filter(|w| w.level == WarnLevel::Error).count(),
            1
        );
        assert!(warnings.iter().any(|w| w.message.contains("biuld")));
        assert!(warnings.iter().any(|w| w.message.contains("empty command")));
        assert!(warnings.iter().any(|w| w.message.contains("more than once")));
    }
}
