//! # Generator Configuration
//!
//! Settings that shape the generated project without being part of the
//! backend structure itself, loaded from a `stackforge.toml` file:
//!
//! ```toml
//! package_name = "invoicer"
//! package_version = "0.3.0"
//! migration_order = "dependency"   # or "declared" (default)
//! ```
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults
//! 2. The explicit `--config` file, or `stackforge.toml` beside the input file
//! 3. `STACKFORGE_PACKAGE_NAME` / `STACKFORGE_MIGRATION_ORDER`
//! 4. CLI flags (applied by the caller)

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generator::MigrationOrder;

/// File name looked up next to the input structure.
pub const CONFIG_FILE_NAME: &str = "stackforge.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// `name` written to the generated `package.json`
    pub package_name: String,
    /// `version` written to the generated `package.json`
    pub package_version: String,
    pub migration_order: MigrationOrder,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            package_name: "generated-backend".to_string(),
            package_version: "1.0.0".to_string(),
            migration_order: MigrationOrder::Declared,
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Failed to parse generator config")
    }

    /// Apply `STACKFORGE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable migration orders are ignored with a warning.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STACKFORGE_PACKAGE_NAME").filter(|v| !v.trim().is_empty()) {
            self.package_name = name.trim().to_string();
        }
        if let Some(raw) = lookup("STACKFORGE_MIGRATION_ORDER") {
            match MigrationOrder::parse(&raw) {
                Some(order) => self.migration_order = order,
                None => tracing::warn!(
                    value = %raw,
                    "Ignoring unknown STACKFORGE_MIGRATION_ORDER"
                ),
            }
        }
    }
}

/// Load a configuration file, `Ok(None)` when it does not exist.
pub fn load_config_file(path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
    let config = GeneratorConfig::from_toml(&contents)
        .with_context(|| format!("Invalid generator config: {}", path.display()))?;
    Ok(Some(config))
}

/// `stackforge.toml` in the input file's directory, if present.
pub fn auto_detect_config_path(input: &Path) -> Option<PathBuf> {
    let candidate = input.parent()?.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Resolve and load the configuration, then apply environment overrides.
///
/// An explicit path that does not exist is an error; an absent auto-detected
/// file just means defaults.
pub fn load_config(
    explicit: Option<&Path>,
    input: Option<&Path>,
) -> anyhow::Result<GeneratorConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => input.and_then(auto_detect_config_path),
    };

    let mut config = match &path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading generator config");
            load_config_file(path)?.unwrap_or_default()
        }
        None => GeneratorConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.package_name, "generated-backend");
        assert_eq!(config.package_version, "1.0.0");
        assert_eq!(config.migration_order, MigrationOrder::Declared);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml("migration_order = \"dependency\"\n").unwrap();
        assert_eq!(config.migration_order, MigrationOrder::Dependency);
        assert_eq!(config.package_name, "generated-backend");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(GeneratorConfig::from_toml("pakage_name = \"typo\"\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STACKFORGE_PACKAGE_NAME", " invoicer "),
            ("STACKFORGE_MIGRATION_ORDER", "dependency"),
        ]
        .into_iter()
        .collect();
        let mut config = GeneratorConfig::default();
        config.apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.package_name, "invoicer");
        assert_eq!(config.migration_order, MigrationOrder::Dependency);
    }

    #[test]
    fn test_bad_env_order_is_ignored() {
        let mut config = GeneratorConfig::default();
        config.apply_overrides_from(|k| {
            (k == "STACKFORGE_MIGRATION_ORDER").then(|| "sideways".to_string())
        });
        assert_eq!(config.migration_order, MigrationOrder::Declared);
    }

    #[test]
    fn test_auto_detect_beside_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("structure.json");
        assert!(auto_detect_config_path(&input).is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "package_name = \"beside\"\n").unwrap();
        let found = auto_detect_config_path(&input).unwrap();
        let config = load_config_file(&found).unwrap().unwrap();
        assert_eq!(config.package_name, "beside");
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), None).is_err());
        assert!(load_config_file(&missing).unwrap().is_none());
    }
}
