//! Named environments and their persisted config trees

use crate::{Error, Result};
use devplat_config::{
    ConfigTree, ConfigValue, Layer, PLATFORM_CONFIG_PATH, PlatformConfig, PlatformField,
    ProjectLayout,
};
use devplat_fs::ConfigStore;
use std::path::PathBuf;

/// Key/value persistence scoped to one named environment.
pub trait EnvironmentConfig: Send + Sync {
    fn name(&self) -> &str;

    /// Value at a dot-separated path.
    fn get(&self, path: &str) -> Option<ConfigValue>;

    /// Store a value. Durable once this returns for file-backed stores.
    fn set(&mut self, path: &str, value: ConfigValue) -> Result<()>;

    /// The environment's own `platform.config` fragment.
    fn platform_config(&self) -> Result<Option<PlatformConfig>> {
        self.get(PLATFORM_CONFIG_PATH)
            .map(|value| PlatformConfig::from_value(Layer::EnvironmentStore, &value))
            .transpose()
            .map_err(Error::from)
    }
}

/// A named environment with its config tree.
///
/// Created with [`Environment::new`] it lives in memory only; loaded from a
/// [`ProjectLayout`] every `set` is written through to
/// `.devplat/<name>/config.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    name: String,
    config: ConfigTree,
    path: Option<PathBuf>,
}

impl Environment {
    /// In-memory environment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: ConfigTree::new(),
            path: None,
        }
    }

    /// Open the environment `name` of `layout`.
    ///
    /// A missing config file gives an empty tree that is created on first
    /// write.
    pub fn load(layout: &ProjectLayout, name: &str) -> Result<Self> {
        validate_name(name)?;
        let path = layout.environment_config_path(name);
        let config = devplat_config::layout::load_layer_tree(Layer::EnvironmentStore, &path)?
            .unwrap_or_default();
        Ok(Self {
            name: name.to_string(),
            config,
            path: Some(path),
        })
    }

    /// Create a new, empty environment on disk.
    pub fn create(layout: &ProjectLayout, name: &str) -> Result<Self> {
        validate_name(name)?;
        if layout.environment_names()?.iter().any(|n| n == name) {
            return Err(Error::EnvironmentExists {
                name: name.to_string(),
            });
        }

        let env = Self {
            name: name.to_string(),
            config: ConfigTree::new(),
            path: Some(layout.environment_config_path(name)),
        };
        env.save()?;
        tracing::info!(environment = %name, "Created environment");
        Ok(env)
    }

    pub fn config(&self) -> &ConfigTree {
        &self.config
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    /// Write the tree to disk; a no-op for in-memory environments.
    pub fn save(&self) -> Result<()> {
        if let Some(ref path) = self.path {
            ConfigStore::new().save(path, &self.config)?;
        }
        Ok(())
    }
}

impl EnvironmentConfig for Environment {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, path: &str) -> Option<ConfigValue> {
        self.config.get(path).cloned()
    }

    fn set(&mut self, path: &str, value: ConfigValue) -> Result<()> {
        self.config.set(path, value)?;
        self.save()
    }
}

/// Persist selected platform fields under `platform.config.<key>`.
pub fn persist_platform_fields(
    env: &mut dyn EnvironmentConfig,
    config: &PlatformConfig,
    fields: &[PlatformField],
) -> Result<()> {
    for field in fields {
        if let Some(value) = config.get(*field) {
            let path = format!("{}.{}", PLATFORM_CONFIG_PATH, field.key());
            env.set(&path, value.into())?;
        }
    }
    Ok(())
}

/// Environment names become directory names, so keep them simple.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidEnvironmentName {
            name: name.to_string(),
        })
    }
}
