//! Layered platform configuration resolution
//!
//! `PlatformConfigResolver` reads every layer from its source and hands the
//! fragments to the merger. Precedence, highest first:
//!
//! 1. Process environment variables (`DEVCENTER_*`)
//! 2. The selected environment's `platform.config`
//! 3. The project descriptor's `platform.config` (`devplat.yaml`)
//! 4. The user config's `platform.config`

use crate::env::{CONFIG_DIR_ENV, EnvironmentVariables};
use crate::layer::Layer;
use crate::layout::{CONFIG_FILE, ProjectLayout, load_layer_tree};
use crate::merge::{LayeredConfig, MergedConfig};
use crate::platform::{
    PLATFORM_CONFIG_PATH, PLATFORM_KIND_DEVCENTER, PLATFORM_TYPE_PATH, PlatformConfig,
};
use crate::tree::ConfigTree;
use crate::{Error, Result};
use devplat_fs::ConfigStore;
use std::path::PathBuf;

/// Loads and merges the platform config layers of one command invocation.
#[derive(Debug, Clone)]
pub struct PlatformConfigResolver {
    /// Project the command runs in, if any
    layout: Option<ProjectLayout>,

    env: EnvironmentVariables,

    /// Explicitly selected environment; falls back to the project default
    environment: Option<String>,

    /// Override for the user config directory (used for testing).
    /// When `None`, `DEVPLAT_CONFIG_DIR` or `dirs::config_dir()` is used.
    user_config_dir_override: Option<PathBuf>,
}

impl PlatformConfigResolver {
    /// Create a resolver reading the real process environment.
    pub fn new(layout: Option<ProjectLayout>) -> Self {
        Self {
            layout,
            env: EnvironmentVariables::from_process(),
            environment: None,
            user_config_dir_override: None,
        }
    }

    pub fn with_env_vars(mut self, env: EnvironmentVariables) -> Self {
        self.env = env;
        self
    }

    pub fn with_environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    /// Use a custom user config directory instead of the platform default.
    pub fn with_user_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_config_dir_override = Some(dir.into());
        self
    }

    pub fn layout(&self) -> Option<&ProjectLayout> {
        self.layout.as_ref()
    }

    pub fn env_vars(&self) -> &EnvironmentVariables {
        &self.env
    }

    /// Path of the user config file, if a config directory can be determined.
    pub fn user_config_path(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.user_config_dir_override {
            return Some(dir.join(CONFIG_FILE));
        }
        if let Some(dir) = self.env.get(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Some(PathBuf::from(dir).join(CONFIG_FILE));
        }
        dirs::config_dir().map(|d| d.join("devplat").join(CONFIG_FILE))
    }

    /// Load the user config tree; empty when the file does not exist.
    pub fn load_user_config(&self) -> Result<ConfigTree> {
        let Some(path) = self.user_config_path() else {
            tracing::debug!("No user config directory available");
            return Ok(ConfigTree::new());
        };
        Ok(load_layer_tree(Layer::UserDescriptor, &path)?.unwrap_or_default())
    }

    /// Persist the user config tree.
    pub fn save_user_config(&self, tree: &ConfigTree) -> Result<()> {
        let path = self.user_config_path().ok_or(Error::NoUserConfigDir)?;
        ConfigStore::new().save(&path, tree)?;
        Ok(())
    }

    /// The environment whose config forms layer 2.
    pub fn selected_environment(&self) -> Result<Option<String>> {
        if let Some(ref name) = self.environment {
            return Ok(Some(name.clone()));
        }
        match self.layout {
            Some(ref layout) => layout.default_environment(),
            None => Ok(None),
        }
    }

    /// Read every layer into a fragment.
    ///
    /// Missing sources become `None`. A source that exists but cannot be
    /// parsed, or whose `platform.config` has the wrong shape, is an error.
    pub fn load_layers(&self) -> Result<LayeredConfig> {
        // Layer 1 - process environment
        let process_environment = self.env.platform_fragment();

        // Layer 2 - selected environment
        let mut environment_store = None;
        if let (Some(layout), Some(name)) = (&self.layout, self.selected_environment()?) {
            let path = layout.environment_config_path(&name);
            match load_layer_tree(Layer::EnvironmentStore, &path)? {
                Some(tree) => {
                    tracing::debug!(environment = %name, "Loading environment config (layer 2)");
                    environment_store = platform_fragment(Layer::EnvironmentStore, &tree)?;
                }
                None => {
                    tracing::debug!(environment = %name, "Environment has no config (layer 2), skipping");
                }
            }
        }

        // Layer 3 - project descriptor
        let mut project_descriptor = None;
        if let Some(ref layout) = self.layout {
            if let Some(descriptor) = layout.load_descriptor()? {
                tracing::debug!(path = %layout.descriptor_path().display(), "Loading project descriptor (layer 3)");
                if let Some(value) = descriptor.platform.and_then(|p| p.config) {
                    project_descriptor =
                        Some(PlatformConfig::from_value(Layer::ProjectDescriptor, &value)?);
                }
            }
        }

        // Layer 4 - user config
        let user_config = self.load_user_config()?;
        let user_descriptor = platform_fragment(Layer::UserDescriptor, &user_config)?;

        Ok(LayeredConfig {
            process_environment,
            environment_store,
            project_descriptor,
            user_descriptor,
        })
    }

    /// Resolve the effective platform config.
    pub fn resolve(&self) -> Result<PlatformConfig> {
        Ok(self.load_layers()?.merged())
    }

    /// Resolve the effective platform config with per-field provenance.
    pub fn resolve_with_origins(&self) -> Result<MergedConfig> {
        Ok(self.load_layers()?.merged_with_origins())
    }

    /// Whether the devcenter platform is turned on.
    ///
    /// True when the project descriptor declares `platform.type: devcenter`,
    /// or when the user config's `platform.type` equals `devcenter` ignoring
    /// case. Unreadable sources count as "not enabled".
    pub fn is_enabled(&self) -> bool {
        if let Some(ref layout) = self.layout {
            match layout.load_descriptor() {
                Ok(Some(descriptor)) => {
                    if descriptor
                        .platform
                        .is_some_and(|p| p.kind == PLATFORM_KIND_DEVCENTER)
                    {
                        return true;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::debug!(error = %e, "Ignoring unreadable project descriptor"),
            }
        }

        match self.load_user_config() {
            Ok(tree) => tree
                .get_str(PLATFORM_TYPE_PATH)
                .is_some_and(|kind| kind.eq_ignore_ascii_case(PLATFORM_KIND_DEVCENTER)),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable user config");
                false
            }
        }
    }
}

fn platform_fragment(layer: Layer, tree: &ConfigTree) -> Result<Option<PlatformConfig>> {
    tree.get(PLATFORM_CONFIG_PATH)
        .map(|value| PlatformConfig::from_value(layer, value))
        .transpose()
}
