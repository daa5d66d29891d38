//! On-disk layout of a devplat project
//!
//! ```text
//! <root>/
//!   devplat.yaml              project descriptor
//!   .devplat/
//!     config.json             { "defaultEnvironment": "<name>" }
//!     <env>/config.json       persisted config tree of one environment
//! ```

use crate::layer::Layer;
use crate::tree::{ConfigTree, ConfigValue};
use crate::{Error, Result};
use devplat_fs::ConfigStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the project descriptor.
pub const DESCRIPTOR_FILE: &str = "devplat.yaml";

/// Directory holding local environments.
pub const STATE_DIR: &str = ".devplat";

/// Name of every JSON config file inside the state directory.
pub const CONFIG_FILE: &str = "config.json";

/// `platform` section of the project descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigValue>,
}

/// Parsed `devplat.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_environment: Option<String>,
}

/// Paths of one project on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk up from `start` looking for a project descriptor or state dir.
    pub fn find(start: &Path) -> Option<Self> {
        let mut current = Some(start);
        while let Some(dir) = current {
            if dir.join(DESCRIPTOR_FILE).is_file() || dir.join(STATE_DIR).is_dir() {
                tracing::debug!(root = %dir.display(), "Found project root");
                return Some(Self::new(dir));
            }
            current = dir.parent();
        }
        None
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    pub fn environment_config_path(&self, name: &str) -> PathBuf {
        self.state_dir().join(name).join(CONFIG_FILE)
    }

    /// Load `devplat.yaml`; `None` when the project has no descriptor.
    pub fn load_descriptor(&self) -> Result<Option<ProjectDescriptor>> {
        let path = self.descriptor_path();
        ConfigStore::new()
            .load_optional(&path)
            .map_err(|e| malformed(Layer::ProjectDescriptor, e))
    }

    /// Name of the default environment, if one was selected.
    pub fn default_environment(&self) -> Result<Option<String>> {
        let path = self.state_dir().join(CONFIG_FILE);
        let state: Option<LocalState> = ConfigStore::new().load_optional(&path)?;
        Ok(state
            .and_then(|s| s.default_environment)
            .filter(|name| !name.is_empty()))
    }

    pub fn set_default_environment(&self, name: &str) -> Result<()> {
        let path = self.state_dir().join(CONFIG_FILE);
        let state = LocalState {
            default_environment: Some(name.to_string()),
        };
        ConfigStore::new().save(&path, &state)?;
        Ok(())
    }

    /// Names of all local environments, sorted.
    pub fn environment_names(&self) -> Result<Vec<String>> {
        let dir = self.state_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(devplat_fs::Error::io(&dir, e).into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| devplat_fs::Error::io(&dir, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Load a config tree belonging to `layer`; `None` when the file is missing.
///
/// Parse failures are reported as [`Error::MalformedConfig`] for that layer.
pub fn load_layer_tree(layer: Layer, path: &Path) -> Result<Option<ConfigTree>> {
    ConfigStore::new()
        .load_optional(path)
        .map_err(|e| malformed(layer, e))
}

fn malformed(layer: Layer, error: devplat_fs::Error) -> Error {
    match error {
        devplat_fs::Error::ConfigParse { path, message, .. } => Error::MalformedConfig {
            layer,
            message: format!("{}: {}", path.display(), message),
        },
        other => Error::Fs(other),
    }
}
