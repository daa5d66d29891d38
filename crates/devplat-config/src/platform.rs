//! Typed platform configuration projected from a [`ConfigTree`]

use crate::layer::Layer;
use crate::tree::{ConfigTree, ConfigValue};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator value of the devcenter platform (`platform.type`).
pub const PLATFORM_KIND_DEVCENTER: &str = "devcenter";

/// Path of the platform discriminator in user config and project descriptor.
pub const PLATFORM_TYPE_PATH: &str = "platform.type";

/// Path of the platform config sub-tree shared by every file-backed layer.
pub const PLATFORM_CONFIG_PATH: &str = "platform.config";

/// The individually resolved fields of [`PlatformConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformField {
    Name,
    Project,
    Catalog,
    EnvironmentType,
    EnvironmentDefinition,
    User,
}

impl PlatformField {
    pub const ALL: [PlatformField; 6] = [
        PlatformField::Name,
        PlatformField::Project,
        PlatformField::Catalog,
        PlatformField::EnvironmentType,
        PlatformField::EnvironmentDefinition,
        PlatformField::User,
    ];

    /// Key of this field inside a `platform.config` tree.
    pub fn key(self) -> &'static str {
        match self {
            PlatformField::Name => "name",
            PlatformField::Project => "project",
            PlatformField::Catalog => "catalog",
            PlatformField::EnvironmentType => "environmentType",
            PlatformField::EnvironmentDefinition => "environmentDefinition",
            PlatformField::User => "user",
        }
    }

    /// Process environment variable feeding this field.
    pub fn env_var(self) -> &'static str {
        match self {
            PlatformField::Name => "DEVCENTER_NAME",
            PlatformField::Project => "DEVCENTER_PROJECT",
            PlatformField::Catalog => "DEVCENTER_CATALOG",
            PlatformField::EnvironmentType => "DEVCENTER_ENVIRONMENT_TYPE",
            PlatformField::EnvironmentDefinition => "DEVCENTER_ENVIRONMENT_DEFINITION",
            PlatformField::User => "DEVCENTER_ENVIRONMENT_USER",
        }
    }
}

impl fmt::Display for PlatformField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Effective devcenter platform settings.
///
/// Each field is optional and resolved independently. `Some("")` is treated
/// the same as `None` by [`PlatformConfig::get`] and by the merger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl PlatformConfig {
    /// Non-empty value of `field`, if any.
    pub fn get(&self, field: PlatformField) -> Option<&str> {
        self.slot(field).as_deref().filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: PlatformField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// True when no field carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        PlatformField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Fields that are still unresolved.
    pub fn missing(&self) -> Vec<PlatformField> {
        PlatformField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Project a `platform.config` value read from `layer`.
    ///
    /// The value must be a tree; every known key that is present must be a
    /// string. Unknown keys are ignored and `null` counts as absent.
    pub fn from_value(layer: Layer, value: &ConfigValue) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let tree = value.as_tree().ok_or_else(|| Error::MalformedConfig {
            layer,
            message: format!(
                "'{}' must be a table, found {}",
                PLATFORM_CONFIG_PATH,
                value.kind()
            ),
        })?;
        Self::from_tree(layer, tree)
    }

    /// Project a `platform.config` tree read from `layer`.
    pub fn from_tree(layer: Layer, tree: &ConfigTree) -> Result<Self> {
        let mut config = PlatformConfig::default();
        for field in PlatformField::ALL {
            match tree.get(field.key()) {
                None | Some(ConfigValue::Null) => {}
                Some(ConfigValue::String(s)) => config.set(field, s.clone()),
                Some(other) => {
                    return Err(Error::MalformedConfig {
                        layer,
                        message: format!(
                            "'{}.{}' must be a string, found {}",
                            PLATFORM_CONFIG_PATH,
                            field.key(),
                            other.kind()
                        ),
                    });
                }
            }
        }
        Ok(config)
    }

    /// Render the populated fields as a `platform.config` tree.
    pub fn to_tree(&self) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for field in PlatformField::ALL {
            if let Some(value) = self.get(field) {
                // Keys are single segments, so this cannot fail
                let _ = tree.set(field.key(), value);
            }
        }
        tree
    }

    fn slot(&self, field: PlatformField) -> &Option<String> {
        match field {
            PlatformField::Name => &self.name,
            PlatformField::Project => &self.project,
            PlatformField::Catalog => &self.catalog,
            PlatformField::EnvironmentType => &self.environment_type,
            PlatformField::EnvironmentDefinition => &self.environment_definition,
            PlatformField::User => &self.user,
        }
    }

    fn slot_mut(&mut self, field: PlatformField) -> &mut Option<String> {
        match field {
            PlatformField::Name => &mut self.name,
            PlatformField::Project => &mut self.project,
            PlatformField::Catalog => &mut self.catalog,
            PlatformField::EnvironmentType => &mut self.environment_type,
            PlatformField::EnvironmentDefinition => &mut self.environment_definition,
            PlatformField::User => &mut self.user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_tree_reads_known_fields() {
        let tree: ConfigTree = serde_json::from_str(
            r#"{"name": "dc", "project": "web", "environmentType": "Dev", "extra": 1}"#,
        )
        .unwrap();

        let config = PlatformConfig::from_tree(Layer::UserDescriptor, &tree).unwrap();
        assert_eq!(config.get(PlatformField::Name), Some("dc"));
        assert_eq!(config.get(PlatformField::Project), Some("web"));
        assert_eq!(config.get(PlatformField::EnvironmentType), Some("Dev"));
        assert_eq!(config.get(PlatformField::Catalog), None);
    }

    #[test]
    fn from_tree_rejects_non_string_field() {
        let tree: ConfigTree = serde_json::from_str(r#"{"project": 7}"#).unwrap();

        let err = PlatformConfig::from_tree(Layer::ProjectDescriptor, &tree).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("project descriptor"), "{message}");
        assert!(message.contains("platform.config.project"), "{message}");
    }

    #[test]
    fn from_value_rejects_scalar() {
        let err = PlatformConfig::from_value(Layer::EnvironmentStore, &ConfigValue::from("dc"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedConfig {
                layer: Layer::EnvironmentStore,
                ..
            }
        ));
    }

    #[test]
    fn null_fields_count_as_missing() {
        let tree: ConfigTree =
            serde_json::from_str(r#"{"name": null, "project": "web"}"#).unwrap();

        let config = PlatformConfig::from_tree(Layer::UserDescriptor, &tree).unwrap();
        assert_eq!(config.get(PlatformField::Name), None);
        assert_eq!(config.get(PlatformField::Project), Some("web"));

        let config =
            PlatformConfig::from_value(Layer::UserDescriptor, &ConfigValue::Null).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut config = PlatformConfig::default();
        config.set(PlatformField::Catalog, "");
        assert!(config.get(PlatformField::Catalog).is_none());
        assert!(config.is_empty());
        assert_eq!(config.missing().len(), 6);
    }

    #[test]
    fn to_tree_skips_empty_fields() {
        let mut config = PlatformConfig::default();
        config.set(PlatformField::Project, "web");
        config.set(PlatformField::Catalog, "");

        let tree = config.to_tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get_str("project"), Some("web"));
    }
}
