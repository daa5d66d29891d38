//! Field-wise merge of layered platform config fragments

use crate::layer::Layer;
use crate::platform::{PlatformConfig, PlatformField};
use serde::Serialize;
use std::collections::BTreeMap;

/// Merge fragments given in precedence order (highest first).
///
/// For every field the first fragment holding a non-empty value wins. A
/// fragment that sets only one field never hides lower-precedence values for
/// the other fields. `None` entries are absent layers.
pub fn merge(fragments: &[Option<PlatformConfig>]) -> PlatformConfig {
    let mut merged = PlatformConfig::default();
    for field in PlatformField::ALL {
        let winner = fragments
            .iter()
            .flatten()
            .find_map(|fragment| fragment.get(field));
        if let Some(value) = winner {
            merged.set(field, value);
        }
    }
    merged
}

/// Fragments from every layer, one slot per [`Layer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredConfig {
    pub process_environment: Option<PlatformConfig>,
    pub environment_store: Option<PlatformConfig>,
    pub project_descriptor: Option<PlatformConfig>,
    pub user_descriptor: Option<PlatformConfig>,
}

impl LayeredConfig {
    pub fn layer(&self, layer: Layer) -> Option<&PlatformConfig> {
        match layer {
            Layer::ProcessEnvironment => self.process_environment.as_ref(),
            Layer::EnvironmentStore => self.environment_store.as_ref(),
            Layer::ProjectDescriptor => self.project_descriptor.as_ref(),
            Layer::UserDescriptor => self.user_descriptor.as_ref(),
        }
    }

    /// Fragments in precedence order, ready for [`merge`].
    pub fn fragments(&self) -> [Option<PlatformConfig>; 4] {
        Layer::PRECEDENCE.map(|layer| self.layer(layer).cloned())
    }

    pub fn merged(&self) -> PlatformConfig {
        merge(&self.fragments())
    }

    /// Merge and record which layer supplied each populated field.
    pub fn merged_with_origins(&self) -> MergedConfig {
        let mut config = PlatformConfig::default();
        let mut origins = BTreeMap::new();

        for field in PlatformField::ALL {
            let winner = Layer::PRECEDENCE.into_iter().find_map(|layer| {
                self.layer(layer)
                    .and_then(|fragment| fragment.get(field))
                    .map(|value| (layer, value))
            });
            if let Some((layer, value)) = winner {
                config.set(field, value);
                origins.insert(field, layer);
            }
        }

        MergedConfig { config, origins }
    }
}

/// Merged platform config plus the layer each field came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedConfig {
    pub config: PlatformConfig,
    pub origins: BTreeMap<PlatformField, Layer>,
}

impl MergedConfig {
    pub fn origin(&self, field: PlatformField) -> Option<Layer> {
        self.origins.get(&field).copied()
    }
}
