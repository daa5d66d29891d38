//! Offline dev center service backed by a JSON snapshot
//!
//! ```json
//! {
//!   "devCenters": [{
//!     "name": "contoso",
//!     "endpoint": "https://contoso.devcenter.example",
//!     "projects": [{
//!       "name": "web",
//!       "catalogs": ["main"],
//!       "environmentTypes": ["Dev", "Prod"],
//!       "environmentDefinitions": [{
//!         "name": "WebApp",
//!         "catalogName": "main",
//!         "parameters": [{ "id": "replicas", "name": "Replicas", "type": "int" }]
//!       }],
//!       "environments": []
//!     }]
//!   }]
//! }
//! ```

use async_trait::async_trait;
use devplat_core::devcenter::{
    Catalog, DevCenter, EnvironmentDefinition, EnvironmentSummary, EnvironmentType, Project,
};
use devplat_core::{DevCenterClient, Error, Result};
use devplat_fs::ConfigStore;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub dev_centers: Vec<DevCenterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevCenterEntry {
    pub name: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Projects the user cannot deploy into are hidden from selection
    #[serde(default = "writable_default")]
    pub writable: bool,
    #[serde(default)]
    pub catalogs: Vec<String>,
    #[serde(default)]
    pub environment_types: Vec<String>,
    #[serde(default)]
    pub environment_definitions: Vec<EnvironmentDefinition>,
    #[serde(default)]
    pub environments: Vec<EnvironmentSummary>,
}

fn writable_default() -> bool {
    true
}

/// [`DevCenterClient`] answering from a [`CatalogSnapshot`].
#[derive(Debug, Clone)]
pub struct FileDevCenterClient {
    snapshot: CatalogSnapshot,
}

impl FileDevCenterClient {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file (JSON, YAML or TOML by extension).
    pub fn load(path: &Path) -> Result<Self> {
        let snapshot = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path.display(), "Loaded dev center catalog");
        Ok(Self::new(snapshot))
    }

    fn dev_center(&self, name: &str, operation: &str) -> Result<&DevCenterEntry> {
        self.snapshot
            .dev_centers
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::remote(operation, format!("dev center '{name}' not found")))
    }

    fn project(&self, dev_center: &str, project: &str, operation: &str) -> Result<&ProjectEntry> {
        self.dev_center(dev_center, operation)?
            .projects
            .iter()
            .find(|p| p.name == project)
            .ok_or_else(|| {
                Error::remote(
                    operation,
                    format!("project '{project}' not found in dev center '{dev_center}'"),
                )
            })
    }
}

impl DevCenterEntry {
    fn summary(&self) -> DevCenter {
        DevCenter {
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

#[async_trait]
impl DevCenterClient for FileDevCenterClient {
    async fn list_dev_centers(&self) -> Result<Vec<DevCenter>> {
        Ok(self
            .snapshot
            .dev_centers
            .iter()
            .map(DevCenterEntry::summary)
            .collect())
    }

    async fn list_projects(&self, dev_center: &DevCenter) -> Result<Vec<Project>> {
        let entry = self.dev_center(&dev_center.name, "list projects")?;
        Ok(entry
            .projects
            .iter()
            .filter(|p| p.writable)
            .map(|p| Project {
                name: p.name.clone(),
                dev_center: entry.summary(),
                description: p.description.clone(),
            })
            .collect())
    }

    async fn list_catalogs(&self, dev_center: &str, project: &str) -> Result<Vec<Catalog>> {
        let entry = self.project(dev_center, project, "list catalogs")?;
        Ok(entry
            .catalogs
            .iter()
            .map(|name| Catalog { name: name.clone() })
            .collect())
    }

    async fn list_environment_types(
        &self,
        dev_center: &str,
        project: &str,
    ) -> Result<Vec<EnvironmentType>> {
        let entry = self.project(dev_center, project, "list environment types")?;
        Ok(entry
            .environment_types
            .iter()
            .map(|name| EnvironmentType { name: name.clone() })
            .collect())
    }

    async fn list_environment_definitions(
        &self,
        dev_center: &str,
        project: &str,
    ) -> Result<Vec<EnvironmentDefinition>> {
        let entry = self.project(dev_center, project, "list environment definitions")?;
        Ok(entry.environment_definitions.clone())
    }

    async fn list_environments(
        &self,
        dev_center: &str,
        project: &str,
    ) -> Result<Vec<EnvironmentSummary>> {
        let entry = self.project(dev_center, project, "list environments")?;
        Ok(entry.environments.clone())
    }
}
