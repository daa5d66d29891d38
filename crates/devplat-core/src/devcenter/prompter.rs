//! Interactive selection of dev center resources and parameters

use super::manager::Manager;
use super::model::{Catalog, DevCenter, EnvironmentDefinition, EnvironmentType, Project};
use crate::cancel::Cancellation;
use crate::console::Console;
use crate::environment::EnvironmentConfig;
use crate::parameters::{ParameterResolver, ParameterValues};
use crate::{Error, Result};
use devplat_config::{PlatformConfig, PlatformField};
use std::sync::Arc;

/// Walks the user through choosing dev center resources.
///
/// Each selection lists candidates remotely, shows them in the lister's
/// order and maps the chosen index back to the candidate.
#[derive(Clone)]
pub struct Prompter {
    console: Arc<dyn Console>,
    manager: Manager,
}

impl Prompter {
    pub fn new(console: Arc<dyn Console>, manager: Manager) -> Self {
        Self { console, manager }
    }

    pub fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub async fn prompt_dev_center(&self, cancel: &Cancellation) -> Result<DevCenter> {
        let dev_centers = self.manager.dev_centers_with_projects(cancel).await?;
        self.choose("dev centers", "Select a Dev Center", dev_centers, |d| d.name.clone(), cancel)
    }

    pub async fn prompt_project(&self, dev_center: &str, cancel: &Cancellation) -> Result<Project> {
        let projects = self.manager.writable_projects_in(dev_center, cancel).await?;
        self.choose("projects", "Select a project", projects, |p| p.name.clone(), cancel)
    }

    pub async fn prompt_catalog(
        &self,
        dev_center: &str,
        project: &str,
        cancel: &Cancellation,
    ) -> Result<Catalog> {
        let client = self.manager.client();
        let catalogs = cancel.run(client.list_catalogs(dev_center, project)).await?;
        self.choose("catalogs", "Select a catalog", catalogs, |c| c.name.clone(), cancel)
    }

    pub async fn prompt_environment_type(
        &self,
        dev_center: &str,
        project: &str,
        cancel: &Cancellation,
    ) -> Result<EnvironmentType> {
        let client = self.manager.client();
        let types = cancel
            .run(client.list_environment_types(dev_center, project))
            .await?;
        self.choose(
            "environment types",
            "Select an environment type",
            types,
            |t| t.name.clone(),
            cancel,
        )
    }

    /// Pick an environment definition, limited to `catalog` when given.
    pub async fn prompt_environment_definition(
        &self,
        dev_center: &str,
        project: &str,
        catalog: Option<&str>,
        cancel: &Cancellation,
    ) -> Result<EnvironmentDefinition> {
        let client = self.manager.client();
        let mut definitions = cancel
            .run(client.list_environment_definitions(dev_center, project))
            .await?;
        if let Some(catalog) = catalog {
            definitions.retain(|d| d.catalog_name == catalog);
        }
        self.choose(
            "environment definitions",
            "Select an environment definition",
            definitions,
            |d| d.name.clone(),
            cancel,
        )
    }

    /// Resolve the parameters of `definition` against `env`.
    pub fn prompt_parameters(
        &self,
        env: &mut dyn EnvironmentConfig,
        definition: &EnvironmentDefinition,
        cancel: &Cancellation,
    ) -> Result<ParameterValues> {
        ParameterResolver::new(self.console.as_ref()).resolve(env, definition, cancel)
    }

    /// Fill the unset selectable fields of `config` by prompting.
    ///
    /// Returns the fields that were filled, in prompt order. `user` is never
    /// prompted for.
    pub async fn complete_config(
        &self,
        config: &mut PlatformConfig,
        cancel: &Cancellation,
    ) -> Result<Vec<PlatformField>> {
        let mut filled = Vec::new();

        let dev_center = match config.get(PlatformField::Name) {
            Some(name) => name.to_string(),
            None => {
                let chosen = self.prompt_dev_center(cancel).await?.name;
                config.set(PlatformField::Name, chosen.clone());
                filled.push(PlatformField::Name);
                chosen
            }
        };

        let project = match config.get(PlatformField::Project) {
            Some(name) => name.to_string(),
            None => {
                let chosen = self.prompt_project(&dev_center, cancel).await?.name;
                config.set(PlatformField::Project, chosen.clone());
                filled.push(PlatformField::Project);
                chosen
            }
        };

        if config.get(PlatformField::Catalog).is_none() {
            let chosen = self.prompt_catalog(&dev_center, &project, cancel).await?;
            config.set(PlatformField::Catalog, chosen.name);
            filled.push(PlatformField::Catalog);
        }

        if config.get(PlatformField::EnvironmentType).is_none() {
            let chosen = self
                .prompt_environment_type(&dev_center, &project, cancel)
                .await?;
            config.set(PlatformField::EnvironmentType, chosen.name);
            filled.push(PlatformField::EnvironmentType);
        }

        if config.get(PlatformField::EnvironmentDefinition).is_none() {
            let catalog = config.get(PlatformField::Catalog).map(str::to_string);
            let chosen = self
                .prompt_environment_definition(&dev_center, &project, catalog.as_deref(), cancel)
                .await?;
            config.set(PlatformField::EnvironmentDefinition, chosen.name);
            filled.push(PlatformField::EnvironmentDefinition);
        }

        Ok(filled)
    }

    fn choose<T>(
        &self,
        kind: &str,
        message: &str,
        candidates: Vec<T>,
        label: impl Fn(&T) -> String,
        cancel: &Cancellation,
    ) -> Result<T> {
        if candidates.is_empty() {
            return Err(Error::NoCandidates {
                kind: kind.to_string(),
            });
        }

        cancel.check()?;
        let options: Vec<String> = candidates.iter().map(label).collect();
        let index = self.console.select(message, &options)?;
        cancel.check()?;

        let count = candidates.len();
        candidates
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::InvalidSelection {
                kind: kind.to_string(),
                index,
                count,
            })
    }
}

impl std::fmt::Debug for Prompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompter").finish_non_exhaustive()
    }
}
