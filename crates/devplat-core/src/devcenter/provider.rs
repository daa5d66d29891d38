//! Dev center implementations of the platform capabilities

use super::model::{EnvironmentDefinition, EnvironmentSummary};
use super::prompter::Prompter;
use super::PLATFORM_NAME;
use crate::cancel::Cancellation;
use crate::capabilities::{
    ProvisionPlan, ProvisionProvider, RemoteEnvironmentStore, Template, TemplateSource,
};
use crate::environment::{EnvironmentConfig, persist_platform_fields};
use crate::{Error, Result};
use async_trait::async_trait;
use devplat_config::{LayeredConfig, PlatformConfig, PlatformField};

fn require(config: &PlatformConfig, field: PlatformField) -> Result<&str> {
    config.get(field).ok_or_else(|| Error::MissingPlatformSetting {
        field: field.key().to_string(),
    })
}

/// Provisions environments from dev center environment definitions.
#[derive(Debug)]
pub struct DevCenterProvisionProvider {
    layers: LayeredConfig,
    prompter: Prompter,
}

impl DevCenterProvisionProvider {
    pub fn new(layers: LayeredConfig, prompter: Prompter) -> Self {
        Self { layers, prompter }
    }

    /// Merged settings for `env`.
    ///
    /// The environment's own `platform.config` fills the environment-store
    /// slot, so any environment ranks between the process environment and
    /// the project descriptor.
    fn effective_config(&self, env: &dyn EnvironmentConfig) -> Result<PlatformConfig> {
        let layers = LayeredConfig {
            environment_store: env.platform_config()?,
            ..self.layers.clone()
        };
        Ok(layers.merged())
    }

    async fn find_definition(
        &self,
        config: &PlatformConfig,
        cancel: &Cancellation,
    ) -> Result<EnvironmentDefinition> {
        let dev_center = require(config, PlatformField::Name)?;
        let project = require(config, PlatformField::Project)?;
        let name = require(config, PlatformField::EnvironmentDefinition)?;
        let catalog = config.get(PlatformField::Catalog);

        let client = self.prompter.manager().client();
        let definitions = cancel
            .run(client.list_environment_definitions(dev_center, project))
            .await?;

        definitions
            .into_iter()
            .find(|d| d.name == name && catalog.is_none_or(|c| d.catalog_name == c))
            .ok_or_else(|| Error::DefinitionNotFound {
                name: name.to_string(),
                project: project.to_string(),
            })
    }
}

#[async_trait]
impl ProvisionProvider for DevCenterProvisionProvider {
    fn name(&self) -> &str {
        PLATFORM_NAME
    }

    async fn plan(
        &self,
        env: &mut dyn EnvironmentConfig,
        cancel: &Cancellation,
    ) -> Result<ProvisionPlan> {
        let mut config = self.effective_config(env)?;

        let filled = self.prompter.complete_config(&mut config, cancel).await?;
        if !filled.is_empty() {
            tracing::debug!(environment = %env.name(), ?filled, "Persisting selected platform settings");
            persist_platform_fields(env, &config, &filled)?;
        }

        let definition = self.find_definition(&config, cancel).await?;
        let parameters = self.prompter.prompt_parameters(env, &definition, cancel)?;

        Ok(ProvisionPlan {
            environment: env.name().to_string(),
            platform: config,
            definition,
            parameters,
        })
    }
}

/// Offers environment definitions as templates.
#[derive(Debug)]
pub struct DevCenterTemplateSource {
    config: PlatformConfig,
    prompter: Prompter,
}

impl DevCenterTemplateSource {
    pub fn new(config: PlatformConfig, prompter: Prompter) -> Self {
        Self { config, prompter }
    }
}

#[async_trait]
impl TemplateSource for DevCenterTemplateSource {
    fn name(&self) -> &str {
        PLATFORM_NAME
    }

    /// Definitions of the configured project, or of every writable project
    /// when none is configured. Sorted by id, duplicates dropped.
    async fn list_templates(&self, cancel: &Cancellation) -> Result<Vec<Template>> {
        let manager = self.prompter.manager();
        let client = manager.client();

        let scopes = match (
            self.config.get(PlatformField::Name),
            self.config.get(PlatformField::Project),
        ) {
            (Some(dev_center), Some(project)) => vec![(dev_center.to_string(), project.to_string())],
            _ => manager
                .writable_projects(cancel)
                .await?
                .into_iter()
                .map(|p| (p.dev_center.name, p.name))
                .collect(),
        };

        let mut definitions = Vec::new();
        for (dev_center, project) in &scopes {
            definitions.extend(
                cancel
                    .run(client.list_environment_definitions(dev_center, project))
                    .await?,
            );
        }

        if let Some(catalog) = self.config.get(PlatformField::Catalog) {
            definitions.retain(|d| d.catalog_name == catalog);
        }

        let mut templates: Vec<Template> = definitions
            .into_iter()
            .map(|d| Template {
                id: format!("{}/{}", d.catalog_name, d.name),
                name: d.name,
                description: d.description,
                source: PLATFORM_NAME.to_string(),
            })
            .collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates.dedup_by(|a, b| a.id == b.id);
        Ok(templates)
    }
}

/// Lists environments deployed in the configured project.
#[derive(Debug)]
pub struct DevCenterEnvironmentStore {
    config: PlatformConfig,
    prompter: Prompter,
}

impl DevCenterEnvironmentStore {
    pub fn new(config: PlatformConfig, prompter: Prompter) -> Self {
        Self { config, prompter }
    }
}

#[async_trait]
impl RemoteEnvironmentStore for DevCenterEnvironmentStore {
    fn name(&self) -> &str {
        PLATFORM_NAME
    }

    /// Only environments owned by the configured user, when one is set.
    async fn list(&self, cancel: &Cancellation) -> Result<Vec<EnvironmentSummary>> {
        let dev_center = require(&self.config, PlatformField::Name)?;
        let project = require(&self.config, PlatformField::Project)?;

        let client = self.prompter.manager().client();
        let mut environments = cancel
            .run(client.list_environments(dev_center, project))
            .await?;

        if let Some(user) = self.config.get(PlatformField::User) {
            environments.retain(|e| e.user.as_deref() == Some(user));
        }
        Ok(environments)
    }
}
