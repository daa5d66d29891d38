//! Capability traits resolved through the [`CapabilityRegistry`]
//!
//! [`CapabilityRegistry`]: crate::registry::CapabilityRegistry

use crate::Result;
use crate::cancel::Cancellation;
use crate::devcenter::{EnvironmentDefinition, EnvironmentSummary};
use crate::environment::EnvironmentConfig;
use crate::parameters::ParameterValues;
use crate::registry::{Capability, Namespace};
use async_trait::async_trait;
use devplat_config::PlatformConfig;
use serde::Serialize;

/// Everything needed to deploy one environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionPlan {
    pub environment: String,
    pub platform: PlatformConfig,
    pub definition: EnvironmentDefinition,
    pub parameters: ParameterValues,
}

/// Prepares deployments of an environment.
#[async_trait]
pub trait ProvisionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Complete the platform settings and parameters of `env`.
    ///
    /// Choices made interactively are persisted to `env`.
    async fn plan(
        &self,
        env: &mut dyn EnvironmentConfig,
        cancel: &Cancellation,
    ) -> Result<ProvisionPlan>;
}

impl Capability for dyn ProvisionProvider {
    const NAMESPACE: Namespace = Namespace::PROVISIONING_PROVIDER;
}

/// A template offered by a [`TemplateSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// `<catalog>/<definition>`
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: String,
}

/// Lists the templates new projects can start from.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    fn name(&self) -> &str;

    async fn list_templates(&self, cancel: &Cancellation) -> Result<Vec<Template>>;

    /// Fails with [`crate::Error::TemplateNotFound`] for unknown ids.
    async fn get_template(&self, id: &str, cancel: &Cancellation) -> Result<Template> {
        self.list_templates(cancel)
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| crate::Error::TemplateNotFound { id: id.to_string() })
    }
}

impl Capability for dyn TemplateSource {
    const NAMESPACE: Namespace = Namespace::TEMPLATE_SOURCE;
}

/// Remote counterpart of the local environment list.
#[async_trait]
pub trait RemoteEnvironmentStore: Send + Sync {
    fn name(&self) -> &str;

    async fn list(&self, cancel: &Cancellation) -> Result<Vec<EnvironmentSummary>>;
}

impl Capability for dyn RemoteEnvironmentStore {
    const NAMESPACE: Namespace = Namespace::REMOTE_ENVIRONMENT_STORE;
}
