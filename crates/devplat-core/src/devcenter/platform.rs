//! Registration of the dev center platform

use super::PLATFORM_NAME;
use super::client::DevCenterClient;
use super::manager::Manager;
use super::prompter::Prompter;
use super::provider::{DevCenterEnvironmentStore, DevCenterProvisionProvider, DevCenterTemplateSource};
use crate::Result;
use crate::capabilities::{ProvisionProvider, RemoteEnvironmentStore, TemplateSource};
use crate::console::Console;
use crate::registry::{CapabilityRegistry, Namespace};
use devplat_config::PlatformConfigResolver;
use std::sync::Arc;

/// The dev center platform: enablement check plus capability wiring.
#[derive(Debug, Clone)]
pub struct DevCenterPlatform {
    resolver: PlatformConfigResolver,
}

impl DevCenterPlatform {
    pub fn new(resolver: PlatformConfigResolver) -> Self {
        Self { resolver }
    }

    pub fn name(&self) -> &'static str {
        PLATFORM_NAME
    }

    pub fn is_enabled(&self) -> bool {
        self.resolver.is_enabled()
    }

    /// Register the `devcenter` provisioning provider, template source and
    /// remote environment store, and bind them as their namespaces' defaults.
    ///
    /// Nothing is constructed here. Each factory resolves the platform config
    /// when its capability is first used.
    pub fn configure(
        &self,
        registry: &CapabilityRegistry,
        console: Arc<dyn Console>,
        client: Arc<dyn DevCenterClient>,
    ) -> Result<()> {
        let prompter = Prompter::new(console, Manager::new(client));

        let (resolver, shared) = (self.resolver.clone(), prompter.clone());
        registry.register_named::<dyn ProvisionProvider, _>(PLATFORM_NAME, move || {
            let provider: Arc<dyn ProvisionProvider> = Arc::new(DevCenterProvisionProvider::new(
                resolver.load_layers()?,
                shared.clone(),
            ));
            Ok(provider)
        })?;

        let (resolver, shared) = (self.resolver.clone(), prompter.clone());
        registry.register_named::<dyn TemplateSource, _>(PLATFORM_NAME, move || {
            let source: Arc<dyn TemplateSource> =
                Arc::new(DevCenterTemplateSource::new(resolver.resolve()?, shared.clone()));
            Ok(source)
        })?;

        let resolver = self.resolver.clone();
        registry.register_named::<dyn RemoteEnvironmentStore, _>(PLATFORM_NAME, move || {
            let store: Arc<dyn RemoteEnvironmentStore> =
                Arc::new(DevCenterEnvironmentStore::new(resolver.resolve()?, prompter.clone()));
            Ok(store)
        })?;

        for namespace in [
            Namespace::PROVISIONING_PROVIDER,
            Namespace::TEMPLATE_SOURCE,
            Namespace::REMOTE_ENVIRONMENT_STORE,
        ] {
            registry.bind_default(namespace, PLATFORM_NAME);
        }

        tracing::debug!("Configured devcenter platform");
        Ok(())
    }
}
