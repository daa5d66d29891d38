//! Dev center platform integration

mod client;
mod manager;
mod model;
mod platform;
mod prompter;
mod provider;

pub use client::DevCenterClient;
pub use manager::Manager;
pub use model::{
    Catalog, DevCenter, EnvironmentDefinition, EnvironmentSummary, EnvironmentType,
    ParameterDescriptor, ParameterType, Project,
};
pub use platform::DevCenterPlatform;
pub use prompter::Prompter;
pub use provider::{DevCenterEnvironmentStore, DevCenterProvisionProvider, DevCenterTemplateSource};

/// Name under which the dev center capabilities are registered.
pub const PLATFORM_NAME: &str = "devcenter";
