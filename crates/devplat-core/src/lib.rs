//! Core services of devplat
//!
//! - **Registry**: named, lazily constructed capability implementations
//! - **Environments**: named config trees persisted under `.devplat/`
//! - **Parameters**: typed prompting for environment definition inputs
//! - **Dev center**: remote lister, selection prompts and the platform's
//!   capability implementations
//!
//! # Example
//!
//! ```ignore
//! use devplat_core::{CapabilityRegistry, DevCenterPlatform, ProvisionProvider};
//!
//! let registry = CapabilityRegistry::new();
//! DevCenterPlatform::new(resolver).configure(&registry, console, client)?;
//! let provider = registry.resolve_default::<dyn ProvisionProvider>()?;
//! let plan = provider.plan(&mut env, &cancel).await?;
//! ```

pub mod cancel;
pub mod capabilities;
pub mod console;
pub mod devcenter;
pub mod environment;
pub mod error;
pub mod parameters;
pub mod registry;

pub use cancel::Cancellation;
pub use capabilities::{
    ProvisionPlan, ProvisionProvider, RemoteEnvironmentStore, Template, TemplateSource,
};
pub use console::Console;
pub use devcenter::{DevCenterClient, DevCenterPlatform, Manager, Prompter};
pub use environment::{Environment, EnvironmentConfig};
pub use error::{Error, Result};
pub use parameters::{ParameterResolver, ParameterValues, coerce, parameter_path};
pub use registry::{Capability, CapabilityRegistry, Namespace};
