//! Layered platform configuration for devplat
//!
//! This crate turns several partial configuration sources into one effective
//! [`PlatformConfig`]:
//!
//! - **Config tree**: path-addressed nested values shared by every layer
//! - **Layers**: process environment, environment store, project descriptor,
//!   user config
//! - **Merger**: field-wise, first-non-empty-wins merge in precedence order
//! - **Resolver**: loads each layer from disk and merges them
//!
//! # Example
//!
//! ```ignore
//! use devplat_config::{PlatformConfigResolver, ProjectLayout};
//!
//! let layout = ProjectLayout::find(&std::env::current_dir()?);
//! let config = PlatformConfigResolver::new(layout).resolve()?;
//! println!("project: {:?}", config.project);
//! ```

pub mod env;
pub mod error;
pub mod layer;
pub mod layout;
pub mod merge;
pub mod platform;
pub mod resolver;
pub mod tree;

pub use env::EnvironmentVariables;
pub use error::{Error, Result};
pub use layer::Layer;
pub use layout::{PlatformSection, ProjectDescriptor, ProjectLayout};
pub use merge::{LayeredConfig, MergedConfig, merge};
pub use platform::{
    PLATFORM_CONFIG_PATH, PLATFORM_KIND_DEVCENTER, PLATFORM_TYPE_PATH, PlatformConfig,
    PlatformField,
};
pub use resolver::PlatformConfigResolver;
pub use tree::{ConfigTree, ConfigValue};
