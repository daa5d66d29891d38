//! Filesystem storage for devplat
//!
//! Provides format-agnostic config loading and crash-safe writes. Every
//! persisted config file (user config, project descriptor, environment
//! stores) goes through [`ConfigStore`].

pub mod config;
pub mod error;
pub mod io;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result};
