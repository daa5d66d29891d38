//! Error types for devplat-config

use crate::layer::Layer;

/// Result type for devplat-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or merging configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A layer is present but its data cannot be projected into a platform config
    #[error("Malformed {layer} configuration: {message}")]
    MalformedConfig { layer: Layer, message: String },

    /// A dot-path is empty or contains an empty segment
    #[error("Invalid config path '{path}'")]
    InvalidPath { path: String },

    /// `set` walked into a scalar where a nested tree was required
    #[error("Cannot set '{path}': '{parent}' is not a tree")]
    NotATree { path: String, parent: String },

    /// Neither an override, `DEVPLAT_CONFIG_DIR`, nor a platform config dir exists
    #[error("No user config directory available")]
    NoUserConfigDir,

    /// Filesystem error from devplat-fs
    #[error(transparent)]
    Fs(#[from] devplat_fs::Error),
}
