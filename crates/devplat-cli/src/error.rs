//! Error types for devplat-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from devplat-core
    #[error(transparent)]
    Core(#[from] devplat_core::Error),

    /// Error from devplat-config
    #[error(transparent)]
    Config(#[from] devplat_config::Error),

    /// Error from devplat-fs
    #[error(transparent)]
    Fs(#[from] devplat_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
