//! Error types for devplat-core

use crate::devcenter::ParameterType;
use crate::registry::Namespace;

/// Result type for devplat-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in devplat-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `resolve` was asked for a key nobody registered
    #[error("Capability not found: no '{name}' implementation registered for {namespace}")]
    CapabilityNotFound { namespace: Namespace, name: String },

    /// Two factories were registered under the same key
    #[error("Duplicate registration of '{name}' for {namespace}")]
    DuplicateRegistration { namespace: Namespace, name: String },

    /// `resolve_default` was called before any default was bound
    #[error("No default implementation bound for {namespace}")]
    NoDefaultBinding { namespace: Namespace },

    /// The memoized instance is not of the requested capability type
    #[error("Capability '{name}' registered for {namespace} has an unexpected type")]
    CapabilityTypeMismatch { namespace: Namespace, name: String },

    /// User input could not be converted to the parameter's declared type
    #[error("Invalid value '{raw}' for parameter '{id}': expected {expected}")]
    ParameterCoercion {
        id: String,
        raw: String,
        expected: ParameterType,
    },

    /// A remote listing call failed
    #[error("Failed to {operation}: {message}")]
    RemoteList { operation: String, message: String },

    /// A selection flow had nothing to choose from
    #[error("No {kind} found")]
    NoCandidates { kind: String },

    /// The console returned an index outside the option list
    #[error("Selection {index} is out of range for {count} {kind}")]
    InvalidSelection {
        kind: String,
        index: usize,
        count: usize,
    },

    /// A required platform setting is still missing
    #[error("Platform setting '{field}' is not configured")]
    MissingPlatformSetting { field: String },

    /// The configured environment definition does not exist remotely
    #[error("Environment definition '{name}' not found in project '{project}'")]
    DefinitionNotFound { name: String, project: String },

    /// No template with this id is offered by the source
    #[error("Template '{id}' not found")]
    TemplateNotFound { id: String },

    /// Environment names must be non-empty and filesystem-safe
    #[error("Invalid environment name '{name}'")]
    InvalidEnvironmentName { name: String },

    /// `create` was called for an environment that already exists
    #[error("Environment '{name}' already exists")]
    EnvironmentExists { name: String },

    /// The shared cancellation token fired
    #[error("Operation cancelled")]
    Cancelled,

    /// The console failed to read input
    #[error("Console error: {0}")]
    Console(String),

    /// Configuration error from devplat-config
    #[error(transparent)]
    Config(#[from] devplat_config::Error),

    /// Filesystem error from devplat-fs
    #[error(transparent)]
    Fs(#[from] devplat_fs::Error),
}

impl Error {
    pub fn remote(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::RemoteList {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}
