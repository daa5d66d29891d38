//! Snapshot of process environment variables

use crate::platform::{PlatformConfig, PlatformField};
use std::collections::HashMap;
use std::ffi::OsString;

/// Environment variable overriding the user config directory.
pub const CONFIG_DIR_ENV: &str = "DEVPLAT_CONFIG_DIR";

/// Read-only view of environment variables.
///
/// Captured once so that every merge in a process sees the same values, and so
/// tests can supply variables without touching the real process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
    vars: HashMap<String, String>,
}

impl EnvironmentVariables {
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Keep the pairs whose name and value are both valid UTF-8.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = pairs
            .into_iter()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (name, _) => {
                    let name = match name {
                        Ok(name) => name,
                        Err(raw) => raw.to_string_lossy().into_owned(),
                    };
                    tracing::debug!(variable = %name, "Skipping non UTF-8 environment variable");
                    None
                }
            })
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Platform config fragment from the `DEVCENTER_*` variables.
    ///
    /// `None` when no variable is set to a non-empty value.
    pub fn platform_fragment(&self) -> Option<PlatformConfig> {
        let mut config = PlatformConfig::default();
        for field in PlatformField::ALL {
            if let Some(value) = self.get(field.env_var()).filter(|v| !v.is_empty()) {
                config.set(field, value);
            }
        }
        (!config.is_empty()).then_some(config)
    }
}
