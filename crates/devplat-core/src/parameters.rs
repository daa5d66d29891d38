//! Typed parameter resolution
//!
//! Each parameter of an environment definition is either adopted from the
//! environment (`provision.parameters.<id>`) or asked for interactively,
//! coerced to its declared type and persisted before moving on. A pass that
//! is interrupted part-way leaves the answered parameters behind, so the next
//! pass resumes where it stopped.

use crate::cancel::Cancellation;
use crate::console::Console;
use crate::devcenter::{EnvironmentDefinition, ParameterDescriptor, ParameterType};
use crate::environment::EnvironmentConfig;
use crate::{Error, Result};
use devplat_config::ConfigValue;
use std::collections::BTreeMap;

/// Root path of persisted parameter values.
pub const PARAMETERS_PATH: &str = "provision.parameters";

/// Resolved parameter values keyed by parameter id.
pub type ParameterValues = BTreeMap<String, ConfigValue>;

/// Path under which the value of parameter `id` is persisted.
pub fn parameter_path(id: &str) -> String {
    format!("{}.{}", PARAMETERS_PATH, id)
}

/// Convert raw user input to the descriptor's declared type.
pub fn coerce(descriptor: &ParameterDescriptor, raw: &str) -> Result<ConfigValue> {
    let invalid = || Error::ParameterCoercion {
        id: descriptor.id.clone(),
        raw: raw.to_string(),
        expected: descriptor.kind,
    };

    match descriptor.kind {
        ParameterType::String => Ok(ConfigValue::String(raw.to_string())),
        ParameterType::Int => raw.parse::<i64>().map(ConfigValue::Int).map_err(|_| invalid()),
        ParameterType::Bool => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" => Ok(ConfigValue::Bool(true)),
            "false" | "no" | "n" => Ok(ConfigValue::Bool(false)),
            _ => Err(invalid()),
        },
    }
}

/// Prompts for and persists the parameters of one environment definition.
pub struct ParameterResolver<'a> {
    console: &'a dyn Console,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(console: &'a dyn Console) -> Self {
        Self { console }
    }

    /// Resolve every parameter of `definition`, in declared order.
    ///
    /// Returns one value per descriptor. On success the environment holds
    /// all of them, so an immediate second call prompts nothing.
    pub fn resolve(
        &self,
        env: &mut dyn EnvironmentConfig,
        definition: &EnvironmentDefinition,
        cancel: &Cancellation,
    ) -> Result<ParameterValues> {
        let mut values = ParameterValues::new();

        for descriptor in &definition.parameters {
            let path = parameter_path(&descriptor.id);
            if let Some(existing) = env.get(&path) {
                tracing::debug!(parameter = %descriptor.id, "Using persisted parameter value");
                values.insert(descriptor.id.clone(), existing);
                continue;
            }

            tracing::debug!(parameter = %descriptor.id, "Prompting for parameter");
            let value = self.ask(descriptor, cancel)?;
            cancel.check()?;

            env.set(&path, value.clone())?;
            values.insert(descriptor.id.clone(), value);
        }

        Ok(values)
    }

    /// Ask until the answer coerces, reporting each rejected answer.
    fn ask(&self, descriptor: &ParameterDescriptor, cancel: &Cancellation) -> Result<ConfigValue> {
        let message = format!("Enter a value for {}", descriptor.display_name());

        loop {
            cancel.check()?;

            let raw = match descriptor.kind {
                ParameterType::Bool => {
                    let default = descriptor
                        .default
                        .as_ref()
                        .and_then(default_bool)
                        .unwrap_or(false);
                    return Ok(ConfigValue::Bool(self.console.confirm(&message, default)?));
                }
                _ if !descriptor.allowed.is_empty() => {
                    let index = self.console.select(&message, &descriptor.allowed)?;
                    descriptor.allowed.get(index).cloned().ok_or_else(|| {
                        Error::InvalidSelection {
                            kind: format!("values for {}", descriptor.id),
                            index,
                            count: descriptor.allowed.len(),
                        }
                    })?
                }
                _ => {
                    let default = descriptor.default.as_ref().map(ConfigValue::to_string);
                    let answer = self.console.prompt(&message, default.as_deref())?;
                    match default {
                        Some(default) if answer.is_empty() => default,
                        _ => answer,
                    }
                }
            };

            match coerce(descriptor, &raw) {
                Ok(value) => return Ok(value),
                Err(e @ Error::ParameterCoercion { .. }) => {
                    tracing::warn!(parameter = %descriptor.id, raw = %raw, "Rejected parameter value");
                    self.console.message(&e.to_string());
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn default_bool(value: &ConfigValue) -> Option<bool> {
    match value {
        ConfigValue::Bool(b) => Some(*b),
        ConfigValue::String(s) => s.parse().ok(),
        _ => None,
    }
}
