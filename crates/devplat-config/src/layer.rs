//! Configuration layers and their precedence

use serde::Serialize;
use std::fmt;

/// One source of partial platform configuration.
///
/// Declaration order is precedence order: earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// `DEVCENTER_*` process environment variables
    ProcessEnvironment,
    /// `platform.config` of the selected local environment
    EnvironmentStore,
    /// `platform.config` of the project descriptor (`devplat.yaml`)
    ProjectDescriptor,
    /// `platform.config` of the user config (`<config_dir>/devplat/config.json`)
    UserDescriptor,
}

impl Layer {
    /// All layers, highest precedence first.
    pub const PRECEDENCE: [Layer; 4] = [
        Layer::ProcessEnvironment,
        Layer::EnvironmentStore,
        Layer::ProjectDescriptor,
        Layer::UserDescriptor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Layer::ProcessEnvironment => "process environment",
            Layer::EnvironmentStore => "environment store",
            Layer::ProjectDescriptor => "project descriptor",
            Layer::UserDescriptor => "user config",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
