//! Project context of one CLI invocation

use crate::error::{CliError, Result};
use devplat_config::{PlatformConfigResolver, ProjectLayout};
use std::path::{Path, PathBuf};

/// Where the command runs and which environment it targets.
#[derive(Debug, Clone)]
pub struct Context {
    cwd: PathBuf,
    layout: Option<ProjectLayout>,
    environment: Option<String>,
}

impl Context {
    /// Detect the project containing `cwd`, if any.
    pub fn detect(cwd: PathBuf, environment: Option<String>) -> Self {
        let layout = ProjectLayout::find(&cwd);
        Self {
            cwd,
            layout,
            environment,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn layout(&self) -> Option<&ProjectLayout> {
        self.layout.as_ref()
    }

    /// The detected project, or an error telling the user to create one.
    pub fn require_layout(&self) -> Result<&ProjectLayout> {
        self.layout.as_ref().ok_or_else(|| {
            CliError::user(format!(
                "No devplat project found in {} or its parents. Run 'devplat env new <name>' to start one.",
                self.cwd.display()
            ))
        })
    }

    /// Layout to create new state in: the detected project, else `cwd`.
    pub fn layout_or_cwd(&self) -> ProjectLayout {
        self.layout
            .clone()
            .unwrap_or_else(|| ProjectLayout::new(&self.cwd))
    }

    /// The environment given on the command line, else the project default.
    pub fn selected_environment(&self) -> Result<Option<String>> {
        if let Some(ref name) = self.environment {
            return Ok(Some(name.clone()));
        }
        match self.layout {
            Some(ref layout) => Ok(layout.default_environment()?),
            None => Ok(None),
        }
    }

    /// Like [`Context::selected_environment`] but required.
    pub fn require_environment(&self) -> Result<String> {
        self.selected_environment()?.ok_or_else(|| {
            CliError::user(
                "No environment selected. Pass --environment or run 'devplat env select <name>'.",
            )
        })
    }

    /// Resolver over the layers visible from this context.
    pub fn resolver(&self) -> PlatformConfigResolver {
        let resolver = PlatformConfigResolver::new(self.layout.clone());
        match self.environment {
            Some(ref name) => resolver.with_environment(name.clone()),
            None => resolver,
        }
    }
}
