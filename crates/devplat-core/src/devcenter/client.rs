//! Remote lister of dev center resources

use super::model::{
    Catalog, DevCenter, EnvironmentDefinition, EnvironmentSummary, EnvironmentType, Project,
};
use crate::Result;
use async_trait::async_trait;

/// Read-only access to a dev center service.
///
/// Failures are reported as [`crate::Error::RemoteList`]. Callers never retry;
/// the order of each returned list is shown to the user as-is.
#[async_trait]
pub trait DevCenterClient: Send + Sync {
    async fn list_dev_centers(&self) -> Result<Vec<DevCenter>>;

    /// Projects of `dev_center` the current user may deploy into.
    async fn list_projects(&self, dev_center: &DevCenter) -> Result<Vec<Project>>;

    async fn list_catalogs(&self, dev_center: &str, project: &str) -> Result<Vec<Catalog>>;

    async fn list_environment_types(
        &self,
        dev_center: &str,
        project: &str,
    ) -> Result<Vec<EnvironmentType>>;

    async fn list_environment_definitions(
        &self,
        dev_center: &str,
        project: &str,
    ) -> Result<Vec<EnvironmentDefinition>>;

    async fn list_environments(
        &self,
        dev_center: &str,
        project: &str,
    ) -> Result<Vec<EnvironmentSummary>>;
}
