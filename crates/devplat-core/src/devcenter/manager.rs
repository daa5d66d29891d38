//! Aggregate queries over a [`DevCenterClient`]

use super::client::DevCenterClient;
use super::model::{DevCenter, Project};
use crate::cancel::Cancellation;
use crate::{Error, Result};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Cross-dev-center views built from the raw lister.
#[derive(Clone)]
pub struct Manager {
    client: Arc<dyn DevCenterClient>,
}

impl Manager {
    pub fn new(client: Arc<dyn DevCenterClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<dyn DevCenterClient> {
        &self.client
    }

    /// Every project the user can deploy into, across all dev centers.
    ///
    /// Dev centers are queried concurrently. The result is sorted by project
    /// name, then dev center name, whatever order the calls finish in.
    pub async fn writable_projects(&self, cancel: &Cancellation) -> Result<Vec<Project>> {
        let dev_centers = cancel.run(self.client.list_dev_centers()).await?;
        tracing::debug!(count = dev_centers.len(), "Listing projects across dev centers");

        let mut tasks = JoinSet::new();
        for dev_center in dev_centers {
            let client = Arc::clone(&self.client);
            tasks.spawn(async move { client.list_projects(&dev_center).await });
        }

        // Dropping the set on cancellation aborts the outstanding calls
        let mut projects = cancel
            .run(async move {
                let mut projects = Vec::new();
                while let Some(joined) = tasks.join_next().await {
                    let batch = joined.map_err(|e| Error::remote("list projects", e))??;
                    projects.extend(batch);
                }
                Ok(projects)
            })
            .await?;

        projects.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.dev_center.name.cmp(&b.dev_center.name))
        });
        Ok(projects)
    }

    /// Writable projects hosted by the dev center named `dev_center`.
    pub async fn writable_projects_in(
        &self,
        dev_center: &str,
        cancel: &Cancellation,
    ) -> Result<Vec<Project>> {
        let mut projects = self.writable_projects(cancel).await?;
        projects.retain(|p| p.dev_center.name == dev_center);
        Ok(projects)
    }

    /// Dev centers hosting at least one writable project, sorted by name.
    pub async fn dev_centers_with_projects(&self, cancel: &Cancellation) -> Result<Vec<DevCenter>> {
        let mut dev_centers: Vec<DevCenter> = Vec::new();
        for project in self.writable_projects(cancel).await? {
            if !dev_centers.iter().any(|d| d.name == project.dev_center.name) {
                dev_centers.push(project.dev_center);
            }
        }
        dev_centers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(dev_centers)
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager").finish_non_exhaustive()
    }
}
