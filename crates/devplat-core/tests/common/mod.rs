//! Shared fixtures for devplat-core integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use devplat_core::devcenter::{
    Catalog, DevCenter, EnvironmentDefinition, EnvironmentSummary, EnvironmentType, Project,
};
use devplat_core::{Cancellation, Console, DevCenterClient, Error, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A scripted reply of [`MockConsole`].
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    Confirm(bool),
    Text(String),
    /// Fire the console's cancellation token, then answer anyway.
    CancelThen(Box<Answer>),
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

/// Console replaying scripted answers and recording every prompt.
///
/// Each answer is tied to a needle; a call consumes the first queued answer
/// whose needle occurs in the prompt message. An empty needle matches any
/// message.
#[derive(Default)]
pub struct MockConsole {
    answers: Mutex<VecDeque<(String, Answer)>>,
    prompts: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
    cancel: Option<Cancellation>,
}

impl MockConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: Cancellation) -> Self {
        Self {
            cancel: Some(cancel),
            ..Self::default()
        }
    }

    pub fn answer(self, needle: &str, answer: Answer) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back((needle.to_string(), answer));
        self
    }

    /// Every select/confirm/prompt message, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.prompts.lock().unwrap().push(message.to_string());
        let mut answers = self.answers.lock().unwrap();
        let position = answers
            .iter()
            .position(|(needle, _)| message.contains(needle.as_str()))
            .ok_or_else(|| Error::Console(format!("no scripted answer for '{message}'")))?;
        let (_, answer) = answers.remove(position).unwrap();

        match answer {
            Answer::CancelThen(inner) => {
                if let Some(ref cancel) = self.cancel {
                    cancel.cancel();
                }
                Ok(*inner)
            }
            other => Ok(other),
        }
    }
}

impl Console for MockConsole {
    fn select(&self, message: &str, options: &[String]) -> Result<usize> {
        match self.next(message)? {
            Answer::Select(index) => Ok(index),
            Answer::Text(text) => options
                .iter()
                .position(|o| *o == text)
                .ok_or_else(|| Error::Console(format!("'{text}' is not an option"))),
            other => Err(Error::Console(format!("select got {other:?}"))),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(value) => Ok(value),
            other => Err(Error::Console(format!("confirm got {other:?}"))),
        }
    }

    fn prompt(&self, message: &str, _default: Option<&str>) -> Result<String> {
        match self.next(message)? {
            Answer::Text(value) => Ok(value),
            other => Err(Error::Console(format!("prompt got {other:?}"))),
        }
    }

    fn message(&self, text: &str) {
        self.messages.lock().unwrap().push(text.to_string());
    }
}

pub fn dev_center(name: &str) -> DevCenter {
    DevCenter {
        name: name.to_string(),
        endpoint: format!("https://{name}.devcenter.example"),
    }
}

pub fn project(name: &str, dev_center_name: &str) -> Project {
    Project {
        name: name.to_string(),
        dev_center: dev_center(dev_center_name),
        description: None,
    }
}

pub fn definition(catalog: &str, name: &str) -> EnvironmentDefinition {
    EnvironmentDefinition {
        name: name.to_string(),
        catalog_name: catalog.to_string(),
        description: None,
        parameters: Vec::new(),
    }
}

/// In-memory dev center service.
#[derive(Default)]
pub struct StaticClient {
    pub dev_centers: Vec<DevCenter>,
    pub projects: HashMap<String, Vec<Project>>,
    pub catalogs: Vec<Catalog>,
    pub environment_types: Vec<EnvironmentType>,
    pub definitions: Vec<EnvironmentDefinition>,
    pub environments: Vec<EnvironmentSummary>,
    /// Artificial latency of `list_projects`, per dev center.
    pub delays: HashMap<String, Duration>,
    /// Dev center whose `list_projects` fails.
    pub failing_dev_center: Option<String>,
    pub list_projects_calls: AtomicUsize,
}

impl StaticClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dev center hosting `projects`.
    pub fn with_dev_center(mut self, name: &str, projects: &[&str]) -> Self {
        self.dev_centers.push(dev_center(name));
        self.projects.insert(
            name.to_string(),
            projects.iter().map(|p| project(p, name)).collect(),
        );
        self
    }

    pub fn with_catalogs(mut self, names: &[&str]) -> Self {
        self.catalogs = names
            .iter()
            .map(|n| Catalog {
                name: n.to_string(),
            })
            .collect();
        self
    }

    pub fn with_environment_types(mut self, names: &[&str]) -> Self {
        self.environment_types = names
            .iter()
            .map(|n| EnvironmentType {
                name: n.to_string(),
            })
            .collect();
        self
    }

    pub fn with_definition(mut self, definition: EnvironmentDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn with_delay(mut self, dev_center: &str, delay: Duration) -> Self {
        self.delays.insert(dev_center.to_string(), delay);
        self
    }
}

#[async_trait]
impl DevCenterClient for StaticClient {
    async fn list_dev_centers(&self) -> Result<Vec<DevCenter>> {
        Ok(self.dev_centers.clone())
    }

    async fn list_projects(&self, dev_center: &DevCenter) -> Result<Vec<Project>> {
        self.list_projects_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&dev_center.name) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_dev_center.as_deref() == Some(dev_center.name.as_str()) {
            return Err(Error::remote("list projects", "403 Forbidden"));
        }
        Ok(self
            .projects
            .get(&dev_center.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_catalogs(&self, _dev_center: &str, _project: &str) -> Result<Vec<Catalog>> {
        Ok(self.catalogs.clone())
    }

    async fn list_environment_types(
        &self,
        _dev_center: &str,
        _project: &str,
    ) -> Result<Vec<EnvironmentType>> {
        Ok(self.environment_types.clone())
    }

    async fn list_environment_definitions(
        &self,
        _dev_center: &str,
        _project: &str,
    ) -> Result<Vec<EnvironmentDefinition>> {
        Ok(self.definitions.clone())
    }

    async fn list_environments(
        &self,
        _dev_center: &str,
        _project: &str,
    ) -> Result<Vec<EnvironmentSummary>> {
        Ok(self.environments.clone())
    }
}
