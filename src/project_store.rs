use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Message, Project};

#[derive(Debug, Default)]
struct StoreInner {
    projects: Vec<Project>,
    messages: HashMap<String, Vec<Message>>,
}

/// In-memory projects and their message history, shared across workers.
///
/// Projects and their message slots are created under one lock, and appends
/// happen under one lock acquisition, so a reader never sees a partial batch.
#[derive(Debug, Default)]
pub struct ProjectStore {
    inner: Mutex<StoreInner>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Get all projects in insertion order
    pub fn list_projects(&self) -> Vec<Project> {
        self.inner.lock().projects.clone()
    }

    // Create a project, naming it "Project N" when no name is given
    pub fn create_project(&self, name: Option<String>) -> Project {
        let mut inner = self.inner.lock();
        let name = name.unwrap_or_else(|| format!("Project {}", inner.projects.len() + 1));
        let project = Project::new(name);

        inner.projects.push(project.clone());
        inner.messages.insert(project.id.clone(), Vec::new());
        debug!("Created project {} ({})", project.id, project.name);
        project
    }

    /// Messages for a project; unknown ids yield an empty list.
    pub fn list_messages(&self, project_id: &str) -> Vec<Message> {
        self.inner
            .lock()
            .messages
            .get(project_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Append entries in order. Unknown ids are ignored; returns whether anything was stored.
    pub fn append_messages(&self, project_id: &str, entries: Vec<Message>) -> bool {
        let mut inner = self.inner.lock();
        match inner.messages.get_mut(project_id) {
            Some(history) => {
                history.extend(entries);
                true
            }
            None => false,
        }
    }
}
