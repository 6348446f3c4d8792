//! Dataset loading.
//!
//! The CLI consumes a JSON export of the backend's project and task
//! collections, the same records its REST API serves:
//!
//! ```json
//! {
//!   "projects": [{"id": "p-1", "name": "...", "created_at": "..."}],
//!   "tasks": [{"id": "t-1", "project_id": "p-1", "status": "pending", ...}]
//! }
//! ```
//!
//! A path of `-` reads the export from stdin. Loading is read-only; Sextant
//! never writes task data.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Project, Task};
use crate::{Error, Result};

/// A loaded export of projects and tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Dataset {
    /// Look up a project by id.
    pub fn project(&self, id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProjectNotFound(id.to_string()))
    }

    /// Tasks belonging to the given project.
    pub fn tasks_for(&self, project_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .collect()
    }
}

/// Load a dataset from a file, or stdin when `path` is `-`.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::DatasetNotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?
    };

    let dataset: Dataset = serde_json::from_str(&raw)?;
    debug!(
        projects = dataset.projects.len(),
        tasks = dataset.tasks.len(),
        "dataset loaded"
    );
    Ok(dataset)
}
