//! `ProjectRepository` backed by an in-process map.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{Project, ProjectKey, ProjectName};

/// Projects keyed by [`ProjectKey`].
///
/// `insert` checks key and name uniqueness under the write lock, so two
/// concurrent creations of the same key cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<BTreeMap<ProjectKey, Project>>,
}

fn poisoned() -> ProjectRepositoryError {
    ProjectRepositoryError::query("project store lock poisoned")
}

impl InMemoryProjectRepository {
    /// Create a store holding `projects`. Later duplicates are dropped.
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let mut map = BTreeMap::new();
        for project in projects {
            map.entry(project.key.clone()).or_insert(project);
        }
        Self {
            projects: RwLock::new(map),
        }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let guard = self.projects.read().map_err(|_| poisoned())?;
        Ok(guard.values().cloned().collect())
    }

    async fn find_by_key(
        &self,
        key: &ProjectKey,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let guard = self.projects.read().map_err(|_| poisoned())?;
        Ok(guard.get(key).cloned())
    }

    async fn find_by_name(
        &self,
        name: &ProjectName,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let guard = self.projects.read().map_err(|_| poisoned())?;
        Ok(guard.values().find(|project| project.name == *name).cloned())
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut guard = self.projects.write().map_err(|_| poisoned())?;
        if guard.contains_key(&project.key) {
            return Err(ProjectRepositoryError::duplicate("key"));
        }
        if guard.values().any(|stored| stored.name == project.name) {
            return Err(ProjectRepositoryError::duplicate("name"));
        }
        guard.insert(project.key.clone(), project.clone());
        Ok(())
    }
}
