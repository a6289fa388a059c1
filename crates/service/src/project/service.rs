use std::sync::Arc;

use sea_orm::prelude::Date;
use tracing::instrument;
use uuid::Uuid;

use crate::db::project_service::ProjectWithTasks;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::project::repository::ProjectRepository;

/// Application service encapsulating project business rules behind a
/// repository abstraction. Validation and existence policy live in the
/// repository's backing functions; this wrapper is the seam handlers use.
pub struct ProjectService<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<ProjectWithTasks>, ServiceError> {
        self.repo.list().await
    }

    pub async fn list_page(&self, req: &PageRequest) -> Result<Page<ProjectWithTasks>, ServiceError> {
        self.repo.list_page(req).await
    }

    #[instrument(skip(self, start, completion), fields(name = %name))]
    pub async fn create(&self, name: &str, start: Date, completion: Date) -> Result<models::project::Model, ServiceError> {
        self.repo.create(name, start, completion).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ProjectWithTasks>, ServiceError> {
        self.repo.get(id).await
    }

    pub async fn update(&self, id: Uuid, name: &str, start: Date, completion: Date) -> Result<models::project::Model, ServiceError> {
        self.repo.update(id, name, start, completion).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await
    }

    pub async fn add_task(&self, project_id: Uuid, task_name: &str) -> Result<models::task::Model, ServiceError> {
        self.repo.add_task(project_id, task_name).await
    }

    pub async fn remove_task(&self, project_id: Uuid, task_id: Uuid) -> Result<(), ServiceError> {
        self.repo.remove_task(project_id, task_id).await
    }
}
