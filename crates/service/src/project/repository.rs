use async_trait::async_trait;
use sea_orm::prelude::Date;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::project_service::{self, ProjectWithTasks};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ProjectWithTasks>, ServiceError>;
    async fn list_page(&self, req: &PageRequest) -> Result<Page<ProjectWithTasks>, ServiceError>;
    async fn create(&self, name: &str, start: Date, completion: Date) -> Result<models::project::Model, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<ProjectWithTasks>, ServiceError>;
    async fn update(&self, id: Uuid, name: &str, start: Date, completion: Date) -> Result<models::project::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn add_task(&self, project_id: Uuid, task_name: &str) -> Result<models::task::Model, ServiceError>;
    async fn remove_task(&self, project_id: Uuid, task_id: Uuid) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProjectRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProjectRepository for SeaOrmProjectRepository {
    async fn list(&self) -> Result<Vec<ProjectWithTasks>, ServiceError> {
        project_service::list_projects(&self.db).await
    }

    async fn list_page(&self, req: &PageRequest) -> Result<Page<ProjectWithTasks>, ServiceError> {
        project_service::list_projects_paginated(&self.db, req).await
    }

    async fn create(&self, name: &str, start: Date, completion: Date) -> Result<models::project::Model, ServiceError> {
        project_service::create_project(&self.db, name, start, completion).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProjectWithTasks>, ServiceError> {
        project_service::get_project(&self.db, id).await
    }

    async fn update(&self, id: Uuid, name: &str, start: Date, completion: Date) -> Result<models::project::Model, ServiceError> {
        project_service::update_project(&self.db, id, name, start, completion).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        project_service::delete_project(&self.db, id).await
    }

    async fn add_task(&self, project_id: Uuid, task_name: &str) -> Result<models::task::Model, ServiceError> {
        project_service::add_task(&self.db, project_id, task_name).await
    }

    async fn remove_task(&self, project_id: Uuid, task_id: Uuid) -> Result<(), ServiceError> {
        project_service::remove_task(&self.db, project_id, task_id).await
    }
}
