use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Project: index on project_name, backs the exists-by-name check.
        // Deliberately non-unique: the name check happens in the service
        // at creation time only.
        manager
            .create_index(
                Index::create()
                    .name("idx_project_name")
                    .table(Project::Table)
                    .col(Project::ProjectName)
                    .to_owned(),
            )
            .await?;

        // Task: index on project_id, backs the per-project task list scan
        manager
            .create_index(
                Index::create()
                    .name("idx_task_project")
                    .table(Task::Table)
                    .col(Task::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_project_name").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_task_project").table(Task::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Project { Table, ProjectName }

#[derive(DeriveIden)]
enum Task { Table, ProjectId }
