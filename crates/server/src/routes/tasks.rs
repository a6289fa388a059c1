use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub task_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskBody {
    pub timestamp: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskBody {
    pub message: &'static str,
}

#[utoipa::path(
    post, path = "/project/{project_id}/createTask", tag = "task",
    params(("project_id" = Uuid, Path, description = "Owning project ID")),
    request_body = crate::openapi::TaskInputDoc,
    responses(
        (status = 200, description = "Task added"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Project Not Found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Path(project_id): Path<Uuid>,
    Json(input): Json<TaskInput>,
) -> Result<Json<CreateTaskBody>, JsonApiError> {
    state.projects.add_task(project_id, &input.task_name).await?;
    Ok(Json(CreateTaskBody {
        timestamp: Utc::now().to_rfc3339(),
        message: "Task was successfully added to the project",
    }))
}

#[utoipa::path(
    delete, path = "/project/{project_id}/deleteTask/{task_id}", tag = "task",
    params(
        ("project_id" = Uuid, Path, description = "Owning project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 400, description = "Task Not In Project"),
        (status = 404, description = "Project Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DeleteTaskBody>, JsonApiError> {
    state.projects.remove_task(project_id, task_id).await?;
    Ok(Json(DeleteTaskBody { message: "Task was successfully deleted" }))
}
