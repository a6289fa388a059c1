use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use service::db::project_service::ProjectWithTasks;
use service::pagination::PageRequest;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

impl ListQuery {
    fn is_unpaginated(&self) -> bool {
        self.page_number.is_none()
            && self.page_size.is_none()
            && self.sort_field.is_none()
            && self.sort_direction.is_none()
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub project_name: String,
    pub project_start_date: NaiveDate,
    pub project_completion_date: NaiveDate,
}

/// A project flattened together with its owned task list.
#[derive(Debug, Serialize)]
pub struct ProjectBody {
    #[serde(flatten)]
    pub project: models::project::Model,
    pub tasks: Vec<models::task::Model>,
}

impl ProjectBody {
    fn from_parts((project, tasks): ProjectWithTasks) -> Self {
        Self { project, tasks }
    }
}

#[derive(Debug, Serialize)]
pub struct IdBody {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DeleteProjectBody {
    pub timestamp: String,
    pub message: &'static str,
}

/// Require a query parameter once any pagination parameter was given.
fn required<T>(value: Option<T>, name: &str) -> Result<T, JsonApiError> {
    value.ok_or_else(|| {
        JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(format!("{} is required for a paginated listing", name)),
        )
    })
}

fn page_request(q: &ListQuery) -> Result<PageRequest, JsonApiError> {
    let page_number = required(q.page_number, "pageNumber")?;
    let page_size = required(q.page_size, "pageSize")?;
    let sort_field = required(q.sort_field.as_deref(), "sortField")?;
    let sort_direction = required(q.sort_direction.as_deref(), "sortDirection")?;
    Ok(PageRequest::new(page_number, page_size, sort_field, sort_direction)?)
}

#[utoipa::path(
    get, path = "/project", tag = "project",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Response, JsonApiError> {
    if q.is_unpaginated() {
        let rows = state.projects.list().await?;
        info!(count = rows.len(), "list projects");
        let out: Vec<ProjectBody> = rows.into_iter().map(ProjectBody::from_parts).collect();
        return Ok(Json(out).into_response());
    }

    let req = page_request(&q)?;
    let page = state.projects.list_page(&req).await?;
    info!(count = page.items.len(), page = page.page_number, "list projects page");
    Ok(Json(page.map(ProjectBody::from_parts)).into_response())
}

#[utoipa::path(
    get, path = "/project/{id}", tag = "project",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectBody>, JsonApiError> {
    match state.projects.get(id).await? {
        Some(parts) => Ok(Json(ProjectBody::from_parts(parts))),
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(format!("Project with the ID {} was not found", id)),
        )),
    }
}

#[utoipa::path(
    post, path = "/createProject", tag = "project",
    request_body = crate::openapi::ProjectInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProjectInput>,
) -> Result<Json<IdBody>, JsonApiError> {
    let created = state
        .projects
        .create(&input.project_name, input.project_start_date, input.project_completion_date)
        .await?;
    Ok(Json(IdBody { id: created.id }))
}

#[utoipa::path(
    put, path = "/project/{id}", tag = "project",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = crate::openapi::ProjectInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ProjectInput>,
) -> Result<Json<IdBody>, JsonApiError> {
    let updated = state
        .projects
        .update(id, &input.project_name, input.project_start_date, input.project_completion_date)
        .await?;
    Ok(Json(IdBody { id: updated.id }))
}

#[utoipa::path(
    delete, path = "/project/{id}", tag = "project",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteProjectBody>, JsonApiError> {
    state.projects.delete(id).await?;
    Ok(Json(DeleteProjectBody {
        timestamp: Utc::now().to_rfc3339(),
        message: "Project was successfully deleted",
    }))
}
