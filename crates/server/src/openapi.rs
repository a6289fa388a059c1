use chrono::NaiveDate;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct ProjectInputDoc {
    pub project_name: String,
    pub project_start_date: NaiveDate,
    pub project_completion_date: NaiveDate,
}

#[derive(ToSchema)]
pub struct TaskInputDoc {
    pub task_name: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::projects::list,
        crate::routes::projects::get,
        crate::routes::projects::create,
        crate::routes::projects::update,
        crate::routes::projects::delete,
        crate::routes::tasks::create,
        crate::routes::tasks::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProjectInputDoc,
            TaskInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "project"),
        (name = "task")
    )
)]
pub struct ApiDoc;
