use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::project::{repository::SeaOrmProjectRepository, service::ProjectService};

pub mod projects;
pub mod tasks;

#[derive(Clone)]
pub struct ServerState {
    pub projects: Arc<ProjectService<SeaOrmProjectRepository>>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: project CRUD, nested task routes,
/// health, and the generated API docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/project", get(projects::list))
        .route(
            "/project/:id",
            get(projects::get).put(projects::update).delete(projects::delete),
        )
        .route("/createProject", post(projects::create))
        .route("/project/:project_id/createTask", post(tasks::create))
        .route("/project/:project_id/deleteTask/:task_id", delete(tasks::delete))
        .with_state(state);

    api.merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
    )
    .layer(cors)
    .layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
