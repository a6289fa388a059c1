use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON error envelope: HTTP status plus a short error label and a
/// human-readable detail message.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }

    /// Map a service failure onto the HTTP contract: validation and model
    /// errors answer 400, missing entities 404, database failures 500.
    pub fn from_service(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            }
            ServiceError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
            }
            ServiceError::Db(_) => {
                error!(err = %e, "service database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        Self::from_service(e)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn validation_maps_to_bad_request() {
        let e = JsonApiError::from_service(ServiceError::Validation("nope".into()));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert!(e.detail.unwrap().contains("nope"));
    }

    #[test]
    fn model_errors_map_to_bad_request() {
        let e = JsonApiError::from_service(ServiceError::Model(ModelError::Validation("bad".into())));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let e = JsonApiError::from_service(ServiceError::NotFound("gone".into()));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn db_maps_to_500() {
        let e = JsonApiError::from_service(ServiceError::Db("pool gone".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
