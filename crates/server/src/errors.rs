use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

/// JSON error envelope returned by the resource controllers:
/// `{"error": <title>, "detail": <detail>}` with the mapped status code.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    /// Map a service error onto the HTTP taxonomy: unknown id is 404, bad
    /// input is 400, anything else is a 500.
    pub fn from_service(e: service::errors::ServiceError, title: &'static str) -> Self {
        use service::errors::ServiceError;
        let status = match &e {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) | ServiceError::Model(_) => StatusCode::BAD_REQUEST,
            ServiceError::Db(_) | ServiceError::Peer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(err = %e, "{title}");
        }
        Self::new(status, title, Some(e.to_string()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.title,
            "detail": self.detail,
        }));
        (self.status, body).into_response()
    }
}
