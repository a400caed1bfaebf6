use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Build the JSON error body every Reppay endpoint answers with:
/// `{"error": <message>, "kind": <KIND>}`.
pub fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "error": message,
        "kind": kind,
    });
    (status, axum::Json(body)).into_response()
}

/// Router-level failures that happen before a handler runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("route not found")]
    RouteNotFound,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::MalformedBody(_) => "MALFORMED_BODY",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
        };
        // Client errors only; the TraceLayer span already records them.
        error_response(status, self.kind(), &self.to_string())
    }
}

/// Fallback handler for unknown routes.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
