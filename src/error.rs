use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use strapi::FetchError;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(FetchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(err @ FetchError::Timeout(_)) => {
                error!("CMS timeout: {}", err);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "Server timeout. The backend API may be unavailable.".to_string(),
                )
            }
            AppError::Upstream(err) => {
                error!("CMS error: {}", err);
                (StatusCode::BAD_GATEWAY, "Failed to load content".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Upstream(err)
    }
}
