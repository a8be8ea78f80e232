use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    Conflict { kind: &'static str, message: String },
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        let kind = value.kind();
        match value {
            AppError::NotFound(_) => HttpError::NotFound(value.to_string()),
            AppError::Validation(msg) => HttpError::BadRequest(msg),
            AppError::Registration(err) => HttpError::Conflict {
                kind,
                message: err.to_string(),
            },
            AppError::Persistence(err) => {
                error!("storage failure: {:#}", err);
                HttpError::Internal(format!("storage unavailable: {}", err))
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "validation", msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            HttpError::Conflict { kind, message } => (StatusCode::CONFLICT, kind, message),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence", msg),
        };
        (status, Json(ErrorBody { error: message, kind })).into_response()
    }
}
