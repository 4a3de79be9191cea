use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// JSON error in the historical wire shape:
/// `{ "success": false, "message": "..." }` with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", entity))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "api error");
        }
        (self.status, Json(serde_json::json!({ "success": false, "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        use models::errors::ModelError;
        match &e {
            ServiceError::Validation(_) => Self::bad_request(e.to_string()),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Model(ModelError::Validation(_)) => Self::bad_request(e.to_string()),
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => Self::internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match &e {
            AuthError::Validation(_) => Self::bad_request(e.to_string()),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, e.to_string()),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, e.to_string()),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                Self::internal(e.to_string())
            }
        }
    }
}
