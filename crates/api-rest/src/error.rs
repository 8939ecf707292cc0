//! Domain-to-HTTP error mapping.
//!
//! Response bodies stay generic: validation problems echo their message so
//! the form can show it, everything else collapses to a banner-sized phrase.
//! Internal causes are logged server-side, never serialized.

use api_shared::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cardioscan_core::ReportError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Submission or query input rejected; the message is shown to the user.
    BadRequest(String),
    /// Login attempted without both credentials.
    MissingCredentials,
    /// Missing, invalid or expired credentials/token.
    Unauthorized,
    /// The addressed record does not exist.
    NotFound,
    /// Registration against an already-used email.
    DuplicateEmail,
    /// Anything the caller cannot act on; details are in the log only.
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::MissingCredentials => "Email and password are required".into(),
            ApiError::Unauthorized => "Unauthorized".into(),
            ApiError::NotFound => "Not found".into(),
            ApiError::DuplicateEmail => "An account with this email already exists".into(),
            ApiError::Internal => "Internal server error".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "message": self.message() }));
        (status, body).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidInput(message) => ApiError::BadRequest(message),
            ReportError::ReportNotFound(_) | ReportError::UserNotFound => ApiError::NotFound,
            ReportError::DuplicateEmail => ApiError::DuplicateEmail,
            other => {
                tracing::error!("storage error: {other}");
                ApiError::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken => ApiError::Unauthorized,
            other => {
                tracing::error!("auth error: {other}");
                ApiError::Internal
            }
        }
    }
}
