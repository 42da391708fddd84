use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Engine error taxonomy. Every variant carries a stable machine-readable
/// `code` in the JSON body so callers can branch on kind, not message text.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    /// Invalid input: missing field, bad time format, unknown enum value.
    Validation(String),
    /// Generic uniqueness conflict (e.g. duplicate team-member email).
    Conflict(String),
    /// An assignment row already exists for this (task, member) pair.
    DuplicateAssignment(String),
    /// The proposal has already been converted; conversion is one-shot.
    AlreadyConverted(String),
    /// Conversion requires at least one approved line item.
    NoApprovedItems(String),
    Internal(String),
    Database(sqlx::Error),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Validation(_) => "validation",
            AppError::Conflict(_) => "conflict",
            AppError::DuplicateAssignment(_) => "duplicate_assignment",
            AppError::AlreadyConverted(_) => "already_converted",
            AppError::NoApprovedItems(_) => "no_approved_items",
            AppError::Internal(_) => "internal",
            AppError::Database(_) => "internal",
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation: {msg}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::DuplicateAssignment(msg) => write!(f, "Duplicate Assignment: {msg}"),
            AppError::AlreadyConverted(msg) => write!(f, "Already Converted: {msg}"),
            AppError::NoApprovedItems(msg) => write!(f, "No Approved Items: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NoApprovedItems(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::DuplicateAssignment(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::AlreadyConverted(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<crate::duedate::ParseError> for AppError {
    fn from(err: crate::duedate::ParseError) -> Self {
        AppError::Validation(err.to_string())
    }
}
