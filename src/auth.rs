//! Request authentication.
//!
//! Session management proper lives in front of this service; what reaches us
//! is a bearer token checked against the configured API token. The extractor
//! exists so a missing/bad token surfaces as a distinct 401 the UI can turn
//! into a re-authentication redirect rather than a generic failure.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Debug, Clone, Copy)]
pub struct ApiSession;

impl FromRequestParts<SharedState> for ApiSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let value = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        match value.strip_prefix("Bearer ") {
            Some(token) if token == state.config.api_token => Ok(ApiSession),
            _ => Err(AppError::Unauthorized("Invalid token".to_string())),
        }
    }
}
