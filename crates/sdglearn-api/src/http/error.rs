//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sdglearn_types::error::{AuthError, ModuleError, ProgressError, SdgError, SectionError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Sdg(SdgError),
    Module(ModuleError),
    Section(SectionError),
    Progress(ProgressError),
    Auth(AuthError),
    /// Authentication failure (API key).
    Unauthorized(String),
    /// Request validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<SdgError> for AppError {
    fn from(e: SdgError) -> Self {
        AppError::Sdg(e)
    }
}

impl From<ModuleError> for AppError {
    fn from(e: ModuleError) -> Self {
        AppError::Module(e)
    }
}

impl From<SectionError> for AppError {
    fn from(e: SectionError) -> Self {
        AppError::Section(e)
    }
}

impl From<ProgressError> for AppError {
    fn from(e: ProgressError) -> Self {
        AppError::Progress(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl AppError {
    /// (status, machine code, human message) for the envelope.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Sdg(SdgError::NotFound) => {
                (StatusCode::NOT_FOUND, "SDG_NOT_FOUND", "SDG not found".to_string())
            }
            AppError::Sdg(SdgError::SlugConflict(slug)) => (
                StatusCode::CONFLICT,
                "SLUG_CONFLICT",
                format!("Slug '{slug}' already exists"),
            ),
            AppError::Sdg(SdgError::GoalNumberConflict(n)) => (
                StatusCode::CONFLICT,
                "GOAL_NUMBER_CONFLICT",
                format!("Goal number {n} is already taken"),
            ),
            AppError::Sdg(e @ (SdgError::InvalidTitle(_) | SdgError::InvalidGoalNumber(_))) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Sdg(e) => (StatusCode::INTERNAL_SERVER_ERROR, "SDG_ERROR", e.to_string()),

            AppError::Module(ModuleError::NotFound) => (
                StatusCode::NOT_FOUND,
                "MODULE_NOT_FOUND",
                "Module not found".to_string(),
            ),
            AppError::Module(ModuleError::SdgNotFound) => {
                (StatusCode::NOT_FOUND, "SDG_NOT_FOUND", "SDG not found".to_string())
            }
            AppError::Module(e @ ModuleError::OutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "ORDER_OUT_OF_RANGE", e.to_string())
            }
            AppError::Module(e @ ModuleError::InvalidTitle(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Module(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MODULE_ERROR",
                e.to_string(),
            ),

            AppError::Section(SectionError::NotFound) => (
                StatusCode::NOT_FOUND,
                "SECTION_NOT_FOUND",
                "Section not found".to_string(),
            ),
            AppError::Section(SectionError::ModuleNotFound) => (
                StatusCode::NOT_FOUND,
                "MODULE_NOT_FOUND",
                "Module not found".to_string(),
            ),
            AppError::Section(e @ SectionError::OutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "ORDER_OUT_OF_RANGE", e.to_string())
            }
            AppError::Section(e @ SectionError::InvalidPayload(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Section(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SECTION_ERROR",
                e.to_string(),
            ),

            AppError::Progress(ProgressError::ModuleNotFound) => (
                StatusCode::NOT_FOUND,
                "MODULE_NOT_FOUND",
                "Module not found".to_string(),
            ),
            AppError::Progress(ProgressError::SdgNotFound) => {
                (StatusCode::NOT_FOUND, "SDG_NOT_FOUND", "SDG not found".to_string())
            }
            AppError::Progress(e @ ProgressError::InvalidStatus(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Progress(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROGRESS_ERROR",
                e.to_string(),
            ),

            AppError::Auth(AuthError::NotConfigured(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "OAUTH_NOT_CONFIGURED",
                "Login is not configured on this server".to_string(),
            ),
            AppError::Auth(AuthError::StateMismatch) => (
                StatusCode::BAD_REQUEST,
                "STATE_MISMATCH",
                "Unknown or expired login attempt".to_string(),
            ),
            AppError::Auth(e @ AuthError::Exchange(_)) => {
                (StatusCode::BAD_GATEWAY, "OAUTH_EXCHANGE_FAILED", e.to_string())
            }

            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        }

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, code, _) = AppError::Sdg(SdgError::NotFound).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "SDG_NOT_FOUND");
    }

    #[test]
    fn test_out_of_range_maps_to_400() {
        let (status, code, message) =
            AppError::Section(SectionError::OutOfRange { index: 9, len: 2 }).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "ORDER_OUT_OF_RANGE");
        assert!(message.contains("9"));
    }

    #[test]
    fn test_exchange_failure_maps_to_502() {
        let (status, code, _) =
            AppError::Auth(AuthError::Exchange("provider down".to_string())).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "OAUTH_EXCHANGE_FAILED");
    }
}
