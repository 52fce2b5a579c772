//! OAuth handoff endpoints.
//!
//! The hosted identity provider owns login and sessions; these two routes
//! are the thin plumbing around it and are the only unauthenticated API
//! routes besides /health.

use axum::Json;
use axum::extract::{Query, State};

use sdglearn_types::error::AuthError;

use crate::http::error::AppError;
use crate::http::extractors::query::OAuthCallbackQuery;
use crate::http::response::{ApiResponse, RequestCtx};
use crate::state::AppState;

/// GET /api/v1/auth/login - Build the provider authorization URL.
pub async fn login(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let oauth = state
        .oauth
        .as_ref()
        .ok_or(AuthError::NotConfigured("oauth environment"))?;

    state.state_store.sweep();
    let nonce = state.state_store.issue();
    let url = oauth.authorize_url(&nonce);

    Ok(Json(ApiResponse::ok(
        serde_json::json!({"authorize_url": url, "state": nonce}),
        &ctx,
    )))
}

/// GET /api/v1/auth/callback - Exchange the provider's code for tokens.
///
/// Validates the single-use state nonce, then performs the code exchange.
/// Tokens pass straight through to the caller; nothing is stored.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let oauth = state
        .oauth
        .as_ref()
        .ok_or(AuthError::NotConfigured("oauth environment"))?;

    if !state.state_store.consume(&query.state) {
        return Err(AuthError::StateMismatch.into());
    }

    let tokens = oauth.exchange_code(&query.code).await?;

    let tokens_json = serde_json::to_value(&tokens)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::ok(tokens_json, &ctx)))
}
