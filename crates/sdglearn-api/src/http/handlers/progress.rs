//! Progress handlers: status upserts and the gated player views.

use axum::Json;
use axum::extract::{Path, State};

use sdglearn_types::error::{ModuleError, ProgressError};
use sdglearn_types::progress::SetProgressRequest;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::{ApiResponse, RequestCtx};
use crate::state::AppState;

/// PUT /api/v1/users/:user_id/modules/:module_id/progress - Set completion status.
pub async fn set_progress(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path((user_id, module_id)): Path<(String, String)>,
    Json(body): Json<SetProgressRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user id cannot be empty".to_string()));
    }
    let module_id = module_id
        .parse()
        .map_err(|_| AppError::Module(ModuleError::NotFound))?;

    let record = state
        .progress_service
        .set_status(&user_id, &module_id, body.status)
        .await?;

    let record_json = serde_json::to_value(&record)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::ok(record_json, &ctx)))
}

/// GET /api/v1/users/:user_id/sdgs/:sdg_id/progress - Gated module list + summary.
pub async fn sdg_progress(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path((user_id, sdg_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state
        .sdg_service
        .resolve(&sdg_id)
        .await
        .map_err(|_| AppError::Progress(ProgressError::SdgNotFound))?;

    let view = state.progress_service.sdg_access(&user_id, &sdg.id).await?;

    let view_json = serde_json::to_value(&view)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(view_json, &ctx)
        .with_link("sdg", &format!("/api/v1/sdgs/{}", sdg.id));

    Ok(Json(resp))
}

/// GET /api/v1/users/:user_id/progress - Completion summary across all SDGs.
pub async fn user_overview(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let summaries = state.progress_service.overview(&user_id).await?;

    let summaries_json = summaries
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::ok(summaries_json, &ctx)))
}
