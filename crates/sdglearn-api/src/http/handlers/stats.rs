//! Dashboard statistics endpoint.
//!
//! GET /api/v1/stats - Aggregate counts for the admin dashboard.

use axum::Json;
use axum::extract::State;
use sqlx::Row;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::{ApiResponse, RequestCtx};
use crate::state::AppState;

/// GET /api/v1/stats - Aggregate dashboard statistics.
///
/// Returns catalog sizes (SDGs, modules, sections by kind), how many
/// learners have recorded progress, and how many modules they have
/// completed. Uses COUNT(*) SQL directly on the reader pool.
pub async fn get_stats(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let counts = sqlx::query(
        r#"SELECT
            (SELECT COUNT(*) FROM sdgs) as total_sdgs,
            (SELECT COUNT(*) FROM modules) as total_modules,
            (SELECT COUNT(*) FROM sections) as total_sections,
            (SELECT COUNT(DISTINCT user_id) FROM user_module_progress) as learners,
            (SELECT COUNT(*) FROM user_module_progress WHERE status = 'done') as completed_modules
        "#,
    )
    .fetch_one(&state.db_pool.reader)
    .await
    .map_err(|e| AppError::Internal(format!("Failed to query stats: {e}")))?;

    let total_sdgs: i64 = counts.try_get("total_sdgs").unwrap_or(0);
    let total_modules: i64 = counts.try_get("total_modules").unwrap_or(0);
    let total_sections: i64 = counts.try_get("total_sections").unwrap_or(0);
    let learners: i64 = counts.try_get("learners").unwrap_or(0);
    let completed_modules: i64 = counts.try_get("completed_modules").unwrap_or(0);

    // Section counts per kind for the builder palette overview
    let kind_rows = sqlx::query("SELECT kind, COUNT(*) as cnt FROM sections GROUP BY kind")
        .fetch_all(&state.db_pool.reader)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to query section kinds: {e}")))?;

    let mut sections_by_kind = serde_json::Map::new();
    for row in &kind_rows {
        let kind: String = row.try_get("kind").unwrap_or_default();
        let cnt: i64 = row.try_get("cnt").unwrap_or(0);
        sections_by_kind.insert(kind, serde_json::json!(cnt));
    }

    let data = serde_json::json!({
        "total_sdgs": total_sdgs,
        "total_modules": total_modules,
        "total_sections": total_sections,
        "sections_by_kind": sections_by_kind,
        "learners": learners,
        "completed_modules": completed_modules,
    });

    let resp = ApiResponse::ok(data, &ctx)
        .with_link("self", "/api/v1/stats")
        .with_link("sdgs", "/api/v1/sdgs");

    Ok(Json(resp))
}
