//! SDG CRUD handlers for the REST API.

use axum::Json;
use axum::extract::{Path, Query, State};

use sdglearn_core::repository::SortOrder;
use sdglearn_core::repository::sdg::SdgFilter;
use sdglearn_types::sdg::{CreateSdgRequest, UpdateSdgRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::query::SdgListQuery;
use crate::http::response::{ApiResponse, RequestCtx};
use crate::state::AppState;

/// POST /api/v1/sdgs - Create a new SDG.
pub async fn create_sdg(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<CreateSdgRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state.sdg_service.create(body).await?;

    let sdg_json = serde_json::to_value(&sdg)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(sdg_json, &ctx)
        .with_link("self", &format!("/api/v1/sdgs/{}", sdg.id))
        .with_link("modules", &format!("/api/v1/sdgs/{}/modules", sdg.id));

    Ok(Json(resp))
}

/// GET /api/v1/sdgs - List SDGs with sorting and pagination.
pub async fn list_sdgs(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<SdgListQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let sort_order = match query.order.to_lowercase().as_str() {
        "desc" => Some(SortOrder::Desc),
        _ => Some(SortOrder::Asc),
    };

    let filter = Some(SdgFilter {
        sort_by: Some(query.sort.clone()),
        sort_order,
        limit: query.limit.or(Some(state.config.default_page_size)),
        offset: query.offset,
    });

    let sdgs = state.sdg_service.list(filter).await?;

    let sdgs_json = sdgs
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let resp = ApiResponse::ok(sdgs_json, &ctx).with_link("self", "/api/v1/sdgs");

    Ok(Json(resp))
}

/// GET /api/v1/sdgs/:id - Get an SDG by ID or slug, with its modules.
pub async fn get_sdg(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state.sdg_service.resolve(&id_or_slug).await?;
    let modules = state.module_service.list_for_sdg(&sdg.id).await?;

    let mut sdg_json = serde_json::to_value(&sdg)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    sdg_json["modules"] = serde_json::to_value(&modules)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let resp = ApiResponse::ok(sdg_json, &ctx)
        .with_link("self", &format!("/api/v1/sdgs/{}", sdg.id))
        .with_link("modules", &format!("/api/v1/sdgs/{}/modules", sdg.id));

    Ok(Json(resp))
}

/// PUT /api/v1/sdgs/:id - Update an SDG.
pub async fn update_sdg(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
    Json(body): Json<UpdateSdgRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state.sdg_service.resolve(&id_or_slug).await?;
    let updated = state.sdg_service.update(&sdg.id, body).await?;

    let sdg_json = serde_json::to_value(&updated)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(sdg_json, &ctx)
        .with_link("self", &format!("/api/v1/sdgs/{}", updated.id));

    Ok(Json(resp))
}

/// DELETE /api/v1/sdgs/:id - Delete an SDG and all its content.
pub async fn delete_sdg(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state.sdg_service.resolve(&id_or_slug).await?;
    state.sdg_service.delete(&sdg.id).await?;

    let resp = ApiResponse::ok(
        serde_json::json!({"deleted": true, "slug": sdg.slug}),
        &ctx,
    );

    Ok(Json(resp))
}
