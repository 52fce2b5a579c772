//! Section handlers: the builder's composition surface plus search.

use axum::Json;
use axum::extract::{Path, Query, State};

use sdglearn_types::error::{ModuleError, SectionError};
use sdglearn_types::section::{
    CreateSectionRequest, ReorderSectionsRequest, UpdateSectionRequest,
};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::query::SectionSearchQuery;
use crate::http::response::{ApiResponse, RequestCtx};
use crate::state::AppState;

fn parse_module_id(raw: &str) -> Result<sdglearn_types::module::ModuleId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Module(ModuleError::NotFound))
}

fn parse_section_id(raw: &str) -> Result<sdglearn_types::section::SectionId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Section(SectionError::NotFound))
}

fn to_json_vec<T: serde::Serialize>(items: &[T]) -> Result<Vec<serde_json::Value>, AppError> {
    items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// POST /api/v1/modules/:id/sections - Append a section to a module.
pub async fn create_section(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(module_id): Path<String>,
    Json(body): Json<CreateSectionRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let module_id = parse_module_id(&module_id)?;
    let section = state.section_service.add(&module_id, body).await?;

    let section_json = serde_json::to_value(&section)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(section_json, &ctx)
        .with_link("self", &format!("/api/v1/sections/{}", section.id));

    Ok(Json(resp))
}

/// GET /api/v1/modules/:id/sections - List a module's sections in order.
pub async fn list_sections(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(module_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let module_id = parse_module_id(&module_id)?;
    let sections = state.section_service.list_for_module(&module_id).await?;

    let resp = ApiResponse::ok(to_json_vec(&sections)?, &ctx)
        .with_link("self", &format!("/api/v1/modules/{module_id}/sections"));

    Ok(Json(resp))
}

/// PUT /api/v1/sections/:id - Update a section's title or payload.
pub async fn update_section(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
    Json(body): Json<UpdateSectionRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let id = parse_section_id(&id)?;
    let section = state.section_service.update(&id, body).await?;

    let section_json = serde_json::to_value(&section)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(section_json, &ctx)
        .with_link("self", &format!("/api/v1/sections/{}", section.id));

    Ok(Json(resp))
}

/// POST /api/v1/modules/:id/sections/reorder - Drag-reorder a module's sections.
///
/// Returns the module's full section list with renumbered order_ids.
pub async fn reorder_sections(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(module_id): Path<String>,
    Json(body): Json<ReorderSectionsRequest>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let module_id = parse_module_id(&module_id)?;
    let sections = state
        .section_service
        .reorder(&module_id, body.from, body.to)
        .await?;

    Ok(Json(ApiResponse::ok(to_json_vec(&sections)?, &ctx)))
}

/// DELETE /api/v1/sections/:id - Remove a section and renumber the rest.
pub async fn delete_section(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let id = parse_section_id(&id)?;
    state.section_service.remove(&id).await?;

    Ok(Json(ApiResponse::ok(
        serde_json::json!({"deleted": true}),
        &ctx,
    )))
}

/// GET /api/v1/sections?q= - Search sections across the catalog.
pub async fn search_sections(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<SectionSearchQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let limit = query.limit.unwrap_or(state.config.default_page_size);
    let sections = state.section_service.search(&query.q, limit).await?;

    let resp = ApiResponse::ok(to_json_vec(&sections)?, &ctx)
        .with_link("self", "/api/v1/sections");

    Ok(Json(resp))
}
