//! Module handlers: CRUD plus the builder's move operation.

use axum::Json;
use axum::extract::{Path, State};

use sdglearn_types::error::ModuleError;
use sdglearn_types::module::{CreateModuleRequest, MoveModuleRequest, UpdateModuleRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::{ApiResponse, RequestCtx};
use crate::state::AppState;

fn parse_module_id(raw: &str) -> Result<sdglearn_types::module::ModuleId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Module(ModuleError::NotFound))
}

/// POST /api/v1/sdgs/:id/modules - Append a module to an SDG.
pub async fn create_module(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
    Json(body): Json<CreateModuleRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state.sdg_service.resolve(&id_or_slug).await?;
    let module = state.module_service.create(&sdg.id, body).await?;

    let module_json = serde_json::to_value(&module)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(module_json, &ctx)
        .with_link("self", &format!("/api/v1/modules/{}", module.id))
        .with_link("sections", &format!("/api/v1/modules/{}/sections", module.id));

    Ok(Json(resp))
}

/// GET /api/v1/sdgs/:id/modules - List an SDG's modules in order.
pub async fn list_modules(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let sdg = state.sdg_service.resolve(&id_or_slug).await?;
    let modules = state.module_service.list_for_sdg(&sdg.id).await?;

    let modules_json = modules
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let resp = ApiResponse::ok(modules_json, &ctx)
        .with_link("self", &format!("/api/v1/sdgs/{}/modules", sdg.id));

    Ok(Json(resp))
}

/// PUT /api/v1/modules/:id - Update a module's title or subtitle.
pub async fn update_module(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
    Json(body): Json<UpdateModuleRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let id = parse_module_id(&id)?;
    let module = state.module_service.update(&id, body).await?;

    let module_json = serde_json::to_value(&module)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::ok(module_json, &ctx)
        .with_link("self", &format!("/api/v1/modules/{}", module.id));

    Ok(Json(resp))
}

/// POST /api/v1/modules/:id/move - Move a module to a new position.
///
/// Returns the SDG's full module list in its new order.
pub async fn move_module(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
    Json(body): Json<MoveModuleRequest>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let ctx = RequestCtx::new();

    let id = parse_module_id(&id)?;
    let modules = state.module_service.move_to(&id, body.to).await?;

    let modules_json = modules
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(ApiResponse::ok(modules_json, &ctx)))
}

/// DELETE /api/v1/modules/:id - Delete a module and renumber the rest.
pub async fn delete_module(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let ctx = RequestCtx::new();

    let id = parse_module_id(&id)?;
    state.module_service.delete(&id).await?;

    Ok(Json(ApiResponse::ok(
        serde_json::json!({"deleted": true}),
        &ctx,
    )))
}
