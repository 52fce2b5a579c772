//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing.
//!
//! In production, the built learner SPA (builder + player) is served from
//! disk (configurable via `SDGLEARN_WEB_DIR`). API routes take priority;
//! unknown paths fall through to the SPA's `index.html` for client-side
//! routing. If the directory does not exist, only the API is served.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // SDG catalog
        .route("/sdgs", post(handlers::sdg::create_sdg))
        .route("/sdgs", get(handlers::sdg::list_sdgs))
        .route("/sdgs/{id}", get(handlers::sdg::get_sdg))
        .route("/sdgs/{id}", put(handlers::sdg::update_sdg))
        .route("/sdgs/{id}", delete(handlers::sdg::delete_sdg))
        // Modules
        .route(
            "/sdgs/{id}/modules",
            post(handlers::module::create_module).get(handlers::module::list_modules),
        )
        .route("/modules/{id}", put(handlers::module::update_module))
        .route("/modules/{id}", delete(handlers::module::delete_module))
        .route("/modules/{id}/move", post(handlers::module::move_module))
        // Sections (builder surface)
        .route(
            "/modules/{id}/sections",
            post(handlers::section::create_section).get(handlers::section::list_sections),
        )
        .route(
            "/modules/{id}/sections/reorder",
            post(handlers::section::reorder_sections),
        )
        .route("/sections", get(handlers::section::search_sections))
        .route("/sections/{id}", put(handlers::section::update_section))
        .route("/sections/{id}", delete(handlers::section::delete_section))
        // Progress (player surface)
        .route(
            "/users/{user_id}/modules/{module_id}/progress",
            put(handlers::progress::set_progress),
        )
        .route(
            "/users/{user_id}/sdgs/{sdg_id}/progress",
            get(handlers::progress::sdg_progress),
        )
        .route(
            "/users/{user_id}/progress",
            get(handlers::progress::user_overview),
        )
        // OAuth handoff (unauthenticated)
        .route("/auth/login", get(handlers::auth::login))
        .route("/auth/callback", get(handlers::auth::callback))
        // Dashboard
        .route("/stats", get(handlers::stats::get_stats));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the built SPA from disk if the directory exists. API routes and
    // /health take priority; unknown paths fall through to index.html for
    // client-side routing.
    let web_dir = std::env::var("SDGLEARN_WEB_DIR").unwrap_or_else(|_| "web/dist".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "SPA static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
