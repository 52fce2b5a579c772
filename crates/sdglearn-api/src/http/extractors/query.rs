//! Query parameter extractors for list and search endpoints.

use serde::Deserialize;

/// Query parameters for the SDG list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct SdgListQuery {
    /// Sort by field (goal_number, title, created_at, ...).
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort order (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

fn default_sort() -> String {
    "goal_number".to_string()
}

fn default_order() -> String {
    "asc".to_string()
}

/// Query parameters for the section search endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct SectionSearchQuery {
    /// Substring to match against section titles and payloads.
    #[serde(default)]
    pub q: String,
    /// Maximum results (defaults to the configured page size).
    pub limit: Option<i64>,
}

/// Query parameters for the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: String,
    pub state: String,
}
