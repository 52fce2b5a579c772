//! SDG repository trait definition.

use sdglearn_types::error::RepositoryError;
use sdglearn_types::sdg::{Sdg, SdgId};

use super::SortOrder;

/// Filter criteria for listing SDGs.
#[derive(Debug, Clone, Default)]
pub struct SdgFilter {
    /// Field to sort by (e.g., "goal_number", "title", "created_at").
    pub sort_by: Option<String>,
    /// Sort direction (ascending by goal number when unset).
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for SDG persistence.
///
/// Implementations live in sdglearn-infra (e.g., SqliteSdgRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SdgRepository: Send + Sync {
    /// Create a new SDG. Returns the created record.
    fn create(
        &self,
        sdg: &Sdg,
    ) -> impl std::future::Future<Output = Result<Sdg, RepositoryError>> + Send;

    /// Get an SDG by its unique ID.
    fn get_by_id(
        &self,
        id: &SdgId,
    ) -> impl std::future::Future<Output = Result<Option<Sdg>, RepositoryError>> + Send;

    /// Get an SDG by its unique slug.
    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Sdg>, RepositoryError>> + Send;

    /// Get an SDG by its display goal number.
    fn get_by_goal_number(
        &self,
        goal_number: i32,
    ) -> impl std::future::Future<Output = Result<Option<Sdg>, RepositoryError>> + Send;

    /// List SDGs with optional sorting and pagination.
    fn list(
        &self,
        filter: Option<SdgFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Sdg>, RepositoryError>> + Send;

    /// Update an existing SDG. Returns the updated record.
    fn update(
        &self,
        sdg: &Sdg,
    ) -> impl std::future::Future<Output = Result<Sdg, RepositoryError>> + Send;

    /// Permanently delete an SDG by ID (cascades to its modules and sections).
    fn delete(
        &self,
        id: &SdgId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
