//! Module repository trait definition.

use sdglearn_types::error::RepositoryError;
use sdglearn_types::module::{Module, ModuleId};
use sdglearn_types::sdg::SdgId;

/// Repository trait for module persistence.
pub trait ModuleRepository: Send + Sync {
    /// Create a new module. Returns the created record.
    fn create(
        &self,
        module: &Module,
    ) -> impl std::future::Future<Output = Result<Module, RepositoryError>> + Send;

    /// Get a module by its unique ID.
    fn get_by_id(
        &self,
        id: &ModuleId,
    ) -> impl std::future::Future<Output = Result<Option<Module>, RepositoryError>> + Send;

    /// List an SDG's modules ordered by position.
    fn list_by_sdg(
        &self,
        sdg_id: &SdgId,
    ) -> impl std::future::Future<Output = Result<Vec<Module>, RepositoryError>> + Send;

    /// Update an existing module's fields (not its position).
    fn update(
        &self,
        module: &Module,
    ) -> impl std::future::Future<Output = Result<Module, RepositoryError>> + Send;

    /// Persist a renumbered position assignment atomically.
    ///
    /// Used after a move or delete so a partially-applied renumbering can
    /// never land.
    fn update_positions(
        &self,
        positions: &[(ModuleId, i64)],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Permanently delete a module by ID (cascades to its sections).
    fn delete(
        &self,
        id: &ModuleId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
