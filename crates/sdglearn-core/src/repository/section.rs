//! Section repository trait definition.

use sdglearn_types::error::RepositoryError;
use sdglearn_types::module::ModuleId;
use sdglearn_types::section::{Section, SectionId};

/// Repository trait for section persistence.
pub trait SectionRepository: Send + Sync {
    /// Create a new section. Returns the created record.
    fn create(
        &self,
        section: &Section,
    ) -> impl std::future::Future<Output = Result<Section, RepositoryError>> + Send;

    /// Get a section by its unique ID.
    fn get_by_id(
        &self,
        id: &SectionId,
    ) -> impl std::future::Future<Output = Result<Option<Section>, RepositoryError>> + Send;

    /// List a module's sections ordered by order_id.
    fn list_by_module(
        &self,
        module_id: &ModuleId,
    ) -> impl std::future::Future<Output = Result<Vec<Section>, RepositoryError>> + Send;

    /// Update an existing section's title and payload (not its order).
    fn update(
        &self,
        section: &Section,
    ) -> impl std::future::Future<Output = Result<Section, RepositoryError>> + Send;

    /// Persist a renumbered order assignment atomically.
    fn update_order(
        &self,
        order: &[(SectionId, i64)],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Permanently delete a section by ID.
    fn delete(
        &self,
        id: &SectionId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Case-insensitive substring search over section titles and payloads.
    fn search(
        &self,
        query: &str,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Section>, RepositoryError>> + Send;
}
