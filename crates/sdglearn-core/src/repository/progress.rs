//! Progress repository trait definition.

use sdglearn_types::error::RepositoryError;
use sdglearn_types::module::ModuleId;
use sdglearn_types::progress::UserModuleProgress;
use sdglearn_types::sdg::SdgId;

/// Repository trait for per-user module progress.
///
/// Records are keyed (user_id, module_id); `upsert` either inserts a new
/// record or overwrites the status of an existing one.
pub trait ProgressRepository: Send + Sync {
    /// Insert or overwrite a progress record.
    fn upsert(
        &self,
        progress: &UserModuleProgress,
    ) -> impl std::future::Future<Output = Result<UserModuleProgress, RepositoryError>> + Send;

    /// Get a user's progress for one module, if any was recorded.
    fn get(
        &self,
        user_id: &str,
        module_id: &ModuleId,
    ) -> impl std::future::Future<Output = Result<Option<UserModuleProgress>, RepositoryError>> + Send;

    /// List a user's progress records for all modules of one SDG.
    fn list_for_user_sdg(
        &self,
        user_id: &str,
        sdg_id: &SdgId,
    ) -> impl std::future::Future<Output = Result<Vec<UserModuleProgress>, RepositoryError>> + Send;

    /// List all of a user's progress records.
    fn list_for_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<UserModuleProgress>, RepositoryError>> + Send;
}
