//! Progress tracking service.
//!
//! Records completion per (user, module) and computes the gated views the
//! player renders: which modules are unlocked and how far along each SDG is.

use std::collections::HashMap;

use sdglearn_types::error::ProgressError;
use sdglearn_types::module::ModuleId;
use sdglearn_types::progress::{
    ModuleStatus, SdgAccessView, UserModuleProgress, UserSdgProgress,
};
use sdglearn_types::sdg::SdgId;

use crate::repository::module::ModuleRepository;
use crate::repository::progress::ProgressRepository;
use crate::repository::sdg::SdgRepository;
use crate::unlock;

/// Service computing per-user access and completion.
pub struct ProgressService<P: ProgressRepository, M: ModuleRepository, S: SdgRepository> {
    progress_repo: P,
    module_repo: M,
    sdg_repo: S,
    /// When set, the unlock gate is disabled (classroom mode).
    free_navigation: bool,
}

impl<P: ProgressRepository, M: ModuleRepository, S: SdgRepository> ProgressService<P, M, S> {
    pub fn new(progress_repo: P, module_repo: M, sdg_repo: S, free_navigation: bool) -> Self {
        Self {
            progress_repo,
            module_repo,
            sdg_repo,
            free_navigation,
        }
    }

    /// Set a user's completion status for a module (upsert).
    pub async fn set_status(
        &self,
        user_id: &str,
        module_id: &ModuleId,
        status: ModuleStatus,
    ) -> Result<UserModuleProgress, ProgressError> {
        self.module_repo
            .get_by_id(module_id)
            .await
            .map_err(|e| ProgressError::StorageError(e.to_string()))?
            .ok_or(ProgressError::ModuleNotFound)?;

        let record = UserModuleProgress {
            user_id: user_id.to_string(),
            module_id: module_id.clone(),
            status,
            updated_at: chrono::Utc::now(),
        };

        tracing::debug!(user = user_id, module = %module_id, %status, "progress updated");

        self.progress_repo
            .upsert(&record)
            .await
            .map_err(|e| ProgressError::StorageError(e.to_string()))
    }

    /// The gated per-SDG view: modules with unlock flags plus a summary.
    pub async fn sdg_access(
        &self,
        user_id: &str,
        sdg_id: &SdgId,
    ) -> Result<SdgAccessView, ProgressError> {
        self.sdg_repo
            .get_by_id(sdg_id)
            .await
            .map_err(|e| ProgressError::StorageError(e.to_string()))?
            .ok_or(ProgressError::SdgNotFound)?;

        let modules = self
            .module_repo
            .list_by_sdg(sdg_id)
            .await
            .map_err(|e| ProgressError::StorageError(e.to_string()))?;

        let statuses = self.status_map(user_id, sdg_id).await?;
        let access = unlock::compute_module_access(&modules, &statuses, self.free_navigation);

        let done = access
            .iter()
            .filter(|a| a.status == ModuleStatus::Done)
            .count() as u32;
        let total = access.len() as u32;

        Ok(SdgAccessView {
            sdg_id: sdg_id.clone(),
            modules: access,
            summary: UserSdgProgress {
                user_id: user_id.to_string(),
                sdg_id: sdg_id.clone(),
                total_modules: total,
                done_modules: done,
                percent_complete: unlock::percent_complete(done, total),
            },
        })
    }

    /// Per-user completion summary across the whole catalog.
    pub async fn overview(&self, user_id: &str) -> Result<Vec<UserSdgProgress>, ProgressError> {
        let sdgs = self
            .sdg_repo
            .list(None)
            .await
            .map_err(|e| ProgressError::StorageError(e.to_string()))?;

        let mut summaries = Vec::with_capacity(sdgs.len());
        for sdg in &sdgs {
            let modules = self
                .module_repo
                .list_by_sdg(&sdg.id)
                .await
                .map_err(|e| ProgressError::StorageError(e.to_string()))?;
            let statuses = self.status_map(user_id, &sdg.id).await?;

            let total = modules.len() as u32;
            let done = modules
                .iter()
                .filter(|m| statuses.get(&m.id) == Some(&ModuleStatus::Done))
                .count() as u32;

            summaries.push(UserSdgProgress {
                user_id: user_id.to_string(),
                sdg_id: sdg.id.clone(),
                total_modules: total,
                done_modules: done,
                percent_complete: unlock::percent_complete(done, total),
            });
        }

        Ok(summaries)
    }

    async fn status_map(
        &self,
        user_id: &str,
        sdg_id: &SdgId,
    ) -> Result<HashMap<ModuleId, ModuleStatus>, ProgressError> {
        let records = self
            .progress_repo
            .list_for_user_sdg(user_id, sdg_id)
            .await
            .map_err(|e| ProgressError::StorageError(e.to_string()))?;

        Ok(records
            .into_iter()
            .map(|r| (r.module_id, r.status))
            .collect())
    }
}
