//! Module composition service.
//!
//! New modules append at the end of their SDG's list; moves use the builder's
//! array-move; removals renumber the survivors so positions stay dense.

use sdglearn_types::error::{ModuleError, RepositoryError};
use sdglearn_types::module::{CreateModuleRequest, Module, ModuleId, UpdateModuleRequest};
use sdglearn_types::sdg::SdgId;

use crate::ordering;
use crate::repository::module::ModuleRepository;
use crate::repository::sdg::SdgRepository;

/// Service orchestrating modules within an SDG.
pub struct ModuleService<M: ModuleRepository, S: SdgRepository> {
    module_repo: M,
    sdg_repo: S,
}

impl<M: ModuleRepository, S: SdgRepository> ModuleService<M, S> {
    pub fn new(module_repo: M, sdg_repo: S) -> Self {
        Self {
            module_repo,
            sdg_repo,
        }
    }

    /// Create a module at the end of the SDG's ordered list.
    pub async fn create(
        &self,
        sdg_id: &SdgId,
        request: CreateModuleRequest,
    ) -> Result<Module, ModuleError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(ModuleError::InvalidTitle(
                "title cannot be empty".to_string(),
            ));
        }

        self.sdg_repo
            .get_by_id(sdg_id)
            .await
            .map_err(|e| ModuleError::StorageError(e.to_string()))?
            .ok_or(ModuleError::SdgNotFound)?;

        let siblings = self.list_for_sdg(sdg_id).await?;
        let now = chrono::Utc::now();
        let module = Module {
            id: ModuleId::new(),
            sdg_id: sdg_id.clone(),
            title,
            subtitle: request.subtitle.unwrap_or_default(),
            position: siblings.len() as i64,
            created_at: now,
            updated_at: now,
        };

        self.module_repo
            .create(&module)
            .await
            .map_err(|e| ModuleError::StorageError(e.to_string()))
    }

    /// Get a module by ID.
    pub async fn get(&self, id: &ModuleId) -> Result<Module, ModuleError> {
        self.module_repo
            .get_by_id(id)
            .await
            .map_err(|e| ModuleError::StorageError(e.to_string()))?
            .ok_or(ModuleError::NotFound)
    }

    /// List an SDG's modules ordered by position.
    pub async fn list_for_sdg(&self, sdg_id: &SdgId) -> Result<Vec<Module>, ModuleError> {
        self.module_repo
            .list_by_sdg(sdg_id)
            .await
            .map_err(|e| ModuleError::StorageError(e.to_string()))
    }

    /// Update a module's title or subtitle.
    pub async fn update(
        &self,
        id: &ModuleId,
        request: UpdateModuleRequest,
    ) -> Result<Module, ModuleError> {
        let mut module = self.get(id).await?;

        if let Some(title) = request.title {
            let trimmed = title.trim().to_string();
            if trimmed.is_empty() {
                return Err(ModuleError::InvalidTitle(
                    "title cannot be empty".to_string(),
                ));
            }
            module.title = trimmed;
        }
        if let Some(subtitle) = request.subtitle {
            module.subtitle = subtitle;
        }

        module.updated_at = chrono::Utc::now();

        self.module_repo.update(&module).await.map_err(|e| match e {
            RepositoryError::NotFound => ModuleError::NotFound,
            other => ModuleError::StorageError(other.to_string()),
        })
    }

    /// Move a module to a new position within its SDG.
    ///
    /// Same-position moves are accepted and change nothing.
    pub async fn move_to(&self, id: &ModuleId, to: usize) -> Result<Vec<Module>, ModuleError> {
        let module = self.get(id).await?;
        let mut siblings = self.list_for_sdg(&module.sdg_id).await?;

        let from = siblings
            .iter()
            .position(|m| m.id == module.id)
            .ok_or(ModuleError::NotFound)?;

        let changed = ordering::move_item(&mut siblings, from, to).map_err(|e| {
            ModuleError::OutOfRange {
                index: e.index,
                len: e.len,
            }
        })?;
        if !changed {
            return Ok(siblings);
        }

        ordering::renumber(&mut siblings, |m, n| m.position = n);
        self.persist_positions(&siblings).await?;
        Ok(siblings)
    }

    /// Delete a module and renumber the survivors densely.
    pub async fn delete(&self, id: &ModuleId) -> Result<(), ModuleError> {
        let module = self.get(id).await?;

        self.module_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ModuleError::NotFound,
            other => ModuleError::StorageError(other.to_string()),
        })?;

        let mut survivors = self.list_for_sdg(&module.sdg_id).await?;
        ordering::renumber(&mut survivors, |m, n| m.position = n);
        self.persist_positions(&survivors).await
    }

    async fn persist_positions(&self, modules: &[Module]) -> Result<(), ModuleError> {
        let positions: Vec<(ModuleId, i64)> = modules
            .iter()
            .map(|m| (m.id.clone(), m.position))
            .collect();
        self.module_repo
            .update_positions(&positions)
            .await
            .map_err(|e| ModuleError::StorageError(e.to_string()))
    }
}
