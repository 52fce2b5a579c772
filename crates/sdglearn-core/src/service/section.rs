//! Section composition service: the builder's palette operations.
//!
//! Sections append at the end of their module, reorder with the array-move,
//! and renumber densely after removals. Search backs the builder's section
//! lookup box.

use sdglearn_types::error::{RepositoryError, SectionError};
use sdglearn_types::module::ModuleId;
use sdglearn_types::section::{
    CreateSectionRequest, Section, SectionId, UpdateSectionRequest,
};

use crate::ordering;
use crate::repository::module::ModuleRepository;
use crate::repository::section::SectionRepository;

/// Service orchestrating sections within a module.
pub struct SectionService<S: SectionRepository, M: ModuleRepository> {
    section_repo: S,
    module_repo: M,
}

impl<S: SectionRepository, M: ModuleRepository> SectionService<S, M> {
    pub fn new(section_repo: S, module_repo: M) -> Self {
        Self {
            section_repo,
            module_repo,
        }
    }

    /// Add a section at the end of a module.
    pub async fn add(
        &self,
        module_id: &ModuleId,
        request: CreateSectionRequest,
    ) -> Result<Section, SectionError> {
        self.module_repo
            .get_by_id(module_id)
            .await
            .map_err(|e| SectionError::StorageError(e.to_string()))?
            .ok_or(SectionError::ModuleNotFound)?;

        let siblings = self.list_for_module(module_id).await?;
        let now = chrono::Utc::now();
        let section = Section {
            id: SectionId::new(),
            module_id: module_id.clone(),
            order_id: siblings.len() as i64,
            title: request.title.unwrap_or_default(),
            payload: request.payload,
            created_at: now,
            updated_at: now,
        };

        self.section_repo
            .create(&section)
            .await
            .map_err(|e| SectionError::StorageError(e.to_string()))
    }

    /// Get a section by ID.
    pub async fn get(&self, id: &SectionId) -> Result<Section, SectionError> {
        self.section_repo
            .get_by_id(id)
            .await
            .map_err(|e| SectionError::StorageError(e.to_string()))?
            .ok_or(SectionError::NotFound)
    }

    /// List a module's sections ordered by order_id.
    pub async fn list_for_module(
        &self,
        module_id: &ModuleId,
    ) -> Result<Vec<Section>, SectionError> {
        self.section_repo
            .list_by_module(module_id)
            .await
            .map_err(|e| SectionError::StorageError(e.to_string()))
    }

    /// Update a section's title or payload.
    pub async fn update(
        &self,
        id: &SectionId,
        request: UpdateSectionRequest,
    ) -> Result<Section, SectionError> {
        let mut section = self.get(id).await?;

        if let Some(title) = request.title {
            section.title = title;
        }
        if let Some(payload) = request.payload {
            section.payload = payload;
        }

        section.updated_at = chrono::Utc::now();

        self.section_repo
            .update(&section)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => SectionError::NotFound,
                other => SectionError::StorageError(other.to_string()),
            })
    }

    /// Reorder a module's sections: drag from index `from` to index `to`.
    ///
    /// Returns the module's sections in their new order with dense order_ids.
    /// A same-index drag changes nothing and skips the write entirely.
    pub async fn reorder(
        &self,
        module_id: &ModuleId,
        from: usize,
        to: usize,
    ) -> Result<Vec<Section>, SectionError> {
        let mut sections = self.list_for_module(module_id).await?;

        let changed = ordering::move_item(&mut sections, from, to).map_err(|e| {
            SectionError::OutOfRange {
                index: e.index,
                len: e.len,
            }
        })?;
        if !changed {
            return Ok(sections);
        }

        ordering::renumber(&mut sections, |s, n| s.order_id = n);
        self.persist_order(&sections).await?;
        tracing::debug!(module = %module_id, from, to, "sections reordered");
        Ok(sections)
    }

    /// Remove a section and renumber the survivors densely.
    pub async fn remove(&self, id: &SectionId) -> Result<(), SectionError> {
        let section = self.get(id).await?;

        self.section_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SectionError::NotFound,
            other => SectionError::StorageError(other.to_string()),
        })?;

        let mut survivors = self.list_for_module(&section.module_id).await?;
        ordering::renumber(&mut survivors, |s, n| s.order_id = n);
        self.persist_order(&survivors).await
    }

    /// Search sections across the whole catalog by title/payload substring.
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<Section>, SectionError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.section_repo
            .search(query, limit.max(1))
            .await
            .map_err(|e| SectionError::StorageError(e.to_string()))
    }

    async fn persist_order(&self, sections: &[Section]) -> Result<(), SectionError> {
        let order: Vec<(SectionId, i64)> = sections
            .iter()
            .map(|s| (s.id.clone(), s.order_id))
            .collect();
        self.section_repo
            .update_order(&order)
            .await
            .map_err(|e| SectionError::StorageError(e.to_string()))
    }
}
