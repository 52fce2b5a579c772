//! SDG catalog service.
//!
//! Orchestrates creation, update, and deletion of SDGs. Creating an SDG
//! derives a unique slug from the title and maps storage conflicts onto the
//! goal-number invariant.

use sdglearn_types::error::{RepositoryError, SdgError};
use sdglearn_types::sdg::{CreateSdgRequest, Sdg, SdgId, UpdateSdgRequest, slugify};

use crate::repository::sdg::{SdgFilter, SdgRepository};

/// Service orchestrating the SDG catalog.
pub struct SdgService<R: SdgRepository> {
    repo: R,
}

impl<R: SdgRepository> SdgService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new SDG.
    ///
    /// Validates the title and goal number, derives a slug (suffixing -2, -3,
    /// ... on collision), and surfaces a duplicate goal number as a conflict.
    pub async fn create(&self, request: CreateSdgRequest) -> Result<Sdg, SdgError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(SdgError::InvalidTitle("title cannot be empty".to_string()));
        }
        if request.goal_number < 1 {
            return Err(SdgError::InvalidGoalNumber(request.goal_number));
        }

        let base_slug = slugify(&title);
        if base_slug.is_empty() {
            return Err(SdgError::InvalidTitle(
                "title must contain at least one alphanumeric character".to_string(),
            ));
        }
        let slug = self.ensure_unique_slug(&base_slug).await?;

        // The slug is pre-checked, so a UNIQUE violation here means the goal
        // number is taken.
        if self
            .repo
            .get_by_goal_number(request.goal_number)
            .await
            .map_err(|e| SdgError::StorageError(e.to_string()))?
            .is_some()
        {
            return Err(SdgError::GoalNumberConflict(request.goal_number));
        }

        let now = chrono::Utc::now();
        let sdg = Sdg {
            id: SdgId::new(),
            goal_number: request.goal_number,
            slug,
            title,
            description: request.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create(&sdg).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => SdgError::GoalNumberConflict(request.goal_number),
            other => SdgError::StorageError(other.to_string()),
        })?;

        tracing::info!(slug = %created.slug, goal = created.goal_number, "sdg created");
        Ok(created)
    }

    /// Ensure a slug is unique by appending -2, -3, etc. if needed.
    async fn ensure_unique_slug(&self, base_slug: &str) -> Result<String, SdgError> {
        let mut slug = base_slug.to_string();
        let mut counter = 2;

        loop {
            let existing = self
                .repo
                .get_by_slug(&slug)
                .await
                .map_err(|e| SdgError::StorageError(e.to_string()))?;

            if existing.is_none() {
                return Ok(slug);
            }

            slug = format!("{base_slug}-{counter}");
            counter += 1;

            // Safety valve: prevent infinite loops
            if counter > 100 {
                return Err(SdgError::SlugConflict(format!(
                    "could not generate unique slug from '{base_slug}'"
                )));
            }
        }
    }

    /// Get an SDG by ID.
    pub async fn get(&self, id: &SdgId) -> Result<Sdg, SdgError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| SdgError::StorageError(e.to_string()))?
            .ok_or(SdgError::NotFound)
    }

    /// Get an SDG by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Sdg, SdgError> {
        self.repo
            .get_by_slug(slug)
            .await
            .map_err(|e| SdgError::StorageError(e.to_string()))?
            .ok_or(SdgError::NotFound)
    }

    /// Resolve an SDG from either a slug or a UUID string.
    pub async fn resolve(&self, id_or_slug: &str) -> Result<Sdg, SdgError> {
        if let Ok(sdg) = self.get_by_slug(id_or_slug).await {
            return Ok(sdg);
        }
        let id = id_or_slug.parse().map_err(|_| SdgError::NotFound)?;
        self.get(&id).await
    }

    /// List SDGs with optional sorting and pagination.
    pub async fn list(&self, filter: Option<SdgFilter>) -> Result<Vec<Sdg>, SdgError> {
        self.repo
            .list(filter)
            .await
            .map_err(|e| SdgError::StorageError(e.to_string()))
    }

    /// Update an SDG's mutable fields.
    pub async fn update(&self, id: &SdgId, request: UpdateSdgRequest) -> Result<Sdg, SdgError> {
        let mut sdg = self.get(id).await?;

        if let Some(title) = request.title {
            let trimmed = title.trim().to_string();
            if trimmed.is_empty() {
                return Err(SdgError::InvalidTitle("title cannot be empty".to_string()));
            }
            sdg.title = trimmed;
        }
        if let Some(description) = request.description {
            sdg.description = description;
        }
        if let Some(goal_number) = request.goal_number {
            if goal_number < 1 {
                return Err(SdgError::InvalidGoalNumber(goal_number));
            }
            if goal_number != sdg.goal_number {
                let taken = self
                    .repo
                    .get_by_goal_number(goal_number)
                    .await
                    .map_err(|e| SdgError::StorageError(e.to_string()))?;
                if taken.is_some() {
                    return Err(SdgError::GoalNumberConflict(goal_number));
                }
                sdg.goal_number = goal_number;
            }
        }

        sdg.updated_at = chrono::Utc::now();

        self.repo.update(&sdg).await.map_err(|e| match e {
            RepositoryError::NotFound => SdgError::NotFound,
            RepositoryError::Conflict(_) => SdgError::GoalNumberConflict(sdg.goal_number),
            other => SdgError::StorageError(other.to_string()),
        })
    }

    /// Delete an SDG. Storage cascades to modules, sections, and progress.
    pub async fn delete(&self, id: &SdgId) -> Result<(), SdgError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SdgError::NotFound,
            other => SdgError::StorageError(other.to_string()),
        })
    }
}
