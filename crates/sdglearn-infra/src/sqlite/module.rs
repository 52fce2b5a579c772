//! SQLite module repository implementation.

use sdglearn_core::repository::module::ModuleRepository;
use sdglearn_types::error::RepositoryError;
use sdglearn_types::module::{Module, ModuleId};
use sdglearn_types::sdg::SdgId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ModuleRepository`.
pub struct SqliteModuleRepository {
    pool: DatabasePool,
}

impl SqliteModuleRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct ModuleRow {
    id: String,
    sdg_id: String,
    title: String,
    subtitle: String,
    position: i64,
    created_at: String,
    updated_at: String,
}

impl ModuleRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            sdg_id: row.try_get("sdg_id")?,
            title: row.try_get("title")?,
            subtitle: row.try_get("subtitle")?,
            position: row.try_get("position")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_module(self) -> Result<Module, RepositoryError> {
        let id = self
            .id
            .parse::<ModuleId>()
            .map_err(|e| RepositoryError::Query(format!("invalid module id: {e}")))?;
        let sdg_id = self
            .sdg_id
            .parse::<SdgId>()
            .map_err(|e| RepositoryError::Query(format!("invalid sdg id: {e}")))?;

        Ok(Module {
            id,
            sdg_id,
            title: self.title,
            subtitle: self.subtitle,
            position: self.position,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

impl ModuleRepository for SqliteModuleRepository {
    async fn create(&self, module: &Module) -> Result<Module, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO modules (id, sdg_id, title, subtitle, position, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(module.id.to_string())
        .bind(module.sdg_id.to_string())
        .bind(&module.title)
        .bind(&module.subtitle)
        .bind(module.position)
        .bind(format_datetime(&module.created_at))
        .bind(format_datetime(&module.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(module.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("FOREIGN KEY") => {
                Err(RepositoryError::Conflict("sdg does not exist".to_string()))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &ModuleId) -> Result<Option<Module>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM modules WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            ModuleRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_module()
        })
        .transpose()
    }

    async fn list_by_sdg(&self, sdg_id: &SdgId) -> Result<Vec<Module>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM modules WHERE sdg_id = ? ORDER BY position ASC")
            .bind(sdg_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut modules = Vec::with_capacity(rows.len());
        for row in &rows {
            let module_row =
                ModuleRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            modules.push(module_row.into_module()?);
        }

        Ok(modules)
    }

    async fn update(&self, module: &Module) -> Result<Module, RepositoryError> {
        let result = sqlx::query(
            "UPDATE modules SET title = ?, subtitle = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&module.title)
        .bind(&module.subtitle)
        .bind(format_datetime(&module.updated_at))
        .bind(module.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(module.clone())
    }

    async fn update_positions(
        &self,
        positions: &[(ModuleId, i64)],
    ) -> Result<(), RepositoryError> {
        // One transaction so a crash mid-renumber cannot leave duplicates.
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for (id, position) in positions {
            sqlx::query("UPDATE modules SET position = ? WHERE id = ?")
                .bind(position)
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn delete(&self, id: &ModuleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM modules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
