//! SQLite progress repository implementation.
//!
//! Progress is keyed (user_id, module_id); `upsert` uses ON CONFLICT so the
//! player can flip a module between todo and done without read-modify-write.

use sdglearn_core::repository::progress::ProgressRepository;
use sdglearn_types::error::RepositoryError;
use sdglearn_types::module::ModuleId;
use sdglearn_types::progress::{ModuleStatus, UserModuleProgress};
use sdglearn_types::sdg::SdgId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ProgressRepository`.
pub struct SqliteProgressRepository {
    pool: DatabasePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_progress(row: &sqlx::sqlite::SqliteRow) -> Result<UserModuleProgress, RepositoryError> {
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let module_id: String = row
        .try_get("module_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(UserModuleProgress {
        user_id,
        module_id: module_id
            .parse::<ModuleId>()
            .map_err(|e| RepositoryError::Query(format!("invalid module id: {e}")))?,
        status: status
            .parse::<ModuleStatus>()
            .map_err(RepositoryError::Query)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl ProgressRepository for SqliteProgressRepository {
    async fn upsert(
        &self,
        progress: &UserModuleProgress,
    ) -> Result<UserModuleProgress, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO user_module_progress (user_id, module_id, status, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id, module_id)
             DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at",
        )
        .bind(&progress.user_id)
        .bind(progress.module_id.to_string())
        .bind(progress.status.to_string())
        .bind(format_datetime(&progress.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(progress.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("FOREIGN KEY") => Err(
                RepositoryError::Conflict("module does not exist".to_string()),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get(
        &self,
        user_id: &str,
        module_id: &ModuleId,
    ) -> Result<Option<UserModuleProgress>, RepositoryError> {
        let row = sqlx::query(
            "SELECT * FROM user_module_progress WHERE user_id = ? AND module_id = ?",
        )
        .bind(user_id)
        .bind(module_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| row_to_progress(&row)).transpose()
    }

    async fn list_for_user_sdg(
        &self,
        user_id: &str,
        sdg_id: &SdgId,
    ) -> Result<Vec<UserModuleProgress>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT p.* FROM user_module_progress p
             JOIN modules m ON m.id = p.module_id
             WHERE p.user_id = ? AND m.sdg_id = ?
             ORDER BY m.position ASC",
        )
        .bind(user_id)
        .bind(sdg_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(row_to_progress).collect()
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserModuleProgress>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM user_module_progress WHERE user_id = ? ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(row_to_progress).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::module::SqliteModuleRepository;
    use crate::sqlite::sdg::SqliteSdgRepository;
    use chrono::Utc;
    use sdglearn_core::repository::module::ModuleRepository;
    use sdglearn_core::repository::sdg::SdgRepository;
    use sdglearn_types::module::Module;
    use sdglearn_types::sdg::{Sdg, slugify};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_modules(pool: &DatabasePool, count: usize) -> (SdgId, Vec<Module>) {
        let now = Utc::now();
        let sdg = Sdg {
            id: SdgId::new(),
            goal_number: 4,
            slug: slugify("Quality Education"),
            title: "Quality Education".to_string(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        };
        SqliteSdgRepository::new(pool.clone())
            .create(&sdg)
            .await
            .unwrap();

        let module_repo = SqliteModuleRepository::new(pool.clone());
        let mut modules = Vec::new();
        for i in 0..count {
            let module = Module {
                id: ModuleId::new(),
                sdg_id: sdg.id.clone(),
                title: format!("Module {i}"),
                subtitle: String::new(),
                position: i as i64,
                created_at: now,
                updated_at: now,
            };
            modules.push(module_repo.create(&module).await.unwrap());
        }
        (sdg.id, modules)
    }

    fn record(user_id: &str, module_id: &ModuleId, status: ModuleStatus) -> UserModuleProgress {
        UserModuleProgress {
            user_id: user_id.to_string(),
            module_id: module_id.clone(),
            status,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_insert_then_overwrite() {
        let pool = test_pool().await;
        let (_, modules) = seed_modules(&pool, 1).await;
        let repo = SqliteProgressRepository::new(pool);

        repo.upsert(&record("alice", &modules[0].id, ModuleStatus::Todo))
            .await
            .unwrap();
        repo.upsert(&record("alice", &modules[0].id, ModuleStatus::Done))
            .await
            .unwrap();

        let found = repo.get("alice", &modules[0].id).await.unwrap().unwrap();
        assert_eq!(found.status, ModuleStatus::Done);
    }

    #[tokio::test]
    async fn test_upsert_requires_existing_module() {
        let pool = test_pool().await;
        let repo = SqliteProgressRepository::new(pool);

        let err = repo
            .upsert(&record("alice", &ModuleId::new(), ModuleStatus::Done))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_for_user_sdg_scoped_to_user() {
        let pool = test_pool().await;
        let (sdg_id, modules) = seed_modules(&pool, 3).await;
        let repo = SqliteProgressRepository::new(pool);

        repo.upsert(&record("alice", &modules[0].id, ModuleStatus::Done))
            .await
            .unwrap();
        repo.upsert(&record("alice", &modules[1].id, ModuleStatus::Todo))
            .await
            .unwrap();
        repo.upsert(&record("bob", &modules[0].id, ModuleStatus::Todo))
            .await
            .unwrap();

        let alice = repo.list_for_user_sdg("alice", &sdg_id).await.unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|p| p.user_id == "alice"));
        // Ordered by module position
        assert_eq!(alice[0].module_id, modules[0].id);
    }

    #[tokio::test]
    async fn test_list_for_user_across_sdgs() {
        let pool = test_pool().await;
        let (_, modules) = seed_modules(&pool, 2).await;
        let repo = SqliteProgressRepository::new(pool);

        repo.upsert(&record("carol", &modules[0].id, ModuleStatus::Done))
            .await
            .unwrap();
        repo.upsert(&record("carol", &modules[1].id, ModuleStatus::Done))
            .await
            .unwrap();

        let all = repo.list_for_user("carol").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_service_unlock_gate_end_to_end() {
        use sdglearn_core::service::progress::ProgressService;

        let pool = test_pool().await;
        let (sdg_id, modules) = seed_modules(&pool, 3).await;
        let service = ProgressService::new(
            SqliteProgressRepository::new(pool.clone()),
            SqliteModuleRepository::new(pool.clone()),
            SqliteSdgRepository::new(pool.clone()),
            false,
        );

        // Fresh learner: only the first module is unlocked, 0% complete
        let view = service.sdg_access("dana", &sdg_id).await.unwrap();
        let unlocked: Vec<bool> = view.modules.iter().map(|m| m.unlocked).collect();
        assert_eq!(unlocked, vec![true, false, false]);
        assert_eq!(view.summary.percent_complete, 0);

        // Completing module 0 unlocks module 1
        service
            .set_status("dana", &modules[0].id, ModuleStatus::Done)
            .await
            .unwrap();
        let view = service.sdg_access("dana", &sdg_id).await.unwrap();
        let unlocked: Vec<bool> = view.modules.iter().map(|m| m.unlocked).collect();
        assert_eq!(unlocked, vec![true, true, false]);
        assert_eq!(view.summary.done_modules, 1);
        assert_eq!(view.summary.percent_complete, 33);

        // Flipping it back to todo re-locks module 1
        service
            .set_status("dana", &modules[0].id, ModuleStatus::Todo)
            .await
            .unwrap();
        let view = service.sdg_access("dana", &sdg_id).await.unwrap();
        assert!(!view.modules[1].unlocked);
    }

    #[tokio::test]
    async fn test_service_overview_counts_per_sdg() {
        use sdglearn_core::service::progress::ProgressService;

        let pool = test_pool().await;
        let (sdg_id, modules) = seed_modules(&pool, 2).await;
        let service = ProgressService::new(
            SqliteProgressRepository::new(pool.clone()),
            SqliteModuleRepository::new(pool.clone()),
            SqliteSdgRepository::new(pool.clone()),
            false,
        );

        service
            .set_status("erin", &modules[0].id, ModuleStatus::Done)
            .await
            .unwrap();
        service
            .set_status("erin", &modules[1].id, ModuleStatus::Done)
            .await
            .unwrap();

        let overview = service.overview("erin").await.unwrap();
        assert_eq!(overview.len(), 1);
        assert_eq!(overview[0].sdg_id, sdg_id);
        assert_eq!(overview[0].percent_complete, 100);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let pool = test_pool().await;
        let (_, modules) = seed_modules(&pool, 1).await;
        let repo = SqliteProgressRepository::new(pool);

        assert!(repo.get("nobody", &modules[0].id).await.unwrap().is_none());
    }
}
