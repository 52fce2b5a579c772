//! SQLite section repository implementation.
//!
//! The payload union is stored as internally-tagged JSON in the `payload`
//! column; the `kind` column duplicates the tag so dashboards can GROUP BY
//! without parsing JSON.

use sdglearn_core::repository::section::SectionRepository;
use sdglearn_types::error::RepositoryError;
use sdglearn_types::module::ModuleId;
use sdglearn_types::section::{Section, SectionId, SectionPayload};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `SectionRepository`.
pub struct SqliteSectionRepository {
    pool: DatabasePool,
}

impl SqliteSectionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct SectionRow {
    id: String,
    module_id: String,
    order_id: i64,
    title: String,
    payload: String,
    created_at: String,
    updated_at: String,
}

impl SectionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            module_id: row.try_get("module_id")?,
            order_id: row.try_get("order_id")?,
            title: row.try_get("title")?,
            payload: row.try_get("payload")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_section(self) -> Result<Section, RepositoryError> {
        let id = self
            .id
            .parse::<SectionId>()
            .map_err(|e| RepositoryError::Query(format!("invalid section id: {e}")))?;
        let module_id = self
            .module_id
            .parse::<ModuleId>()
            .map_err(|e| RepositoryError::Query(format!("invalid module id: {e}")))?;

        let payload: SectionPayload = serde_json::from_str(&self.payload)
            .map_err(|e| RepositoryError::Serialization(format!("invalid payload JSON: {e}")))?;

        Ok(Section {
            id,
            module_id,
            order_id: self.order_id,
            title: self.title,
            payload,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn rows_to_sections(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Section>, RepositoryError> {
    let mut sections = Vec::with_capacity(rows.len());
    for row in rows {
        let section_row =
            SectionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
        sections.push(section_row.into_section()?);
    }
    Ok(sections)
}

impl SectionRepository for SqliteSectionRepository {
    async fn create(&self, section: &Section) -> Result<Section, RepositoryError> {
        let payload_json = serde_json::to_string(&section.payload)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO sections (id, module_id, order_id, kind, title, payload, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(section.id.to_string())
        .bind(section.module_id.to_string())
        .bind(section.order_id)
        .bind(section.payload.kind().to_string())
        .bind(&section.title)
        .bind(&payload_json)
        .bind(format_datetime(&section.created_at))
        .bind(format_datetime(&section.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(section.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("FOREIGN KEY") => Err(
                RepositoryError::Conflict("module does not exist".to_string()),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &SectionId) -> Result<Option<Section>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sections WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            SectionRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_section()
        })
        .transpose()
    }

    async fn list_by_module(&self, module_id: &ModuleId) -> Result<Vec<Section>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM sections WHERE module_id = ? ORDER BY order_id ASC")
            .bind(module_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_sections(&rows)
    }

    async fn update(&self, section: &Section) -> Result<Section, RepositoryError> {
        let payload_json = serde_json::to_string(&section.payload)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE sections SET kind = ?, title = ?, payload = ?, updated_at = ? WHERE id = ?",
        )
        .bind(section.payload.kind().to_string())
        .bind(&section.title)
        .bind(&payload_json)
        .bind(format_datetime(&section.updated_at))
        .bind(section.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(section.clone())
    }

    async fn update_order(&self, order: &[(SectionId, i64)]) -> Result<(), RepositoryError> {
        // One transaction so a crash mid-renumber cannot leave duplicates.
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for (id, order_id) in order {
            sqlx::query("UPDATE sections SET order_id = ? WHERE id = ?")
                .bind(order_id)
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }

    async fn delete(&self, id: &SectionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn search(&self, query: &str, limit: i64) -> Result<Vec<Section>, RepositoryError> {
        let pattern = format!("%{}%", query.replace('%', "\\%").replace('_', "\\_"));

        let rows = sqlx::query(
            "SELECT * FROM sections
             WHERE title LIKE ? ESCAPE '\\' OR payload LIKE ? ESCAPE '\\'
             ORDER BY module_id, order_id
             LIMIT ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows_to_sections(&rows)
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
    use sdglearn_types::sdg::{Sdg, SdgId, slugify};
    use sdglearn_types::section::{QuizOption, SectionKind};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_module(pool: &DatabasePool) -> Module {
        let now = Utc::now();
        let sdg = Sdg {
            id: SdgId::new(),
            goal_number: 13,
            slug: slugify("Climate Action"),
            title: "Climate Action".to_string(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        };
        SqliteSdgRepository::new(pool.clone())
            .create(&sdg)
            .await
            .unwrap();

        let module = Module {
            id: ModuleId::new(),
            sdg_id: sdg.id,
            title: "Intro".to_string(),
            subtitle: String::new(),
            position: 0,
            created_at: now,
            updated_at: now,
        };
        SqliteModuleRepository::new(pool.clone())
            .create(&module)
            .await
            .unwrap()
    }

    fn make_section(module_id: &ModuleId, order_id: i64, payload: SectionPayload) -> Section {
        let now = Utc::now();
        Section {
            id: SectionId::new(),
            module_id: module_id.clone(),
            order_id,
            title: String::new(),
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_payload_roundtrip() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool);

        let payload = SectionPayload::Quiz {
            question: "Which gas drives warming?".to_string(),
            options: vec![
                QuizOption {
                    text: "CO2".to_string(),
                    correct: true,
                },
                QuizOption {
                    text: "Helium".to_string(),
                    correct: false,
                },
            ],
        };
        let section = make_section(&module.id, 0, payload.clone());
        repo.create(&section).await.unwrap();

        let found = repo.get_by_id(&section.id).await.unwrap().unwrap();
        assert_eq!(found.payload, payload);
        assert_eq!(found.payload.kind(), SectionKind::Quiz);
    }

    #[tokio::test]
    async fn test_list_ordered_by_order_id() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool);

        for (order_id, body) in [(2, "third"), (0, "first"), (1, "second")] {
            repo.create(&make_section(
                &module.id,
                order_id,
                SectionPayload::Text {
                    body: body.to_string(),
                },
            ))
            .await
            .unwrap();
        }

        let sections = repo.list_by_module(&module.id).await.unwrap();
        let orders: Vec<i64> = sections.iter().map(|s| s.order_id).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_update_order_atomic() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool);

        let a = repo
            .create(&make_section(
                &module.id,
                0,
                SectionPayload::Text { body: "a".to_string() },
            ))
            .await
            .unwrap();
        let b = repo
            .create(&make_section(
                &module.id,
                1,
                SectionPayload::Text { body: "b".to_string() },
            ))
            .await
            .unwrap();

        repo.update_order(&[(a.id.clone(), 1), (b.id.clone(), 0)])
            .await
            .unwrap();

        let sections = repo.list_by_module(&module.id).await.unwrap();
        assert_eq!(sections[0].id, b.id);
        assert_eq!(sections[1].id, a.id);
    }

    #[tokio::test]
    async fn test_update_payload_changes_kind() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool);

        let mut section = repo
            .create(&make_section(
                &module.id,
                0,
                SectionPayload::Text { body: "x".to_string() },
            ))
            .await
            .unwrap();

        section.payload = SectionPayload::Header {
            heading: "Welcome".to_string(),
            subheading: None,
        };
        section.updated_at = Utc::now();
        repo.update(&section).await.unwrap();

        let found = repo.get_by_id(&section.id).await.unwrap().unwrap();
        assert_eq!(found.payload.kind(), SectionKind::Header);
    }

    #[tokio::test]
    async fn test_search_title_and_payload() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool);

        let mut titled = make_section(
            &module.id,
            0,
            SectionPayload::Text { body: "nothing".to_string() },
        );
        titled.title = "Renewable energy".to_string();
        repo.create(&titled).await.unwrap();

        repo.create(&make_section(
            &module.id,
            1,
            SectionPayload::Text {
                body: "wind turbines and solar".to_string(),
            },
        ))
        .await
        .unwrap();

        repo.create(&make_section(
            &module.id,
            2,
            SectionPayload::Text { body: "oceans".to_string() },
        ))
        .await
        .unwrap();

        let by_title = repo.search("Renewable", 10).await.unwrap();
        assert_eq!(by_title.len(), 1);

        let by_payload = repo.search("turbines", 10).await.unwrap();
        assert_eq!(by_payload.len(), 1);

        let none = repo.search("volcano", 10).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool);

        for i in 0..5 {
            repo.create(&make_section(
                &module.id,
                i,
                SectionPayload::Text {
                    body: "recycling tips".to_string(),
                },
            ))
            .await
            .unwrap();
        }

        let hits = repo.search("recycling", 3).await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn test_service_reorder_renumbers_and_persists() {
        use sdglearn_core::service::section::SectionService;
        use sdglearn_types::section::CreateSectionRequest;

        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let service = SectionService::new(
            SqliteSectionRepository::new(pool.clone()),
            SqliteModuleRepository::new(pool.clone()),
        );

        for body in ["a", "b", "c", "d"] {
            service
                .add(
                    &module.id,
                    CreateSectionRequest {
                        title: Some(body.to_string()),
                        payload: SectionPayload::Text {
                            body: body.to_string(),
                        },
                    },
                )
                .await
                .unwrap();
        }

        // Drag section 1 ("b") down to index 3
        let reordered = service.reorder(&module.id, 1, 3).await.unwrap();
        let titles: Vec<&str> = reordered.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d", "b"]);
        let orders: Vec<i64> = reordered.iter().map(|s| s.order_id).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);

        // Persisted, not just returned
        let stored = service.list_for_module(&module.id).await.unwrap();
        let titles: Vec<&str> = stored.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d", "b"]);
    }

    #[tokio::test]
    async fn test_service_reorder_out_of_range() {
        use sdglearn_core::service::section::SectionService;
        use sdglearn_types::error::SectionError;
        use sdglearn_types::section::CreateSectionRequest;

        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let service = SectionService::new(
            SqliteSectionRepository::new(pool.clone()),
            SqliteModuleRepository::new(pool.clone()),
        );

        service
            .add(
                &module.id,
                CreateSectionRequest {
                    title: None,
                    payload: SectionPayload::Text { body: "x".to_string() },
                },
            )
            .await
            .unwrap();

        let err = service.reorder(&module.id, 0, 5).await.unwrap_err();
        assert!(matches!(err, SectionError::OutOfRange { index: 5, len: 1 }));
    }

    #[tokio::test]
    async fn test_service_remove_renumbers_survivors() {
        use sdglearn_core::service::section::SectionService;
        use sdglearn_types::section::CreateSectionRequest;

        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let service = SectionService::new(
            SqliteSectionRepository::new(pool.clone()),
            SqliteModuleRepository::new(pool.clone()),
        );

        let mut ids = Vec::new();
        for body in ["a", "b", "c"] {
            let section = service
                .add(
                    &module.id,
                    CreateSectionRequest {
                        title: Some(body.to_string()),
                        payload: SectionPayload::Text {
                            body: body.to_string(),
                        },
                    },
                )
                .await
                .unwrap();
            ids.push(section.id);
        }

        service.remove(&ids[1]).await.unwrap();

        let stored = service.list_for_module(&module.id).await.unwrap();
        let titles: Vec<&str> = stored.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        let orders: Vec<i64> = stored.iter().map(|s| s.order_id).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_delete_cascades_from_module() {
        let pool = test_pool().await;
        let module = seed_module(&pool).await;
        let repo = SqliteSectionRepository::new(pool.clone());

        let section = repo
            .create(&make_section(
                &module.id,
                0,
                SectionPayload::Text { body: "x".to_string() },
            ))
            .await
            .unwrap();

        SqliteModuleRepository::new(pool)
            .delete(&module.id)
            .await
            .unwrap();

        assert!(repo.get_by_id(&section.id).await.unwrap().is_none());
    }
}
