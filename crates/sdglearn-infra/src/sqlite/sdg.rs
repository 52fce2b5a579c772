//! SQLite SDG repository implementation.

use sdglearn_core::repository::SortOrder;
use sdglearn_core::repository::sdg::{SdgFilter, SdgRepository};
use sdglearn_types::error::RepositoryError;
use sdglearn_types::sdg::{Sdg, SdgId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `SdgRepository`.
pub struct SqliteSdgRepository {
    pool: DatabasePool,
}

impl SqliteSdgRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the domain Sdg.
struct SdgRow {
    id: String,
    goal_number: i32,
    slug: String,
    title: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl SdgRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            goal_number: row.try_get("goal_number")?,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_sdg(self) -> Result<Sdg, RepositoryError> {
        let id = self
            .id
            .parse::<SdgId>()
            .map_err(|e| RepositoryError::Query(format!("invalid sdg id: {e}")))?;

        Ok(Sdg {
            id,
            goal_number: self.goal_number,
            slug: self.slug,
            title: self.title,
            description: self.description,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn map_unique_violation(db_err: &dyn sqlx::error::DatabaseError, sdg: &Sdg) -> RepositoryError {
    // SQLite reports "UNIQUE constraint failed: sdgs.<column>"
    let message = db_err.message();
    if message.contains("goal_number") {
        RepositoryError::Conflict(format!("goal number {} already exists", sdg.goal_number))
    } else {
        RepositoryError::Conflict(format!("slug '{}' already exists", sdg.slug))
    }
}

impl SdgRepository for SqliteSdgRepository {
    async fn create(&self, sdg: &Sdg) -> Result<Sdg, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO sdgs (id, goal_number, slug, title, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(sdg.id.to_string())
        .bind(sdg.goal_number)
        .bind(&sdg.slug)
        .bind(&sdg.title)
        .bind(&sdg.description)
        .bind(format_datetime(&sdg.created_at))
        .bind(format_datetime(&sdg.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(sdg.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(map_unique_violation(db_err.as_ref(), sdg))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &SdgId) -> Result<Option<Sdg>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sdgs WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            SdgRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_sdg()
        })
        .transpose()
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Sdg>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sdgs WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            SdgRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_sdg()
        })
        .transpose()
    }

    async fn get_by_goal_number(&self, goal_number: i32) -> Result<Option<Sdg>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sdgs WHERE goal_number = ?")
            .bind(goal_number)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|row| {
            SdgRow::from_row(&row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_sdg()
        })
        .transpose()
    }

    async fn list(&self, filter: Option<SdgFilter>) -> Result<Vec<Sdg>, RepositoryError> {
        let filter = filter.unwrap_or_default();
        let mut sql = String::from("SELECT * FROM sdgs");

        // Whitelist allowed sort fields to prevent SQL injection
        let sort_field = filter.sort_by.as_deref().unwrap_or("goal_number");
        let safe_sort = match sort_field {
            "goal_number" | "slug" | "title" | "created_at" | "updated_at" => sort_field,
            _ => "goal_number",
        };
        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY {safe_sort} {order}"));

        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = filter.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sdgs = Vec::with_capacity(rows.len());
        for row in &rows {
            let sdg_row =
                SdgRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sdgs.push(sdg_row.into_sdg()?);
        }

        Ok(sdgs)
    }

    async fn update(&self, sdg: &Sdg) -> Result<Sdg, RepositoryError> {
        let result = sqlx::query(
            "UPDATE sdgs SET goal_number = ?, slug = ?, title = ?, description = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(sdg.goal_number)
        .bind(&sdg.slug)
        .bind(&sdg.title)
        .bind(&sdg.description)
        .bind(format_datetime(&sdg.updated_at))
        .bind(sdg.id.to_string())
        .execute(&self.pool.writer)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                return Err(map_unique_violation(db_err.as_ref(), sdg));
            }
            Err(e) => return Err(RepositoryError::Query(e.to_string())),
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(sdg.clone())
    }

    async fn delete(&self, id: &SdgId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sdgs WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sdglearn_types::sdg::slugify;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_sdg(goal_number: i32, title: &str) -> Sdg {
        let now = Utc::now();
        Sdg {
            id: SdgId::new(),
            goal_number,
            slug: slugify(title),
            title: title.to_string(),
            description: format!("All about {title}"),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        let sdg = make_sdg(13, "Climate Action");

        let created = repo.create(&sdg).await.unwrap();
        assert_eq!(created.title, "Climate Action");

        let found = repo.get_by_id(&sdg.id).await.unwrap().unwrap();
        assert_eq!(found.slug, "climate-action");
        assert_eq!(found.goal_number, 13);
    }

    #[tokio::test]
    async fn test_get_by_slug_and_goal_number() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        repo.create(&make_sdg(14, "Life Below Water")).await.unwrap();

        let by_slug = repo.get_by_slug("life-below-water").await.unwrap().unwrap();
        assert_eq!(by_slug.goal_number, 14);

        let by_number = repo.get_by_goal_number(14).await.unwrap().unwrap();
        assert_eq!(by_number.slug, "life-below-water");

        assert!(repo.get_by_goal_number(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_by_goal_number() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        repo.create(&make_sdg(13, "Climate Action")).await.unwrap();
        repo.create(&make_sdg(1, "No Poverty")).await.unwrap();
        repo.create(&make_sdg(4, "Quality Education")).await.unwrap();

        let all = repo.list(None).await.unwrap();
        let numbers: Vec<i32> = all.iter().map(|s| s.goal_number).collect();
        assert_eq!(numbers, vec![1, 4, 13]);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        for n in 1..=5 {
            repo.create(&make_sdg(n, &format!("Goal {n}"))).await.unwrap();
        }

        let page = repo
            .list(Some(SdgFilter {
                limit: Some(2),
                offset: Some(2),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].goal_number, 3);
    }

    #[tokio::test]
    async fn test_goal_number_conflict() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        repo.create(&make_sdg(5, "Gender Equality")).await.unwrap();

        let err = repo.create(&make_sdg(5, "Something Else")).await.unwrap_err();
        match err {
            RepositoryError::Conflict(msg) => assert!(msg.contains("goal number 5")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slug_conflict() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        repo.create(&make_sdg(6, "Clean Water")).await.unwrap();

        let err = repo.create(&make_sdg(7, "Clean Water")).await.unwrap_err();
        match err {
            RepositoryError::Conflict(msg) => assert!(msg.contains("slug")),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);
        let mut sdg = make_sdg(15, "Life on Land");
        repo.create(&sdg).await.unwrap();

        sdg.description = "Forests, deserts, biodiversity".to_string();
        sdg.updated_at = Utc::now();
        repo.update(&sdg).await.unwrap();

        let found = repo.get_by_id(&sdg.id).await.unwrap().unwrap();
        assert!(found.description.contains("biodiversity"));

        repo.delete(&sdg.id).await.unwrap();
        assert!(repo.get_by_id(&sdg.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteSdgRepository::new(pool);

        let err = repo.delete(&SdgId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
