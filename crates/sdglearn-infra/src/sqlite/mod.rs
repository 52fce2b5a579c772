//! SQLite persistence via sqlx.
//!
//! One repository module per aggregate, all sharing the split reader/writer
//! pool from [`pool`].

pub mod module;
pub mod pool;
pub mod progress;
pub mod sdg;
pub mod section;

use chrono::{DateTime, Utc};
use sdglearn_types::error::RepositoryError;

/// Parse an RFC 3339 timestamp column.
pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Format a timestamp for storage.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
