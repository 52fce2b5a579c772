use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for an SDG, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SdgId(pub Uuid);

impl SdgId {
    /// Create a new SdgId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create an SdgId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SdgId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SdgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SdgId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A Sustainable Development Goal: the top-level content category.
///
/// Each SDG carries a display number (1-17 for the canonical UN goals, though
/// the catalog accepts any positive number for custom curricula), a URL-safe
/// slug, and an ordered list of modules stored separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sdg {
    pub id: SdgId,
    /// Display number shown to learners (unique across the catalog).
    pub goal_number: i32,
    /// URL-safe unique slug derived from the title ("Climate Action" -> "climate-action").
    pub slug: String,
    pub title: String,
    /// Short description shown on the goal card.
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new SDG. Only `goal_number` and `title` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSdgRequest {
    pub goal_number: i32,
    pub title: String,
    pub description: Option<String>,
}

/// Request to update an SDG. All fields optional; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSdgRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_number: Option<i32>,
}

/// Generate a URL-safe slug from a display title.
///
/// Lowercases, replaces runs of non-alphanumeric characters with a single
/// hyphen, and trims hyphens from both ends.
///
/// # Examples
///
/// ```
/// use sdglearn_types::sdg::slugify;
///
/// assert_eq!(slugify("Climate Action"), "climate-action");
/// assert_eq!(slugify("Life  Below  Water!"), "life-below-water");
/// assert_eq!(slugify("--Zero Hunger--"), "zero-hunger");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
