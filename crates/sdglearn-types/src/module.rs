use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::sdg::SdgId;

/// Unique identifier for a module, wrapping a UUID v7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub Uuid);

impl ModuleId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ModuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModuleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An ordered lesson within an SDG.
///
/// Modules are kept dense: `position` runs 0..n-1 within the owning SDG and
/// is renumbered by the module service after every insert, move, or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub sdg_id: SdgId,
    pub title: String,
    /// Secondary line shown under the title in the player.
    pub subtitle: String,
    /// Zero-based position within the SDG. Position 0 is always unlocked.
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a module. Appended at the end of the SDG's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModuleRequest {
    pub title: String,
    pub subtitle: Option<String>,
}

/// Request to update a module's mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Request to move a module to a new position within its SDG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveModuleRequest {
    /// Target zero-based position.
    pub to: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_display_roundtrip() {
        let id = ModuleId::new();
        let parsed: ModuleId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_module_serde_roundtrip() {
        let now = Utc::now();
        let module = Module {
            id: ModuleId::new(),
            sdg_id: SdgId::new(),
            title: "What is climate change?".to_string(),
            subtitle: "The basics".to_string(),
            position: 0,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&module).unwrap();
        let parsed: Module = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, module.id);
        assert_eq!(parsed.position, 0);
    }
}
