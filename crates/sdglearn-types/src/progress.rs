use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::module::ModuleId;
use crate::sdg::SdgId;

/// Per-user completion state for a single module.
///
/// Two states only: a module is either still to do or done. Unlocking of the
/// next module derives from this, it is not a third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Todo,
    Done,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Todo => write!(f, "todo"),
            ModuleStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for ModuleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(ModuleStatus::Todo),
            "done" => Ok(ModuleStatus::Done),
            other => Err(format!("invalid module status: '{other}'")),
        }
    }
}

impl Default for ModuleStatus {
    fn default() -> Self {
        ModuleStatus::Todo
    }
}

/// Stored progress record, keyed (user, module) with upsert semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserModuleProgress {
    pub user_id: String,
    pub module_id: ModuleId,
    pub status: ModuleStatus,
    pub updated_at: DateTime<Utc>,
}

/// Request to set a module's completion status for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetProgressRequest {
    pub status: ModuleStatus,
}

/// One module as the player sees it: status plus the unlock gate result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleAccess {
    pub module_id: ModuleId,
    pub title: String,
    pub position: i64,
    pub status: ModuleStatus,
    /// True when the player may open this module.
    pub unlocked: bool,
}

/// Aggregate completion for one SDG, computed from module statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSdgProgress {
    pub user_id: String,
    pub sdg_id: SdgId,
    pub total_modules: u32,
    pub done_modules: u32,
    /// Rounded percentage, 0 for an SDG with no modules.
    pub percent_complete: u8,
}

/// Full per-SDG view returned to the player: gated module list + summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdgAccessView {
    pub sdg_id: SdgId,
    pub modules: Vec<ModuleAccess>,
    pub summary: UserSdgProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_status_roundtrip() {
        for status in [ModuleStatus::Todo, ModuleStatus::Done] {
            let parsed: ModuleStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_module_status_default_is_todo() {
        assert_eq!(ModuleStatus::default(), ModuleStatus::Todo);
    }

    #[test]
    fn test_module_status_invalid() {
        assert!("in_progress".parse::<ModuleStatus>().is_err());
    }

    #[test]
    fn test_module_status_serde_lowercase() {
        let json = serde_json::to_string(&ModuleStatus::Done).unwrap();
        assert_eq!(json, r#""done""#);
    }
}
