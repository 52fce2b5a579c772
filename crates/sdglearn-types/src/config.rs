//! Global configuration types for sdglearn.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! list page sizes and the unlock gate. All fields have defaults so a
//! missing or partial file still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the sdglearn platform.
///
/// Loaded from `{data_dir}/config.toml`. Credentials never live here; those
/// come from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default page size for list and search endpoints.
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    /// When true, the progress gate is disabled and every module is unlocked.
    /// Intended for classroom settings where the teacher controls pacing.
    #[serde(default)]
    pub free_navigation: bool,
}

fn default_page_size() -> i64 {
    50
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            free_navigation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.default_page_size, 50);
        assert!(!config.free_navigation);
    }

    #[test]
    fn test_global_config_deserialize_empty() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.default_page_size, 50);
        assert!(!config.free_navigation);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let config: GlobalConfig = toml::from_str(
            r#"
default_page_size = 25
free_navigation = true
"#,
        )
        .unwrap();
        assert_eq!(config.default_page_size, 25);
        assert!(config.free_navigation);
    }

    #[test]
    fn test_global_config_serde_roundtrip() {
        let config = GlobalConfig {
            default_page_size: 10,
            free_navigation: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GlobalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.default_page_size, 10);
        assert!(parsed.free_navigation);
    }
}
