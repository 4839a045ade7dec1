use anyhow::{Context, Result};
use chat_view_model::OverflowPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Participant id of the local user; messages from it classify as local
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_participant_id: Option<String>,

    /// Whether the local user is waiting in the lobby
    #[serde(default)]
    pub knocking: bool,

    #[serde(default = "default_true")]
    pub show_display_name: bool,

    /// Participant policy verdict for private replies
    #[serde(default = "default_true")]
    pub private_chat_allowed: bool,

    #[serde(default)]
    pub overflow_policy: OverflowPolicy,

    /// Offset applied when formatting message times
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Path to the config file
    #[serde(skip)]
    pub path: PathBuf,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            local_participant_id: None,
            knocking: false,
            show_display_name: true,
            private_chat_allowed: true,
            overflow_policy: OverflowPolicy::default(),
            utc_offset_minutes: 0,
            path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let mut config: Config = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            config.path = config_path;
            tracing::debug!(path = %config.path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config {
                path: config_path,
                ..Default::default()
            })
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&self.path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    pub fn set_local_participant_id(&mut self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            anyhow::bail!("Participant id must not be empty");
        }
        self.local_participant_id = Some(id.to_string());
        self.save()
    }

    pub fn set_overflow_policy(&mut self, policy: OverflowPolicy) -> Result<()> {
        self.overflow_policy = policy;
        self.save()
    }

    /// Local participant id, preferring a command line override
    pub fn resolve_local_id(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| self.local_participant_id.clone())
            .context("No local participant id. Pass --local or run `cvm config set-local <ID>`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.local_participant_id.is_none());
        assert!(config.show_display_name);
        assert!(config.private_chat_allowed);
        assert_eq!(config.overflow_policy, OverflowPolicy::TotalMinusCap);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path()).unwrap();
        assert!(config.local_participant_id.is_none());
        assert_eq!(config.path, temp.path().join("config.json"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::load(temp.path()).unwrap();

        config.set_local_participant_id("abc123").unwrap();
        config.set_overflow_policy(OverflowPolicy::HiddenEvents).unwrap();

        let loaded = Config::load(temp.path()).unwrap();
        assert_eq!(loaded.local_participant_id.as_deref(), Some("abc123"));
        assert_eq!(loaded.overflow_policy, OverflowPolicy::HiddenEvents);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.json"),
            r#"{"knocking": true, "overflow_policy": "hidden-events"}"#,
        )
        .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert!(config.knocking);
        assert!(config.show_display_name);
        assert_eq!(config.overflow_policy, OverflowPolicy::HiddenEvents);
    }

    #[test]
    fn test_config_rejects_empty_local_id() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::load(temp.path()).unwrap();
        assert!(config.set_local_participant_id("  ").is_err());
    }

    #[test]
    fn test_resolve_local_id_prefers_flag() {
        let mut config = Config::default();
        assert!(config.resolve_local_id(None).is_err());

        config.local_participant_id = Some("from-config".to_string());
        assert_eq!(config.resolve_local_id(None).unwrap(), "from-config");
        assert_eq!(config.resolve_local_id(Some("flag")).unwrap(), "flag");
    }
}
