//! TOML-based application configuration.
//!
//! Stores service credentials and team settings:
//! - GitHub token, organization, and member logins
//! - Jira site, credentials, and board
//! - Calendar provider and tokens
//! - Team roster and workload weights
//!
//! Configuration is stored at `~/.config/teampulse/config.toml`; any value
//! can be overridden through environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::integrations::{CalendarClient, GitHubClient, JiraClient};
use crate::workload::WorkloadWeights;

/// GitHub connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    /// Organization logins to analyze; falls back to the team roster.
    #[serde(default)]
    pub logins: Vec<String>,
}

/// Jira connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub board_id: Option<u64>,
}

/// Calendar provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub google_token: Option<String>,
    #[serde(default)]
    pub outlook_token: Option<String>,
}

fn default_provider() -> String {
    "google".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            google_token: None,
            outlook_token: None,
        }
    }
}

/// Team roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Display names; fixes analysis membership when non-empty.
    #[serde(default)]
    pub members: Vec<String>,
    /// Calendar emails, looked up per member.
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Alerting thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_overload_threshold")]
    pub overload: f64,
}

fn default_overload_threshold() -> f64 {
    100.0
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            overload: default_overload_threshold(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/teampulse/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub team: TeamConfig,
    #[serde(default)]
    pub weights: WorkloadWeights,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub slack_webhook: Option<String>,
}

impl Config {
    /// Default on-disk location.
    pub fn path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::LoadFailed {
                path: PathBuf::from("~/.config"),
                message: "could not determine the configuration directory".to_string(),
            }
        })?;
        Ok(base.join("teampulse").join("config.toml"))
    }

    /// Load from the default location, then apply environment overrides.
    /// A missing file yields defaults so a fresh install still runs.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Environment variables win over file values.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Same as `apply_env` but with an injectable lookup, for tests.
    pub fn apply_env_with<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
        if let Some(v) = get("GITHUB_TOKEN") {
            self.github.token = Some(v);
        }
        if let Some(v) = get("GITHUB_ORG") {
            self.github.org = Some(v);
        }
        if let Some(v) = get("JIRA_URL") {
            self.jira.url = Some(v);
        }
        if let Some(v) = get("JIRA_EMAIL") {
            self.jira.email = Some(v);
        }
        if let Some(v) = get("JIRA_TOKEN") {
            self.jira.token = Some(v);
        }
        if let Some(v) = get("JIRA_BOARD_ID") {
            if let Ok(id) = v.parse() {
                self.jira.board_id = Some(id);
            }
        }
        if let Some(v) = get("CALENDAR_PROVIDER") {
            self.calendar.provider = v;
        }
        if let Some(v) = get("GOOGLE_CALENDAR_TOKEN") {
            self.calendar.google_token = Some(v);
        }
        if let Some(v) = get("OUTLOOK_TOKEN") {
            self.calendar.outlook_token = Some(v);
        }
        if let Some(v) = get("SLACK_WEBHOOK") {
            self.slack_webhook = Some(v);
        }
    }

    fn require<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str, ConfigError> {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    pub fn github_client(&self) -> Result<GitHubClient> {
        let token = Self::require(&self.github.token, "github.token")?;
        let org = Self::require(&self.github.org, "github.org")?;
        Ok(GitHubClient::new(token, org))
    }

    /// GitHub logins to analyze, falling back to the roster names.
    pub fn github_logins(&self) -> Vec<String> {
        if self.github.logins.is_empty() {
            self.team.members.clone()
        } else {
            self.github.logins.clone()
        }
    }

    pub fn jira_client(&self) -> Result<JiraClient> {
        let url = Self::require(&self.jira.url, "jira.url")?;
        let email = Self::require(&self.jira.email, "jira.email")?;
        let token = Self::require(&self.jira.token, "jira.token")?;
        Ok(JiraClient::new(url, email, token))
    }

    pub fn jira_board_id(&self) -> Result<u64> {
        self.jira
            .board_id
            .ok_or_else(|| ConfigError::MissingKey("jira.board_id".to_string()).into())
    }

    pub fn calendar_client(&self) -> Result<CalendarClient> {
        let token = match self.calendar.provider.to_lowercase().as_str() {
            "outlook" => Self::require(&self.calendar.outlook_token, "calendar.outlook_token")?,
            _ => Self::require(&self.calendar.google_token, "calendar.google_token")?,
        };
        Ok(CalendarClient::new(&self.calendar.provider, token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.calendar.provider, "google");
        assert_eq!(config.thresholds.overload, 100.0);
        assert!(config.team.members.is_empty());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.github.org = Some("acme".to_string());
        config.team.members = vec!["alice".to_string(), "bob".to_string()];
        config.weights.open_prs = 4.0;
        config.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.github.org.as_deref(), Some("acme"));
        assert_eq!(loaded.team.members.len(), 2);
        assert_eq!(loaded.weights.open_prs, 4.0);
        // Untouched weights keep their defaults.
        assert_eq!(loaded.weights.max_story_points, 13.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[github]\norg = \"acme\"\n").expect("parse");
        assert_eq!(config.github.org.as_deref(), Some("acme"));
        assert_eq!(config.weights.open_prs, 3.0);
        assert_eq!(config.thresholds.overload, 100.0);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config::default();
        config.github.token = Some("from-file".to_string());
        config.apply_env_with(|key| match key {
            "GITHUB_TOKEN" => Some("from-env".to_string()),
            "JIRA_BOARD_ID" => Some("12".to_string()),
            _ => None,
        });
        assert_eq!(config.github.token.as_deref(), Some("from-env"));
        assert_eq!(config.jira.board_id, Some(12));
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = Config::default();
        assert!(config.github_client().is_err());
        assert!(config.jira_client().is_err());
        assert!(config.calendar_client().is_err());
    }

    #[test]
    fn test_github_logins_fall_back_to_roster() {
        let mut config = Config::default();
        config.team.members = vec!["alice".to_string()];
        assert_eq!(config.github_logins(), vec!["alice".to_string()]);
        config.github.logins = vec!["ghalice".to_string()];
        assert_eq!(config.github_logins(), vec!["ghalice".to_string()]);
    }
}
