use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_ENV: &str = "POSTMIND_API_URL";
pub const SESSION_ENV: &str = "POSTMIND_SESSION";
pub const LOG_FILE_ENV: &str = "POSTMIND_LOG_FILE";

/// Client configuration that can be loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Backend base URL; every endpoint path is relative to it
    pub api_url: String,

    /// Session cookie issued by the backend after OAuth login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    pub request_timeout_secs: u64,

    /// Log destination; the terminal UI owns stdout so logs only go to a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_cookie: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

/// Values that win over the config file. Built from the environment and
/// from command line flags, applied in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub session_cookie: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: non_empty(API_URL_ENV),
            session_cookie: non_empty(SESSION_ENV),
            request_timeout_secs: None,
            log_file: non_empty(LOG_FILE_ENV).map(PathBuf::from),
        }
    }
}

impl ClientConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ClientConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `<config_dir>/postmind/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("postmind").join("config.json"))
    }

    /// Resolve the effective configuration: defaults, then the file (explicit
    /// path, or the default path when it exists), then each override layer.
    pub fn resolve(explicit: Option<&Path>, layers: &[ConfigOverrides]) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path)?,
                _ => Self::default(),
            },
        };
        for layer in layers {
            config.apply(layer);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api_url = url.clone();
        }
        if let Some(cookie) = &overrides.session_cookie {
            self.session_cookie = Some(cookie.clone());
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(path) = &overrides.log_file {
            self.log_file = Some(path.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.request_timeout_secs == 0 {
            bail!("requestTimeoutSecs must be greater than zero");
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.api_url.trim())
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            bail!("API URL must be an http(s) URL: {}", self.api_url);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_config_with_all_fields() {
        let json = r#"{
            "apiUrl": "https://postmind.example.com",
            "sessionCookie": "session=abc",
            "requestTimeoutSecs": 10,
            "logFile": "/tmp/postmind.log"
        }"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_url, "https://postmind.example.com");
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/postmind.log")));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"apiUrl": "http://127.0.0.1:9000"}}"#).unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert!(config.session_cookie.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ClientConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_override_layers_apply_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"apiUrl": "http://file:1", "requestTimeoutSecs": 5}}"#
        )
        .unwrap();

        let env = ConfigOverrides {
            api_url: Some("http://env:2".to_string()),
            session_cookie: Some("session=env".to_string()),
            ..Default::default()
        };
        let cli = ConfigOverrides {
            api_url: Some("http://cli:3".to_string()),
            request_timeout_secs: Some(7),
            ..Default::default()
        };

        let config = ClientConfig::resolve(Some(file.path()), &[env, cli]).unwrap();
        assert_eq!(config.api_url, "http://cli:3");
        assert_eq!(config.session_cookie.as_deref(), Some("session=env"));
        assert_eq!(config.request_timeout_secs, 7);
    }

    #[test]
    fn test_env_lookup_ignores_blank_values() {
        let vars: HashMap<&str, &str> = [
            (API_URL_ENV, "https://api.example.com"),
            (SESSION_ENV, "   "),
            (LOG_FILE_ENV, "/var/log/postmind.log"),
        ]
        .into_iter()
        .collect();

        let overrides = ConfigOverrides::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(overrides.api_url.as_deref(), Some("https://api.example.com"));
        assert!(overrides.session_cookie.is_none());
        assert_eq!(
            overrides.log_file,
            Some(PathBuf::from("/var/log/postmind.log"))
        );
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = ClientConfig::default();
        config.api_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api_url = "https://example.com/backend".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
