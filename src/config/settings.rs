//! Settings structures for ask-relay configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub completion: CompletionSettings,
    pub search: SearchSettings,
    pub credentials: CredentialSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Merge with environment variables (ASK_RELAY_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ASK_RELAY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ASK_RELAY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("ASK_RELAY_ENV_FILE") {
            self.credentials.env_file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("ASK_RELAY_MODEL") {
            self.completion.model = val;
        }
    }

    /// Check values that would otherwise only fail on the first request
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.completion.base_url)
            .with_context(|| format!("Invalid completion.base_url: {}", self.completion.base_url))?;
        Url::parse(&self.search.base_url)
            .with_context(|| format!("Invalid search.base_url: {}", self.search.base_url))?;

        if !(self.outgoing.request_timeout > 0.0) {
            bail!(
                "outgoing.request_timeout must be positive, got {}",
                self.outgoing.request_timeout
            );
        }
        Duration::try_from_secs_f64(self.outgoing.request_timeout).with_context(|| {
            format!(
                "outgoing.request_timeout is out of range: {}",
                self.outgoing.request_timeout
            )
        })?;
        if self.completion.model.trim().is_empty() {
            bail!("completion.model must not be empty");
        }
        Ok(())
    }

    /// Credential names the upstream clients read
    pub fn credential_names(&self) -> [&str; 2] {
        [
            self.completion.api_key_name.as_str(),
            self.search.api_key_name.as_str(),
        ]
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Completion service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// API root, without the trailing endpoint
    pub base_url: String,
    /// Chat model name
    pub model: String,
    /// Credential holding the API key
    pub api_key_name: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_name: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// Search service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// API root, without the trailing endpoint
    pub base_url: String,
    /// "basic" or "advanced"
    pub search_depth: String,
    /// Maximum number of results requested
    pub max_results: u32,
    /// Credential holding the API key
    pub api_key_name: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.tavily.com".to_string(),
            search_depth: "basic".to_string(),
            max_results: 5,
            api_key_name: "TAVILY_API_KEY".to_string(),
        }
    }
}

/// Where initial credentials come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    /// Path to a `.env` style file
    pub env_file: PathBuf,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(".env"),
        }
    }
}
