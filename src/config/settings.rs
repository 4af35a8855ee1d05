//! Settings structures for the relay

use anyhow::Result;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that make the relay refuse to start
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The search credential or the search-scope identifier is absent
    #[error("API_KEY or CX is missing. Server cannot start.")]
    MissingCredentials,

    /// An upstream base URL does not parse
    #[error("invalid {name} URL '{value}': {source}")]
    InvalidEndpoint {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// A timeout is not a positive number of seconds
    #[error("invalid {name} timeout: {value}")]
    InvalidTimeout { name: &'static str, value: f64 },
}

/// Main settings structure, loadable from settings.yml and the environment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub summarizer: SummarizerSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with process environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge with variables supplied by `lookup`
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("API_KEY") {
            self.search.api_key = Some(Secret::new(val));
        }
        if let Some(val) = lookup("CX") {
            self.search.cx = Some(val);
        }
        if let Some(val) = lookup("OLLAMA_URL") {
            self.summarizer.base_url = val;
        }
        if let Some(val) = lookup("OLLAMA_MODEL") {
            self.summarizer.model = val;
        }
        if let Some(val) = lookup("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("STATIC_DIR") {
            self.server.static_dir = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Check that the relay has everything it needs to serve requests
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let key_present = self
            .search
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());
        let cx_present = self
            .search
            .cx
            .as_deref()
            .is_some_and(|cx| !cx.trim().is_empty());

        if !key_present || !cx_present {
            return Err(ConfigError::MissingCredentials);
        }

        check_url("search endpoint", &self.search.endpoint)?;
        check_url("Ollama", &self.summarizer.base_url)?;
        check_timeout("search", self.search.request_timeout)?;
        check_timeout("summarizer", self.summarizer.request_timeout)?;

        Ok(())
    }
}

fn check_timeout(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    match Duration::try_from_secs_f64(value) {
        Ok(timeout) if !timeout.is_zero() => Ok(()),
        _ => Err(ConfigError::InvalidTimeout { name, value }),
    }
}

fn check_url(name: &'static str, value: &str) -> std::result::Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidEndpoint {
            name,
            value: value.to_string(),
            source,
        })
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Directory holding the frontend bundle, served when it exists
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: Some(PathBuf::from("public")),
        }
    }
}

/// Google Custom Search settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Custom Search JSON API endpoint
    pub endpoint: String,
    /// API key
    pub api_key: Option<Secret<String>>,
    /// Search engine (scope) identifier
    pub cx: Option<String>,
    /// Request timeout in seconds
    pub request_timeout: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: None,
            cx: None,
            request_timeout: 10.0,
        }
    }
}

/// Ollama summarizer settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Ollama base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            request_timeout: 120.0,
        }
    }
}
