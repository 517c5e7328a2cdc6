// ABOUTME: Configuration loading from defaults, an optional TOML file, .env and the process environment

use crate::client::{ApiKey, Credentials};
use crate::error::{ArtemisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENV_ADDRESS: &str = "ARTEMIS_ADDRESS";
/// Spelling used by older deployments' .env files.
pub const ENV_ADDRESS_LEGACY: &str = "ADRESS";
pub const ENV_QUERY_KEY: &str = "ARTEMIS_KEY_1";
pub const ENV_INGEST_KEY: &str = "ARTEMIS_KEY_2";
pub const ENV_DEFAULT_COLLECTION: &str = "DEFAULT_COLLECTION_ID";
pub const ENV_DOCUMENT_COLLECTION: &str = "ARTEMIS_DOCUMENT_COLLECTION_ID";
pub const ENV_EXPORT_DIR: &str = "ARTEMIS_EXPORT_DIR";
pub const ENV_LOG_DIR: &str = "ARTEMIS_LOG_DIR";
pub const ENV_REQUEST_TIMEOUT: &str = "ARTEMIS_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub address: Option<String>,
    pub query_api_key: Option<String>,
    pub ingest_api_key: Option<String>,
    pub default_collection_id: Option<String>,
    /// Collection the document manager lists, deletes from and ingests into.
    /// Falls back to `default_collection_id`.
    pub document_collection_id: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: None,
            query_api_key: None,
            ingest_api_key: None,
            default_collection_id: None,
            document_collection_id: None,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let directory = dirs::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { directory }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: artemis_home().join("logs"),
        }
    }
}

/// Fully resolved settings needed to talk to the service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub address: String,
    pub credentials: Credentials,
    pub default_collection_id: String,
    pub document_collection_id: String,
    pub request_timeout_secs: u64,
}

pub fn artemis_home() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".artemis"))
        .unwrap_or_else(|| PathBuf::from(".artemis"))
}

impl AppConfig {
    /// Load configuration using the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` (or `~/.artemis/config.toml`) when it exists,
    /// then applying `.env` and process environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map_or_else(|| artemis_home().join("config.toml"), Path::to_path_buf);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            info!("Loading configuration from {}", config_path.display());
            Self::from_toml(&content)?
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
            Self::default()
        };

        if let Ok(dotenv) = dotenvy::dotenv() {
            debug!("Loaded environment overrides from {}", dotenv.display());
        }
        config.apply_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ArtemisError::Config(format!("failed to parse config file: {e}")))
    }

    /// Overlay values found through `lookup` onto this configuration.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(address) = non_empty(ENV_ADDRESS).or_else(|| non_empty(ENV_ADDRESS_LEGACY)) {
            self.service.address = Some(address);
        }
        if let Some(key) = non_empty(ENV_QUERY_KEY) {
            self.service.query_api_key = Some(key);
        }
        if let Some(key) = non_empty(ENV_INGEST_KEY) {
            self.service.ingest_api_key = Some(key);
        }
        if let Some(id) = non_empty(ENV_DEFAULT_COLLECTION) {
            self.service.default_collection_id = Some(id);
        }
        if let Some(id) = non_empty(ENV_DOCUMENT_COLLECTION) {
            self.service.document_collection_id = Some(id);
        }
        if let Some(secs) = non_empty(ENV_REQUEST_TIMEOUT).and_then(|v| v.trim().parse().ok()) {
            self.service.request_timeout_secs = secs;
        }
        if let Some(dir) = non_empty(ENV_EXPORT_DIR) {
            self.export.directory = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty(ENV_LOG_DIR) {
            self.logging.directory = PathBuf::from(dir);
        }
    }

    /// Validate the service section, naming the first missing key.
    pub fn service_settings(&self) -> Result<ServiceSettings> {
        let required = |value: &Option<String>, key: &str| {
            value
                .clone()
                .ok_or_else(|| ArtemisError::Config(format!("{key} is not set")))
        };

        let address = required(&self.service.address, ENV_ADDRESS)?;
        let query_key = required(&self.service.query_api_key, ENV_QUERY_KEY)?;
        let ingest_key = required(&self.service.ingest_api_key, ENV_INGEST_KEY)?;
        let default_collection_id =
            required(&self.service.default_collection_id, ENV_DEFAULT_COLLECTION)?;
        let document_collection_id = self
            .service
            .document_collection_id
            .clone()
            .unwrap_or_else(|| default_collection_id.clone());

        Ok(ServiceSettings {
            address: address.trim_end_matches('/').to_string(),
            credentials: Credentials::new(ApiKey::new(query_key), ApiKey::new(ingest_key)),
            default_collection_id,
            document_collection_id,
            request_timeout_secs: self.service.request_timeout_secs,
        })
    }
}
