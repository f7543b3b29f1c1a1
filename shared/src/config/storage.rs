//! Persistence backend and uploaded file storage configuration

use serde::{Deserialize, Serialize};

use super::{env_lookup, ConfigError};

/// Backend used for user records and session slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps; state is lost on restart
    #[default]
    Memory,
    /// MySQL through the shared connection pool
    Mysql,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::Mysql),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Persistence backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory receiving uploaded profile images
    pub upload_dir: String,

    /// Public URL prefix under which `upload_dir` is served
    pub public_base_url: String,

    /// Staging directory holding received files until they are uploaded
    pub temp_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            upload_dir: String::from("public/uploads"),
            public_base_url: String::from("http://localhost:8000/uploads"),
            temp_dir: String::from("public/temp"),
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend = match env_lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "STORAGE_BACKEND".to_string(),
                value: raw,
            })?,
            None => defaults.backend,
        };

        Ok(Self {
            backend,
            upload_dir: env_lookup("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            public_base_url: env_lookup("PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            temp_dir: env_lookup("UPLOAD_TEMP_DIR").unwrap_or(defaults.temp_dir),
        })
    }
}
