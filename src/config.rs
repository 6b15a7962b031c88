//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup; a `.env` file is honoured for local
//! development.

use std::env;
use std::str::FromStr;

/// Default PBKDF2 iteration count for new password hashes.
pub const DEFAULT_PASSWORD_HASH_ITERATIONS: u32 = 600_000;

/// Which persistence engine backs the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-process maps; contents are lost on restart.
    Memory,
    /// Google Cloud Firestore (or its emulator).
    Firestore,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "firestore" => Ok(StorageBackend::Firestore),
            _ => Err(ConfigError::Invalid("STORAGE_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Persistence engine
    pub storage_backend: StorageBackend,
    /// GCP project ID (Firestore backend only)
    pub gcp_project_id: Option<String>,
    /// PBKDF2 iterations used when hashing new passwords
    pub password_hash_iterations: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageBackend::Memory,
        };

        let gcp_project_id = env::var("GCP_PROJECT_ID").ok();
        if storage_backend == StorageBackend::Firestore && gcp_project_id.is_none() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        let password_hash_iterations = match env::var("PASSWORD_HASH_ITERATIONS") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid("PASSWORD_HASH_ITERATIONS", raw)),
            },
            Err(_) => DEFAULT_PASSWORD_HASH_ITERATIONS,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            storage_backend,
            gcp_project_id,
            password_hash_iterations,
        })
    }

    /// Config for tests: in-memory storage and cheap password hashing.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            storage_backend: StorageBackend::Memory,
            gcp_project_id: None,
            password_hash_iterations: 1_000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
