//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `GATHERER__`-prefixed environment variables.
//! Every field carries a default, so the server starts with no files at all.

pub mod app;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, MetadataBackend};
pub use self::logging::LoggingConfig;
pub use self::storage::{ContentBackend, StorageConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Metadata store settings.
    pub database: DatabaseConfig,
    /// Content store settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the named environment.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{env}.toml`, then `GATHERER__SECTION__KEY` variables.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATHERER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the stores cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.storage.max_upload_size_bytes == 0 {
            return Err(AppError::configuration(
                "storage.max_upload_size_bytes must be greater than zero",
            ));
        }
        if self.storage.backend == ContentBackend::Local && self.storage.upload_dir.trim().is_empty()
        {
            return Err(AppError::configuration(
                "storage.upload_dir is required for the local backend",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.upload_dir, "./uploads");
        assert_eq!(config.storage.max_upload_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.database.backend, MetadataBackend::Postgres);
        assert_eq!(config.database.dbname, "gatherer");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[storage]\nbackend = \"memory\"\n[database]\nport = 6543\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.backend, ContentBackend::Memory);
        assert_eq!(config.storage.upload_dir, "./uploads");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.host, "localhost");
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let mut config = AppConfig::default();
        config.storage.max_upload_size_bytes = 0;
        assert!(config.validate().is_err());
    }
}
