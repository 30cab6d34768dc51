//! User service configuration.

use std::env;

use common::StorageConfig;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// PostgreSQL storage settings
    pub storage: StorageConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = StorageConfig::default();

        Self {
            storage: StorageConfig {
                host: env::var("DB_HOST").unwrap_or(defaults.host),
                port: env::var("DB_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
                database: env::var("DB_NAME").unwrap_or(defaults.database),
                username: env::var("DB_USERNAME").unwrap_or(defaults.username),
                password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
                attempts: env::var("DB_CONNECT_ATTEMPTS")
                    .ok()
                    .and_then(|a| a.parse().ok())
                    .unwrap_or(defaults.attempts),
            },
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
        }
    }
}
