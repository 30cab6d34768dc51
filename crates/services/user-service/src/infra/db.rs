//! Database connection establishment with bounded retry.
//!
//! Expects a `users` table: `id uuid primary key, email text unique,
//! password bytea`. Schema management is out of scope for this service.

use std::time::Duration;

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr, RuntimeErr};
use tokio::time::timeout;

use common::{with_retries, StorageConfig};

/// Upper bound for a single connection attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Fixed delay between failed attempts.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Establish the connection, retrying up to `config.attempts` times.
    ///
    /// Each attempt is capped at one second; failed attempts are separated
    /// by a fixed one-second delay. The final attempt's error is returned
    /// once attempts are exhausted, which is fatal to startup.
    pub async fn connect(config: &StorageConfig) -> Result<Self, DbErr> {
        let url = config.url();

        let connection = with_retries(
            || {
                let url = url.clone();
                async move {
                    match timeout(CONNECT_TIMEOUT, SeaDatabase::connect(url.as_str())).await {
                        Ok(result) => result,
                        Err(_) => Err(DbErr::Conn(RuntimeErr::Internal(
                            "connection attempt timed out".to_string(),
                        ))),
                    }
                }
            },
            config.attempts,
            RETRY_DELAY,
        )
        .await?;

        tracing::info!(host = %config.host, database = %config.database, "database connected");

        Ok(Self { connection })
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
