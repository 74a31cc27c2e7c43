//! PostgreSQL connection pool and migration runner.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use lexvault_core::config::DatabaseConfig;
use lexvault_core::error::{AppError, ErrorKind};

/// Owns the sqlx pool for the lifetime of startup: connect, migrate,
/// then hand the raw pool to the server.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a connection pool sized per configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %redacted(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Apply any pending schema migrations from the bundled migrations directory.
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to run migrations: {e}"),
                    e,
                )
            })?;

        info!("Database schema is up to date");
        Ok(())
    }

    /// Hand over the raw sqlx pool.
    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}

/// Strip the credentials section of a connection URL for logging.
fn redacted(url: &str) -> String {
    match (url.find("://"), url.find('@')) {
        (Some(scheme), Some(at)) if scheme + 3 < at => {
            format!("{}****@{}", &url[..scheme + 3], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_strips_credentials() {
        assert_eq!(
            redacted("postgres://user:secret@db:5432/lexvault"),
            "postgres://****@db:5432/lexvault"
        );
        assert_eq!(
            redacted("postgres://db:5432/lexvault"),
            "postgres://db:5432/lexvault"
        );
    }
}
