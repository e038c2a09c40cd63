//! SeaORM-based database access for the persistent store.
//!
//! The store lives in a single SQLite database file supplied at
//! construction. Failure to open or migrate it is fatal to construction;
//! per-query failure policy lives in the [`crate::services::FileStore`]
//! layer, not here.

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database as SeaOrmDatabase, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

pub mod migrations;
pub mod repositories;

/// Database connection manager for the store file.
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open (or create) the store database and establish a connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let connection_url = Self::ensure_sqlite_auto_creation(&config.url)?;

        let mut connect_options = ConnectOptions::new(&connection_url);
        connect_options
            .max_connections(config.max_connections.unwrap_or(10))
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        let connection = SeaOrmDatabase::connect(connect_options)
            .await
            .with_context(|| format!("Failed to open store database at '{}'", config.url))?;

        debug!("Store database connection established");

        Ok(Self {
            connection: Arc::new(connection),
        })
    }

    /// Ensure a SQLite URL points at a creatable file: make parent
    /// directories and append `mode=rwc` so a missing file is created
    /// instead of rejected.
    fn ensure_sqlite_auto_creation(url: &str) -> Result<String> {
        if !url.starts_with("sqlite:") {
            anyhow::bail!("Unsupported database URL format: {}", url);
        }
        if url.contains("mode=") || url.contains(":memory:") {
            return Ok(url.to_string());
        }

        let file_path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap();

        let path = std::path::Path::new(file_path);
        if path.exists() {
            return Ok(url.to_string());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create directory for store database: {}",
                        parent.display()
                    )
                })?;
                info!("Created directory for store database: {}", parent.display());
            }
        }

        let auto_create_url = if url.contains('?') {
            format!("{url}&mode=rwc")
        } else {
            format!("{url}?mode=rwc")
        };
        Ok(auto_create_url)
    }

    /// Run pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        use migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(&*self.connection, None)
            .await
            .context("Failed to run store migrations")?;

        debug!("Store migrations completed");
        Ok(())
    }

    pub fn connection(&self) -> Arc<DatabaseConnection> {
        self.connection.clone()
    }

    /// Close the underlying connection pool.
    pub async fn close(self) -> Result<(), sea_orm::DbErr> {
        match Arc::try_unwrap(self.connection) {
            Ok(connection) => connection.close().await,
            // Another handle still exists; dropping ours is all we can do.
            Err(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_gain_auto_create_mode() {
        let url = Database::ensure_sqlite_auto_creation("sqlite://does-not-exist.db").unwrap();
        assert_eq!(url, "sqlite://does-not-exist.db?mode=rwc");

        let url = Database::ensure_sqlite_auto_creation("sqlite::memory:").unwrap();
        assert_eq!(url, "sqlite::memory:");

        let url =
            Database::ensure_sqlite_auto_creation("sqlite://store.db?mode=rwc").unwrap();
        assert_eq!(url, "sqlite://store.db?mode=rwc");
    }

    #[test]
    fn non_sqlite_urls_are_rejected() {
        assert!(Database::ensure_sqlite_auto_creation("postgres://x/y").is_err());
    }
}
