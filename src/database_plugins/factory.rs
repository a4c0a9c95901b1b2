// ABOUTME: Database factory and backend selection for multi-database support
// ABOUTME: Detects SQLite or PostgreSQL from the connection URL and delegates

//! Database factory for creating database providers
//!
//! This module provides automatic database type detection and creation
//! based on connection strings.

use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::models::{Account, Role, RoleName};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::{debug, info};

#[cfg(feature = "postgresql")]
use super::postgres::PostgresDatabase;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
    PostgreSQL,
}

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    SQLite(SqliteDatabase),
    #[cfg(feature = "postgresql")]
    PostgreSQL(PostgresDatabase),
}

impl Database {
    /// Create a new database instance based on the connection string
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL format is unsupported or invalid
    /// - `PostgreSQL` feature is not enabled when a `PostgreSQL` URL is provided
    /// - Database connection fails
    pub async fn new(database_url: &str) -> Result<Self> {
        debug!("Detecting database type from URL");
        let db_type = detect_database_type(database_url)?;
        info!("Detected database type: {:?}", db_type);

        match db_type {
            DatabaseType::SQLite => {
                let db = SqliteDatabase::new(database_url).await?;
                info!("SQLite database initialized");
                Ok(Self::SQLite(db))
            }
            #[cfg(feature = "postgresql")]
            DatabaseType::PostgreSQL => {
                let db = PostgresDatabase::new(database_url).await?;
                info!("PostgreSQL database initialized");
                Ok(Self::PostgreSQL(db))
            }
            #[cfg(not(feature = "postgresql"))]
            DatabaseType::PostgreSQL => Err(anyhow!(
                "PostgreSQL support not enabled. Enable the 'postgresql' feature flag."
            )),
        }
    }

    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite (Local Development)",
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => "PostgreSQL (Production)",
        }
    }
}

/// Automatically detect database type from connection string
///
/// # Errors
///
/// Returns an error if the URL scheme is neither `sqlite:` nor
/// `postgresql://`/`postgres://`
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else if database_url.starts_with("postgresql://") || database_url.starts_with("postgres://") {
        Ok(DatabaseType::PostgreSQL)
    } else {
        Err(anyhow!(
            "Unsupported database URL format. Expected 'sqlite:' or 'postgresql://' prefix"
        ))
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn migrate(&self) -> Result<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.migrate().await,
        }
    }

    async fn account_exists(&self, username: &str) -> Result<bool> {
        match self {
            Self::SQLite(db) => db.account_exists(username).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.account_exists(username).await,
        }
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        match self {
            Self::SQLite(db) => db.get_account_by_username(username).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_account_by_username(username).await,
        }
    }

    async fn create_account(&self, account: &Account) -> Result<bool> {
        match self {
            Self::SQLite(db) => db.create_account(account).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_account(account).await,
        }
    }

    async fn account_count(&self) -> Result<i64> {
        match self {
            Self::SQLite(db) => db.account_count().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.account_count().await,
        }
    }

    async fn get_role_by_name(&self, name: RoleName) -> Result<Option<Role>> {
        match self {
            Self::SQLite(db) => db.get_role_by_name(name).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_role_by_name(name).await,
        }
    }

    async fn create_role(&self, role: &Role) -> Result<bool> {
        match self {
            Self::SQLite(db) => db.create_role(role).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_role(role).await,
        }
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        match self {
            Self::SQLite(db) => db.list_roles().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.list_roles().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_sqlite() {
        assert_eq!(
            detect_database_type("sqlite:./data/auth.db").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            detect_database_type("sqlite::memory:").unwrap(),
            DatabaseType::SQLite
        );
    }

    #[test]
    fn test_detect_postgres() {
        assert_eq!(
            detect_database_type("postgresql://localhost/auth").unwrap(),
            DatabaseType::PostgreSQL
        );
        assert_eq!(
            detect_database_type("postgres://localhost/auth").unwrap(),
            DatabaseType::PostgreSQL
        );
    }

    #[test]
    fn test_detect_rejects_unknown() {
        assert!(detect_database_type("mysql://localhost/auth").is_err());
        assert!(detect_database_type("").is_err());
    }
}
