// ABOUTME: SQLite backend for the account store and role catalog
// ABOUTME: Default backend for local development and tests

//! SQLite database implementation
//!
//! Embedded, zero-configuration backend used for local development and the
//! integration test suite.

use super::DatabaseProvider;
use crate::models::{Account, Role, RoleName};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

/// SQLite-backed account store and role catalog
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Create a new SQLite database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established
    pub async fn new(database_url: &str) -> Result<Self> {
        // Each pooled connection to an in-memory SQLite URL would get its
        // own empty database, so pin those to a single connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await?
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            let connection_options = if database_url.contains('?') {
                database_url.to_owned()
            } else {
                format!("{database_url}?mode=rwc")
            };
            SqlitePool::connect(&connection_options).await?
        };

        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS roles (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                must_change_password BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS account_roles (
                account_id TEXT NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                role_id TEXT NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
                PRIMARY KEY (account_id, role_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_accounts_username ON accounts(username)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn account_exists(&self, username: &str) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r"
            SELECT id, username, email, password_hash, is_active,
                   must_change_password, created_at
            FROM accounts WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut account = row_to_account(&row)?;

        let role_rows = sqlx::query(
            r"
            SELECT r.name FROM roles r
            JOIN account_roles ar ON ar.role_id = r.id
            WHERE ar.account_id = $1
            ",
        )
        .bind(account.id.to_string())
        .fetch_all(&self.pool)
        .await?;

        for role_row in role_rows {
            let name: String = role_row.try_get("name")?;
            account
                .roles
                .insert(RoleName::from_str(&name).map_err(|e| anyhow::anyhow!(e.to_string()))?);
        }

        Ok(Some(account))
    }

    async fn create_account(&self, account: &Account) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO accounts (id, username, email, password_hash,
                                  is_active, must_change_password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(username) DO NOTHING
            ",
        )
        .bind(account.id.to_string())
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.is_active)
        .bind(account.must_change_password)
        .bind(account.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        // Zero rows affected means another process start won the race; the
        // existing account is left untouched.
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for role in &account.roles {
            sqlx::query(
                r"
                INSERT INTO account_roles (account_id, role_id)
                SELECT $1, id FROM roles WHERE name = $2
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(account.id.to_string())
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn account_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM accounts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    async fn get_role_by_name(&self, name: RoleName) -> Result<Option<Role>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at FROM roles WHERE name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_role).transpose()
    }

    async fn create_role(&self, role: &Role) -> Result<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO roles (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(name) DO NOTHING
            ",
        )
        .bind(role.id.to_string())
        .bind(role.name.as_str())
        .bind(&role.description)
        .bind(role.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query("SELECT id, name, description, created_at FROM roles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_role).collect()
    }
}

fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Account {
        id: Uuid::parse_str(&id).context("Invalid account id in database")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        roles: HashSet::new(),
        is_active: row.try_get("is_active")?,
        must_change_password: row.try_get("must_change_password")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn row_to_role(row: &sqlx::sqlite::SqliteRow) -> Result<Role> {
    let id: String = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Role {
        id: Uuid::parse_str(&id).context("Invalid role id in database")?,
        name: RoleName::from_str(&name).map_err(|e| anyhow::anyhow!(e.to_string()))?,
        description: row.try_get("description")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .context("Invalid timestamp in database")?
        .with_timezone(&Utc))
}
