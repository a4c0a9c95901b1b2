// ABOUTME: PostgreSQL backend for the account store and role catalog
// ABOUTME: Production backend, enabled with the "postgresql" feature

//! PostgreSQL database implementation
//!
//! Client-server backend for production deployments. Uses native `UUID`
//! and `TIMESTAMPTZ` columns instead of the TEXT encodings the SQLite
//! backend falls back to.

use super::DatabaseProvider;
use crate::models::{Account, Role, RoleName};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

/// PostgreSQL-backed account store and role catalog
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Create a new PostgreSQL database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseProvider for PostgresDatabase {
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS roles (
                id UUID PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS accounts (
                id UUID PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                must_change_password BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS account_roles (
                account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
                role_id UUID NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
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

        let mut account = Account {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            roles: HashSet::new(),
            is_active: row.try_get("is_active")?,
            must_change_password: row.try_get("must_change_password")?,
            created_at: row.try_get("created_at")?,
        };

        let role_rows = sqlx::query(
            r"
            SELECT r.name FROM roles r
            JOIN account_roles ar ON ar.role_id = r.id
            WHERE ar.account_id = $1
            ",
        )
        .bind(account.id)
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
            ON CONFLICT (username) DO NOTHING
            ",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.is_active)
        .bind(account.must_change_password)
        .bind(account.created_at)
        .execute(&mut *tx)
        .await?;

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
            .bind(account.id)
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
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(role.id)
        .bind(role.name.as_str())
        .bind(&role.description)
        .bind(role.created_at)
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

fn row_to_role(row: &sqlx::postgres::PgRow) -> Result<Role> {
    let name: String = row.try_get("name")?;

    Ok(Role {
        id: row.try_get::<Uuid, _>("id")?,
        name: RoleName::from_str(&name).map_err(|e| anyhow::anyhow!(e.to_string()))?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}
