// ABOUTME: Database abstraction layer for the auth service bootstrap
// ABOUTME: Plugin architecture with SQLite and PostgreSQL backends

use crate::models::{Account, Role, RoleName};
use anyhow::Result;
use async_trait::async_trait;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide a
/// consistent interface for the bootstrap layer. It covers the two
/// capabilities the seeder depends on: the account store and the role
/// catalog.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Run database migrations to set up the schema. Idempotent.
    ///
    /// Migrations create tables and constraints only; the role catalog is
    /// populated separately so a misconfigured environment stays
    /// detectable.
    async fn migrate(&self) -> Result<()>;

    // ================================
    // Account store
    // ================================

    /// Whether an account with the given username exists
    async fn account_exists(&self, username: &str) -> Result<bool>;

    /// Get an account (with its role set) by username
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Insert a new account together with its role links.
    ///
    /// The insert is conflict-tolerant: if an account with the same
    /// username already exists, nothing is written and `false` is
    /// returned. This is what makes seeding safe under concurrent
    /// process starts.
    async fn create_account(&self, account: &Account) -> Result<bool>;

    /// Total number of accounts
    async fn account_count(&self) -> Result<i64>;

    // ================================
    // Role catalog
    // ================================

    /// Look up a role by its canonical name
    async fn get_role_by_name(&self, name: RoleName) -> Result<Option<Role>>;

    /// Insert a role into the catalog, returning `false` if a role with
    /// the same name already exists
    async fn create_role(&self, role: &Role) -> Result<bool>;

    /// List all roles in the catalog
    async fn list_roles(&self) -> Result<Vec<Role>>;
}
