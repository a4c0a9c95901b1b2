// ABOUTME: Startup seeding of the role catalog and the default admin account
// ABOUTME: Idempotent, safe under concurrent process starts

//! Startup seeding.
//!
//! [`AdminSeeder::ensure_admin_exists`] runs once per process start,
//! before the service begins accepting external traffic. It is a single
//! linear check with two branches (exists / absent) and one failure path:
//! if the `ADMIN` role is missing from the catalog the environment is
//! misconfigured and startup must abort.

use crate::config::environment::AdminSeedConfig;
use crate::crypto;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, AppResult};
use crate::models::{Account, Role, RoleName, SeedOutcome};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ensures the designated administrative account exists with the `ADMIN` role.
///
/// Dependencies (the account store and the role catalog, both behind
/// [`Database`]) are passed in as constructed arguments; there is no
/// container wiring. The routine never deletes or mutates an existing
/// account.
pub struct AdminSeeder {
    database: Arc<Database>,
    config: AdminSeedConfig,
}

impl AdminSeeder {
    /// Create a new seeder over the given store and seed credentials
    #[must_use]
    pub const fn new(database: Arc<Database>, config: AdminSeedConfig) -> Self {
        Self { database, config }
    }

    /// Ensure the admin account exists, creating it if absent.
    ///
    /// Idempotent: re-running never creates duplicates or mutates an
    /// existing matching account. Under concurrent process starts the
    /// storage-level username uniqueness constraint guarantees exactly one
    /// account; the loser of the race observes [`SeedOutcome::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::MissingPrerequisite`] if the
    /// `ADMIN` role is absent from the catalog (startup must abort), or a
    /// database error if the store is unreachable.
    pub async fn ensure_admin_exists(&self) -> AppResult<SeedOutcome> {
        if self
            .database
            .account_exists(&self.config.username)
            .await
            .map_err(|e| AppError::database(format!("Failed to check admin account: {e}")))?
        {
            debug!(username = %self.config.username, "Admin account already present");
            return Ok(SeedOutcome::AlreadyExists);
        }

        let admin_role = self
            .database
            .get_role_by_name(RoleName::Admin)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up admin role: {e}")))?
            .ok_or_else(|| {
                AppError::missing_prerequisite(
                    "role \"ADMIN\" is not present in the role catalog; \
                     run `auth-bootstrap seed-roles` before starting the service",
                )
            })?;

        let password_hash = crypto::hash_secret(&self.config.password)?;

        let mut account = Account::new(
            self.config.username.clone(),
            self.config.email.clone(),
            password_hash,
        );
        account.must_change_password = self.config.uses_default_password();
        account.attach_role(admin_role.name);

        let inserted = self
            .database
            .create_account(&account)
            .await
            .map_err(|e| AppError::database(format!("Failed to create admin account: {e}")))?;

        if !inserted {
            // A concurrent process start won the insert
            debug!(username = %self.config.username, "Admin account created by another starter");
            return Ok(SeedOutcome::AlreadyExists);
        }

        info!(
            account_id = %account.id,
            username = %account.username,
            role = %admin_role.name,
            "Created default admin account"
        );

        if self.config.uses_default_password() {
            warn!(
                username = %account.username,
                "Admin account was seeded with the built-in default secret; \
                 rotation is forced on first login. Set ADMIN_PASSWORD in production."
            );
        }

        Ok(SeedOutcome::Created(account.id))
    }
}

/// Populate the role catalog with the platform's canonical roles.
///
/// This is the "external setup" the admin seeder assumes has already
/// happened. Idempotent: roles already in the catalog are left untouched.
/// Returns how many roles were newly created.
///
/// # Errors
///
/// Returns an error if a catalog write fails
pub async fn seed_role_catalog(database: &Database) -> AppResult<usize> {
    let mut created = 0;

    for name in RoleName::ALL {
        let role = Role::new(name);
        let inserted = database
            .create_role(&role)
            .await
            .map_err(|e| AppError::database(format!("Failed to create role {name}: {e}")))?;

        if inserted {
            info!(role = %name, "Created role catalog entry");
            created += 1;
        } else {
            debug!(role = %name, "Role already in catalog");
        }
    }

    Ok(created)
}
