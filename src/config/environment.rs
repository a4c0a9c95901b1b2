// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses database and admin-seed settings from environment variables

//! Environment-based configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Fallback database when `DATABASE_URL` is not set (local development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/auth.db";

/// Default admin credentials used when no overrides are configured.
///
/// The default secret is a bootstrap convenience and a known deployment
/// hazard: accounts seeded with it are persisted with
/// `must_change_password` set, and the seeder logs a warning.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Default admin email address
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@insurance.com";
/// Default admin secret (see [`DEFAULT_ADMIN_USERNAME`] for the hazard note)
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (`sqlite:` or `postgresql://`)
    pub url: String,
    /// Run schema migrations automatically on startup
    pub auto_migrate: bool,
}

/// Credentials the admin seeder uses when the admin account is absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSeedConfig {
    /// Admin username (unique per store)
    pub username: String,
    /// Admin email address
    pub email: String,
    /// Plaintext admin secret; hashed before persistence, never logged
    pub password: String,
    /// Whether `password` is the built-in default rather than an
    /// operator-provided value
    pub password_is_default: bool,
}

impl AdminSeedConfig {
    /// Load seed credentials from `ADMIN_USERNAME` / `ADMIN_EMAIL` /
    /// `ADMIN_PASSWORD`, falling back to the built-in defaults
    #[must_use]
    pub fn from_env() -> Self {
        let password = env::var("ADMIN_PASSWORD").ok();
        Self {
            username: env_var_or("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            email: env_var_or("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            password_is_default: password.is_none(),
            password: password.unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
        }
    }

    /// Whether the configured secret is the built-in default
    #[must_use]
    pub const fn uses_default_password(&self) -> bool {
        self.password_is_default
    }
}

/// Top-level configuration for the bootstrap process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Admin seed credentials
    pub admin: AdminSeedConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean setting cannot be parsed
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
                auto_migrate: env_var_or("AUTO_MIGRATE", "true")
                    .parse()
                    .context("Invalid AUTO_MIGRATE value (expected true/false)")?,
            },
            admin: AdminSeedConfig::from_env(),
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
