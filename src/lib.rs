// ABOUTME: Library entry point for the insurance platform auth service bootstrap
// ABOUTME: Startup seeding of the role catalog and the default administrative account

#![deny(unsafe_code)]

//! # Insurance Auth Service Bootstrap
//!
//! Startup bootstrap for the insurance platform's auth service. The crate
//! guarantees the baseline data the service needs before it starts serving
//! traffic:
//!
//! - a populated **role catalog** (`ADMIN`, `AGENT`, `CUSTOMER`)
//! - a **default admin account** holding the `ADMIN` role
//!
//! Both operations are idempotent: re-running them never duplicates or
//! mutates existing records. The admin account insert is safe under
//! concurrent process starts because the store enforces username
//! uniqueness and the insert is conflict-tolerant.
//!
//! ## Quick Start
//!
//! ```bash
//! # Populate the role catalog (run once per environment)
//! cargo run --bin auth-bootstrap -- seed-roles
//!
//! # Ensure the default admin account exists
//! cargo run --bin auth-bootstrap -- seed-admin
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use insurance_auth_service::config::environment::ServerConfig;
//! use insurance_auth_service::database_plugins::{factory::Database, DatabaseProvider};
//! use insurance_auth_service::errors::AppResult;
//! use insurance_auth_service::seeder::AdminSeeder;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!
//!     let database = Arc::new(Database::new(&config.database.url).await?);
//!     database.migrate().await?;
//!
//!     let seeder = AdminSeeder::new(database, config.admin);
//!     let outcome = seeder.ensure_admin_exists().await?;
//!     println!("admin account: {outcome}");
//!     Ok(())
//! }
//! ```

/// Environment-based configuration management
pub mod config;

/// Secret hashing helpers
pub mod crypto;

/// Database abstraction with SQLite and PostgreSQL backends
pub mod database_plugins;

/// Unified error handling (`AppError`, `ErrorCode`, `AppResult`)
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Domain models: accounts, roles, seeding outcomes
pub mod models;

/// Startup seeding of the role catalog and the default admin account
pub mod seeder;
