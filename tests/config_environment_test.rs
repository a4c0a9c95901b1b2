// ABOUTME: Tests for environment-based configuration parsing
// ABOUTME: Defaults, overrides, and the default-secret flag

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use insurance_auth_service::config::environment::{
    ServerConfig, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
    DEFAULT_DATABASE_URL,
};
use std::env;

// Environment variables are process-global, so all scenarios run inside a
// single test to keep them from racing each other.
#[test]
fn test_config_from_env() {
    for key in [
        "DATABASE_URL",
        "AUTO_MIGRATE",
        "ADMIN_USERNAME",
        "ADMIN_EMAIL",
        "ADMIN_PASSWORD",
    ] {
        env::remove_var(key);
    }

    // Defaults when nothing is set
    let config = ServerConfig::from_env().expect("defaults should parse");
    assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    assert!(config.database.auto_migrate);
    assert_eq!(config.admin.username, DEFAULT_ADMIN_USERNAME);
    assert_eq!(config.admin.email, DEFAULT_ADMIN_EMAIL);
    assert_eq!(config.admin.password, DEFAULT_ADMIN_PASSWORD);
    assert!(config.admin.uses_default_password());

    // Overrides are picked up, and an operator-provided secret clears the
    // default-password flag
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("AUTO_MIGRATE", "false");
    env::set_var("ADMIN_USERNAME", "root");
    env::set_var("ADMIN_EMAIL", "root@example.com");
    env::set_var("ADMIN_PASSWORD", "operator-secret");

    let config = ServerConfig::from_env().expect("overrides should parse");
    assert_eq!(config.database.url, "sqlite::memory:");
    assert!(!config.database.auto_migrate);
    assert_eq!(config.admin.username, "root");
    assert_eq!(config.admin.email, "root@example.com");
    assert_eq!(config.admin.password, "operator-secret");
    assert!(!config.admin.uses_default_password());

    // Malformed booleans are rejected
    env::set_var("AUTO_MIGRATE", "definitely");
    assert!(ServerConfig::from_env().is_err());

    for key in [
        "DATABASE_URL",
        "AUTO_MIGRATE",
        "ADMIN_USERNAME",
        "ADMIN_EMAIL",
        "ADMIN_PASSWORD",
    ] {
        env::remove_var(key);
    }
}
