// ABOUTME: Integration tests for the default admin account seeder
// ABOUTME: Covers idempotence, role attachment, secret hashing, and race safety

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use insurance_auth_service::config::environment::AdminSeedConfig;
use insurance_auth_service::crypto;
use insurance_auth_service::database_plugins::{factory::Database, DatabaseProvider};
use insurance_auth_service::errors::ErrorCode;
use insurance_auth_service::models::{Role, RoleName};
use insurance_auth_service::seeder::{seed_role_catalog, AdminSeeder};
use std::sync::Arc;

async fn create_test_database() -> Arc<Database> {
    let database = Database::new("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    database.migrate().await.expect("Failed to run migrations");
    Arc::new(database)
}

fn default_seed_config() -> AdminSeedConfig {
    AdminSeedConfig {
        username: "admin".into(),
        email: "admin@insurance.com".into(),
        password: "admin123".into(),
        password_is_default: true,
    }
}

#[tokio::test]
async fn test_seeder_creates_admin_account() {
    let database = create_test_database().await;
    seed_role_catalog(&database).await.expect("Failed to seed roles");

    let seeder = AdminSeeder::new(database.clone(), default_seed_config());
    let outcome = seeder
        .ensure_admin_exists()
        .await
        .expect("Failed to seed admin");
    assert!(outcome.created());

    let account = database
        .get_account_by_username("admin")
        .await
        .expect("Failed to fetch account")
        .expect("Admin account should exist");

    assert_eq!(account.email, "admin@insurance.com");
    assert!(account.has_role(RoleName::Admin));
    assert!(account.is_active);
}

#[tokio::test]
async fn test_seeder_is_idempotent() {
    let database = create_test_database().await;
    seed_role_catalog(&database).await.expect("Failed to seed roles");

    let seeder = AdminSeeder::new(database.clone(), default_seed_config());

    let first = seeder.ensure_admin_exists().await.expect("First run failed");
    let second = seeder
        .ensure_admin_exists()
        .await
        .expect("Second run failed");

    assert!(first.created());
    assert!(!second.created());
    assert_eq!(
        database.account_count().await.expect("Failed to count"),
        1
    );
}

#[tokio::test]
async fn test_stored_secret_is_never_plaintext() {
    let database = create_test_database().await;
    seed_role_catalog(&database).await.expect("Failed to seed roles");

    let seeder = AdminSeeder::new(database.clone(), default_seed_config());
    seeder.ensure_admin_exists().await.expect("Failed to seed");

    let account = database
        .get_account_by_username("admin")
        .await
        .expect("Failed to fetch account")
        .expect("Admin account should exist");

    assert_ne!(account.password_hash, "admin123");
    assert!(crypto::verify_secret("admin123", &account.password_hash).unwrap());
}

#[tokio::test]
async fn test_default_secret_forces_rotation() {
    let database = create_test_database().await;
    seed_role_catalog(&database).await.expect("Failed to seed roles");

    let seeder = AdminSeeder::new(database.clone(), default_seed_config());
    seeder.ensure_admin_exists().await.expect("Failed to seed");

    let account = database
        .get_account_by_username("admin")
        .await
        .expect("Failed to fetch account")
        .expect("Admin account should exist");
    assert!(account.must_change_password);
}

#[tokio::test]
async fn test_operator_secret_does_not_force_rotation() {
    let database = create_test_database().await;
    seed_role_catalog(&database).await.expect("Failed to seed roles");

    let config = AdminSeedConfig {
        password: "operator-chosen-secret".into(),
        password_is_default: false,
        ..default_seed_config()
    };
    let seeder = AdminSeeder::new(database.clone(), config);
    seeder.ensure_admin_exists().await.expect("Failed to seed");

    let account = database
        .get_account_by_username("admin")
        .await
        .expect("Failed to fetch account")
        .expect("Admin account should exist");
    assert!(!account.must_change_password);
}

#[tokio::test]
async fn test_missing_admin_role_is_fatal() {
    let database = create_test_database().await;
    // Role catalog deliberately left without the ADMIN role
    database
        .create_role(&Role::new(RoleName::Agent))
        .await
        .expect("Failed to create role");

    let seeder = AdminSeeder::new(database.clone(), default_seed_config());
    let err = seeder
        .ensure_admin_exists()
        .await
        .expect_err("Seeding should fail without the ADMIN role");

    assert_eq!(err.code, ErrorCode::MissingPrerequisite);
    assert_eq!(
        database.account_count().await.expect("Failed to count"),
        0,
        "No account may be created when the prerequisite is missing"
    );
}

#[tokio::test]
async fn test_concurrent_starts_create_exactly_one_admin() {
    let database = create_test_database().await;
    seed_role_catalog(&database).await.expect("Failed to seed roles");

    let first = AdminSeeder::new(database.clone(), default_seed_config());
    let second = AdminSeeder::new(database.clone(), default_seed_config());

    let (a, b) = tokio::join!(first.ensure_admin_exists(), second.ensure_admin_exists());
    let a = a.expect("First starter failed");
    let b = b.expect("Second starter failed");

    assert!(
        !(a.created() && b.created()),
        "Only one starter may create the account"
    );
    assert_eq!(
        database.account_count().await.expect("Failed to count"),
        1
    );
}

#[tokio::test]
async fn test_role_catalog_seeding_is_idempotent() {
    let database = create_test_database().await;

    let first = seed_role_catalog(&database).await.expect("First run failed");
    let second = seed_role_catalog(&database)
        .await
        .expect("Second run failed");

    assert_eq!(first, RoleName::ALL.len());
    assert_eq!(second, 0);
    assert_eq!(
        database.list_roles().await.expect("Failed to list").len(),
        RoleName::ALL.len()
    );
}
