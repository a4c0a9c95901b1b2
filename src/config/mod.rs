// ABOUTME: Configuration management module for the auth service bootstrap
// ABOUTME: Environment-derived settings for the database and the admin seeder

/// Environment-based configuration (database URL, admin seed credentials)
pub mod environment;
