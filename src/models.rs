// ABOUTME: Core domain models for the auth service bootstrap
// ABOUTME: Defines Account, Role, RoleName and the outcome type reported by the seeder

//! Domain models shared by the database layer and the seeder.

use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Canonical role names in the platform role catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    /// Platform administration
    Admin,
    /// Insurance agents managing policies and claims
    Agent,
    /// Policy holders
    Customer,
}

impl RoleName {
    /// All roles the platform defines, in catalog order
    pub const ALL: [Self; 3] = [Self::Admin, Self::Agent, Self::Customer];

    /// Canonical string form used for database storage and lookup
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Agent => "AGENT",
            Self::Customer => "CUSTOMER",
        }
    }

    /// Human-readable description stored alongside the role
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Admin => "Full administrative access to the platform",
            Self::Agent => "Manages customer policies and claims",
            Self::Customer => "Holds policies and files claims",
        }
    }
}

impl Display for RoleName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "AGENT" => Ok(Self::Agent),
            "CUSTOMER" => Ok(Self::Customer),
            other => Err(AppError::invalid_input(format!(
                "unknown role name: {other}"
            ))),
        }
    }
}

/// A named permission grouping in the role catalog
///
/// Roles are referenced by accounts, not owned by them: many accounts may
/// share a role. The catalog is populated by the explicit `seed-roles`
/// bootstrap step, never implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier
    pub id: Uuid,
    /// Canonical role name, unique in the catalog
    pub name: RoleName,
    /// Human-readable description
    pub description: String,
    /// When the role was created
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Create a new catalog entry for the given role name
    #[must_use]
    pub fn new(name: RoleName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: name.description().to_owned(),
            created_at: Utc::now(),
        }
    }
}

/// A principal capable of authenticating against the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,
    /// Unique username, enforced at the storage level
    pub username: String,
    /// Email address
    pub email: String,
    /// Bcrypt hash of the secret; the plaintext is never stored or logged
    pub password_hash: String,
    /// Roles attached to this account (unique, unordered)
    pub roles: HashSet<RoleName>,
    /// Whether the account may authenticate
    pub is_active: bool,
    /// Forces secret rotation on first login, set when the account was
    /// seeded with the built-in default secret
    pub must_change_password: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account with no roles attached
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            roles: HashSet::new(),
            is_active: true,
            must_change_password: false,
            created_at: Utc::now(),
        }
    }

    /// Attach a role to this account's role set
    pub fn attach_role(&mut self, role: RoleName) {
        self.roles.insert(role);
    }

    /// Whether the account holds the given role
    #[must_use]
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }
}

/// Outcome of a seeding operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// A new record was created
    Created(Uuid),
    /// A matching record was already present; nothing was changed
    AlreadyExists,
}

impl SeedOutcome {
    /// Whether this run created the record
    #[must_use]
    pub const fn created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

impl Display for SeedOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(id) => write!(f, "created ({id})"),
            Self::AlreadyExists => f.write_str("already exists"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_round_trip() {
        for name in RoleName::ALL {
            assert_eq!(name.as_str().parse::<RoleName>().unwrap(), name);
        }
    }

    #[test]
    fn test_role_name_rejects_unknown() {
        assert!("SUPERUSER".parse::<RoleName>().is_err());
        assert!("admin".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new("admin", "admin@insurance.com", "$2b$04$hash");
        assert!(account.is_active);
        assert!(!account.must_change_password);
        assert!(account.roles.is_empty());
    }

    #[test]
    fn test_attach_role_is_set_semantics() {
        let mut account = Account::new("admin", "admin@insurance.com", "$2b$04$hash");
        account.attach_role(RoleName::Admin);
        account.attach_role(RoleName::Admin);
        assert_eq!(account.roles.len(), 1);
        assert!(account.has_role(RoleName::Admin));
        assert!(!account.has_role(RoleName::Agent));
    }

    #[test]
    fn test_seed_outcome_created() {
        assert!(SeedOutcome::Created(Uuid::new_v4()).created());
        assert!(!SeedOutcome::AlreadyExists.created());
    }
}
