// ABOUTME: Bootstrap binary for the insurance auth service
// ABOUTME: Seeds the role catalog and the default admin account before the service starts

//! Startup bootstrap for the auth service.
//!
//! Usage:
//! ```bash
//! # Populate the role catalog (run once per environment)
//! cargo run --bin auth-bootstrap -- seed-roles
//!
//! # Ensure the default admin account exists
//! cargo run --bin auth-bootstrap -- seed-admin
//!
//! # Seed with operator-provided credentials
//! cargo run --bin auth-bootstrap -- seed-admin --email ops@mycompany.com --password s3cret
//!
//! # Seed with a generated one-time secret (printed once)
//! cargo run --bin auth-bootstrap -- seed-admin --random-password
//!
//! # Show what the store currently contains
//! cargo run --bin auth-bootstrap -- status
//! ```

use clap::{Parser, Subcommand};
use insurance_auth_service::config::environment::ServerConfig;
use insurance_auth_service::crypto;
use insurance_auth_service::database_plugins::{factory::Database, DatabaseProvider};
use insurance_auth_service::errors::{AppError, AppResult};
use insurance_auth_service::logging::LoggingConfig;
use insurance_auth_service::seeder::{seed_role_catalog, AdminSeeder};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "auth-bootstrap",
    about = "Insurance auth service startup bootstrap",
    long_about = "Seeds the baseline data the auth service requires: the role catalog and the default admin account. Both operations are idempotent."
)]
struct BootstrapArgs {
    #[command(subcommand)]
    command: BootstrapCommand,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum BootstrapCommand {
    /// Populate the role catalog with the canonical platform roles
    SeedRoles,

    /// Ensure the default admin account exists with the ADMIN role
    SeedAdmin {
        /// Admin username override
        #[arg(long)]
        username: Option<String>,

        /// Admin email override
        #[arg(long)]
        email: Option<String>,

        /// Admin secret override (prefer ADMIN_PASSWORD in automation)
        #[arg(long)]
        password: Option<String>,

        /// Generate a random one-time secret instead of the default
        #[arg(long, conflicts_with = "password")]
        random_password: bool,
    },

    /// Show role catalog and account store contents
    Status,
}

#[tokio::main]
async fn main() {
    let args = BootstrapArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    if let Err(err) = logging.init() {
        eprintln!("Failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        error!("{err}");
        std::process::exit(err.code.exit_code());
    }
}

async fn run(args: BootstrapArgs) -> AppResult<()> {
    let mut config = ServerConfig::from_env()
        .map_err(|e| AppError::config(format!("Failed to load configuration: {e}")))?;

    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let database = Arc::new(
        Database::new(&config.database.url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?,
    );
    info!("Connected to {}", database.backend_info());

    if config.database.auto_migrate {
        database
            .migrate()
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
    }

    match args.command {
        BootstrapCommand::SeedRoles => seed_roles_command(&database).await,
        BootstrapCommand::SeedAdmin {
            username,
            email,
            password,
            random_password,
        } => {
            let mut admin = config.admin;
            if let Some(username) = username {
                admin.username = username;
            }
            if let Some(email) = email {
                admin.email = email;
            }
            let generated = if random_password {
                let secret = crypto::generate_bootstrap_secret();
                admin.password = secret.clone();
                admin.password_is_default = false;
                Some(secret)
            } else {
                if let Some(password) = password {
                    admin.password = password;
                    admin.password_is_default = false;
                }
                None
            };

            seed_admin_command(database, admin, generated).await
        }
        BootstrapCommand::Status => status_command(&database).await,
    }
}

async fn seed_roles_command(database: &Arc<Database>) -> AppResult<()> {
    let created = seed_role_catalog(database).await?;

    let roles = database
        .list_roles()
        .await
        .map_err(|e| AppError::database(format!("Failed to list roles: {e}")))?;

    println!("Role catalog ready ({created} newly created):");
    for role in roles {
        println!("  {} - {}", role.name, role.description);
    }

    Ok(())
}

async fn seed_admin_command(
    database: Arc<Database>,
    admin: insurance_auth_service::config::environment::AdminSeedConfig,
    generated_secret: Option<String>,
) -> AppResult<()> {
    let username = admin.username.clone();
    let seeder = AdminSeeder::new(database, admin);
    let outcome = seeder.ensure_admin_exists().await?;

    println!("Admin account '{username}': {outcome}");

    if outcome.created() {
        if let Some(secret) = generated_secret {
            // Shown once, never persisted in clear
            println!();
            println!("Generated one-time admin secret (save it now, it is not shown again):");
            println!("  {secret}");
        }
    }

    Ok(())
}

async fn status_command(database: &Arc<Database>) -> AppResult<()> {
    let roles = database
        .list_roles()
        .await
        .map_err(|e| AppError::database(format!("Failed to list roles: {e}")))?;

    let accounts = database
        .account_count()
        .await
        .map_err(|e| AppError::database(format!("Failed to count accounts: {e}")))?;

    println!("Backend: {}", database.backend_info());
    println!("Roles in catalog: {}", roles.len());
    for role in &roles {
        println!("  {}", role.name);
    }
    println!("Accounts: {accounts}");

    Ok(())
}
