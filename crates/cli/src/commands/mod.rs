//! Subcommand implementations.

pub mod migrate;
pub mod seed;
pub mod user;

use bookstall_core::EmailError;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

use bookstall_storefront::db::RepositoryError;
use bookstall_storefront::services::auth::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Account creation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Malformed email argument.
    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    /// No user with the given email.
    #[error("No user with email: {0}")]
    UnknownUser(String),
}

/// Connect to the storefront database named by the environment.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to storefront database...");
    Ok(PgPool::connect(database_url.expose_secret()).await?)
}
