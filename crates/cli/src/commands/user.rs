//! User management commands.

use bookstall_core::UserId;
use bookstall_storefront::services::auth::AuthService;

use super::{CommandError, connect};

/// Create a user who can log in with a password.
///
/// # Errors
///
/// Returns an error if the email is invalid or taken, the password is too
/// short, or the database is unreachable.
pub async fn create(email: &str, name: &str, password: &str) -> Result<UserId, CommandError> {
    let pool = connect().await?;

    tracing::info!("Creating user: {}", email);
    let user = AuthService::new(&pool)
        .create_user(email, name, password)
        .await?;

    Ok(user.id)
}
