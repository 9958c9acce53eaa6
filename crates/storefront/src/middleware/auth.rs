//! Authentication middleware and extractors.
//!
//! `RequireAuth` and `OptionalAuth` only read the session. Handlers that touch
//! an owned record go through [`SessionUserValidator`] instead, which also
//! re-reads the user row so a deleted account loses access immediately.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tower_sessions::Session;

use bookstall_core::{SessionValidator, Validated};

use crate::db::{RepositoryError, UserRepository};
use crate::models::{CurrentUser, SessionInfo, session_keys};

/// Extractor that requires a logged-in user.
///
/// If the user is not logged in, returns a redirect to the login page, or
/// `401` for `/api/` paths.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the user is not logged in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                if parts.uri.path().starts_with("/api/") {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the logged-in user in the session.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Log out by discarding the whole session, cart included.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted from the store.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

// =============================================================================
// Session Validator
// =============================================================================

/// Resolves the principal of a request from its session and the user table.
pub struct SessionUserValidator<'a> {
    session: &'a Session,
    users: UserRepository<'a>,
}

impl<'a> SessionUserValidator<'a> {
    #[must_use]
    pub const fn new(session: &'a Session, pool: &'a PgPool) -> Self {
        Self {
            session,
            users: UserRepository::new(pool),
        }
    }

    fn session_info(&self) -> SessionInfo {
        let expiry = self.session.expiry_date();
        SessionInfo {
            id: self
                .session
                .id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            expires_at: DateTime::<Utc>::from_timestamp(expiry.unix_timestamp(), 0),
        }
    }
}

impl SessionValidator for SessionUserValidator<'_> {
    type Principal = CurrentUser;
    type Session = SessionInfo;
    type Error = RepositoryError;

    async fn validate(&self) -> Result<Validated<CurrentUser, SessionInfo>, RepositoryError> {
        let Some(stored) = self
            .session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await?
        else {
            return Ok(Validated::anonymous());
        };

        // The account may have been deleted since login.
        let Some(user) = self.users.get_by_id(stored.id).await? else {
            tracing::debug!(user_id = %stored.id, "session refers to a deleted user");
            return Ok(Validated::anonymous());
        };

        Ok(Validated::authenticated(
            CurrentUser::from(&user),
            self.session_info(),
        ))
    }
}
