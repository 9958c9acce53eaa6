//! Ownership-gated access to mutable resources.
//!
//! Every edit/delete entry point runs the same ordered chain before touching a
//! record:
//!
//! 1. resolve the principal from the session - none means `NotFound`, and the
//!    store is never queried;
//! 2. load the record - absent means `NotFound`;
//! 3. compare the record's owner with the principal - a mismatch is also
//!    `NotFound`.
//!
//! Callers cannot tell "someone else's record" apart from "no such record".
//! Faults in either collaborator surface as [`GateError::Unavailable`] and are
//! never folded into `NotFound`.
//!
//! The two reads are not linked by a transaction. A record that changes owner
//! between them is judged on whatever the second read returned.

use std::fmt::Display;
use std::future::Future;

use serde::Serialize;

use crate::types::UserId;

/// An authenticated actor.
pub trait Principal {
    /// The user this principal acts as.
    fn id(&self) -> UserId;
}

/// A record owned by exactly one user.
pub trait Owned {
    /// The owning user.
    fn owner_id(&self) -> UserId;
}

/// Result of a session lookup. Both halves are `None` when nobody is logged in.
///
/// Serializes as `{"user": ..., "session": ...}`, the body of the session
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validated<U, S> {
    pub user: Option<U>,
    pub session: Option<S>,
}

impl<U, S> Validated<U, S> {
    /// A lookup that found no authenticated session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            session: None,
        }
    }

    /// A lookup that found a logged-in user.
    #[must_use]
    pub const fn authenticated(user: U, session: S) -> Self {
        Self {
            user: Some(user),
            session: Some(session),
        }
    }
}

impl<U, S> Default for Validated<U, S> {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Resolves the principal behind the current request.
pub trait SessionValidator {
    type Principal: Principal + Send;
    type Session: Send;
    type Error;

    /// Look up the current session. A missing session is not an error.
    fn validate(
        &self,
    ) -> impl Future<Output = Result<Validated<Self::Principal, Self::Session>, Self::Error>> + Send;
}

/// Loads owned records by ID.
pub trait ResourceStore {
    type Id: Copy + Display + Send;
    type Resource: Owned + Send;
    type Error;

    /// Fetch a record. Absence is `Ok(None)`, not an error.
    fn find_by_id(
        &self,
        id: Self::Id,
    ) -> impl Future<Output = Result<Option<Self::Resource>, Self::Error>> + Send;
}

/// Why the gate refused access.
#[derive(Debug, thiserror::Error)]
pub enum GateError<E> {
    /// Not logged in, no such record, or not the owner.
    #[error("not found")]
    NotFound,

    /// A collaborator failed; the request may be retried.
    #[error("resource unavailable: {0}")]
    Unavailable(#[source] E),
}

impl<E> GateError<E> {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// The check that failed, for logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Denial {
    Unauthenticated,
    Missing,
    NotOwner,
}

/// Existence and ownership checks on an already-loaded record.
fn authorize<R: Owned>(principal: UserId, resource: Option<R>) -> Result<R, Denial> {
    let resource = resource.ok_or(Denial::Missing)?;
    if resource.owner_id() != principal {
        return Err(Denial::NotOwner);
    }
    Ok(resource)
}

/// Run the full gate for record `id`, returning the record only to its owner.
///
/// # Errors
///
/// Returns `GateError::NotFound` if there is no principal, no record, or the
/// principal does not own the record. Returns `GateError::Unavailable` if the
/// validator or the store fails.
pub async fn open<V, S, E>(
    validator: &V,
    store: &S,
    id: S::Id,
) -> Result<S::Resource, GateError<E>>
where
    V: SessionValidator<Error = E> + Sync,
    S: ResourceStore<Error = E> + Sync,
{
    let validated = validator.validate().await.map_err(GateError::Unavailable)?;
    let Some(principal) = validated.user else {
        log_denial(Denial::Unauthenticated, &id, None);
        return Err(GateError::NotFound);
    };
    let principal_id = principal.id();

    let resource = store.find_by_id(id).await.map_err(GateError::Unavailable)?;

    authorize(principal_id, resource).map_err(|denial| {
        log_denial(denial, &id, Some(principal_id));
        GateError::NotFound
    })
}

fn log_denial(denial: Denial, resource: &impl Display, principal: Option<UserId>) {
    tracing::debug!(
        ?denial,
        resource = %resource,
        principal = ?principal.map(|id| id.as_i32()),
        "gate denied access"
    );
}
