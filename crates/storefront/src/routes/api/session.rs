//! Session lookup endpoint.
//!
//! `GET /api/auth/session` answers `{"user": ..., "session": ...}` with both
//! halves `null` when nobody is logged in. A failed lookup is a `500` with a
//! fixed body; the cause only goes to the logs.

use std::fmt::Display;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tower_sessions::Session;

use bookstall_core::{SessionValidator, Validated};

use crate::middleware::SessionUserValidator;
use crate::state::AppState;

/// Resolve and return the current session.
pub async fn show(State(state): State<AppState>, session: Session) -> Response {
    let validator = SessionUserValidator::new(&session, state.pool());
    session_response(validator.validate().await)
}

/// Turn a validator outcome into the endpoint's response.
pub fn session_response<U, S, E>(result: Result<Validated<U, S>, E>) -> Response
where
    U: Serialize,
    S: Serialize,
    E: Display,
{
    match result {
        Ok(validated) => Json(validated).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_is_passed_through() {
        let validated = Validated::authenticated(json!({"id": 7}), json!({"id": "abc"}));
        let response = session_response::<_, _, String>(Ok(validated));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"user": {"id": 7}, "session": {"id": "abc"}})
        );
    }

    #[tokio::test]
    async fn test_anonymous_is_null_pair() {
        let response = session_response::<Value, Value, String>(Ok(Validated::anonymous()));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"user": null, "session": null})
        );
    }

    #[tokio::test]
    async fn test_failure_hides_cause() {
        let response =
            session_response::<Value, Value, _>(Err("connection refused to db.internal"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Internal Server Error"})
        );
    }
}
