//! Success/error envelope returned by collection fetchers.
//!
//! On the wire this is `{"success": true, "data": ...}` or
//! `{"success": false, "error": "..."}`. Listing views hand the `data` half
//! to a [`Paginator`](crate::Paginator) and render the `error` half verbatim.

use std::fmt::Display;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Outcome of fetching a collection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Envelope<T>")]
pub enum FetchResult<T> {
    Success(T),
    Failure(String),
}

impl<T> FetchResult<T> {
    /// Build from a `Result`, replacing any error with `message`.
    ///
    /// The underlying error is logged, never carried: the failure text ends up
    /// in front of visitors.
    pub fn from_result<E: Display>(result: Result<T, E>, message: &str) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => {
                tracing::error!(error = %e, "{message}");
                Self::Failure(message.to_owned())
            }
        }
    }

    /// Whether the fetch succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Convert into a `Result` with the error message.
    ///
    /// # Errors
    ///
    /// Returns the failure message if the fetch failed.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }

    /// Transform the successful data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            Self::Success(data) => FetchResult::Success(f(data)),
            Self::Failure(error) => FetchResult::Failure(error),
        }
    }
}

impl<T: Serialize> Serialize for FetchResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchResult", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> TryFrom<Envelope<T>> for FetchResult<T> {
    type Error = &'static str;

    fn try_from(envelope: Envelope<T>) -> Result<Self, Self::Error> {
        match (envelope.success, envelope.data, envelope.error) {
            (true, Some(data), _) => Ok(Self::Success(data)),
            (false, _, Some(error)) => Ok(Self::Failure(error)),
            (true, None, _) => Err("successful fetch result is missing `data`"),
            (false, _, None) => Err("failed fetch result is missing `error`"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let fetched = FetchResult::Success(vec![1, 2]);
        assert_eq!(
            serde_json::to_string(&fetched).unwrap(),
            r#"{"success":true,"data":[1,2]}"#
        );
    }

    #[test]
    fn test_failure_shape() {
        let fetched: FetchResult<Vec<u8>> =
            FetchResult::from_result(Err("pool timed out"), "Failed to fetch books");
        assert_eq!(
            serde_json::to_string(&fetched).unwrap(),
            r#"{"success":false,"error":"Failed to fetch books"}"#
        );
    }

    #[test]
    fn test_deserialize_requires_matching_half() {
        let ok: FetchResult<Vec<u8>> =
            serde_json::from_str(r#"{"success":true,"data":[3]}"#).unwrap();
        assert_eq!(ok.into_result(), Ok(vec![3]));

        let failed: FetchResult<Vec<u8>> =
            serde_json::from_str(r#"{"success":false,"error":"nope"}"#).unwrap();
        assert_eq!(failed.into_result(), Err("nope".to_string()));

        assert!(serde_json::from_str::<FetchResult<Vec<u8>>>(r#"{"success":true}"#).is_err());
    }

    #[test]
    fn test_map_keeps_failure() {
        let failed: FetchResult<u8> = FetchResult::Failure("x".into());
        assert_eq!(failed.map(|n| n + 1), FetchResult::Failure("x".into()));
        assert_eq!(FetchResult::Success(1).map(|n| n + 1), FetchResult::Success(2));
    }
}
