//! HTTP mapping for handler failures.
//!
//! Store failures are logged here, once, as they are turned into responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use api::ErrorBody;

use crate::store::StoreError;

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Username is required")]
    InvalidUsername,
    #[error("{0}")]
    InvalidBody(String),
    #[error("User not found")]
    UserNotFound,
    /// List failure. `disclose` controls whether the store's message and detail
    /// reach the client.
    #[error("Error fetching users: {source}")]
    ListFailed { source: StoreError, disclose: bool },
    #[error("Error updating username: {0}")]
    UpdateFailed(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUsername | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::ListFailed { .. } | Self::UpdateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::ListFailed {
                source,
                disclose: true,
            } => ErrorBody::new(INTERNAL_ERROR)
                .with_store_detail(source.message.clone(), source.detail.clone()),
            Self::ListFailed { .. } | Self::UpdateFailed(_) => ErrorBody::new(INTERNAL_ERROR),
            other => ErrorBody::new(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                Self::ListFailed { source, .. } | Self::UpdateFailed(source) => tracing::error!(
                    detail = source.detail.as_deref(),
                    "{}",
                    self
                ),
                _ => tracing::error!("{}", self),
            }
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_error() -> StoreError {
        StoreError::new("duplicate key value violates unique constraint")
            .with_detail("Key (username)=(rex) already exists.")
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(ApiError::InvalidUsername.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(ApiError::InvalidUsername.body()).unwrap(),
            json!({"error": "Username is required"})
        );

        assert_eq!(ApiError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(ApiError::UserNotFound.body()).unwrap(),
            json!({"error": "User not found"})
        );

        let body = ApiError::InvalidBody("EOF while parsing".to_string()).body();
        assert_eq!(body.error, "EOF while parsing");
    }

    #[test]
    fn test_list_failure_discloses_store_detail() {
        let err = ApiError::ListFailed {
            source: store_error(),
            disclose: true,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            json!({
                "error": "Internal server error",
                "message": "duplicate key value violates unique constraint",
                "detail": "Key (username)=(rex) already exists."
            })
        );
    }

    #[test]
    fn test_list_failure_redacted() {
        let err = ApiError::ListFailed {
            source: store_error(),
            disclose: false,
        };
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            json!({"error": "Internal server error"})
        );
    }

    #[test]
    fn test_update_failure_is_generic() {
        let err = ApiError::UpdateFailed(store_error());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            json!({"error": "Internal server error"})
        );
    }
}
