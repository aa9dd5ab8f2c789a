//! HTTP client for the roster API.
//!
//! Used by the UI on every platform; `reqwest` maps onto `fetch` in WASM builds.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::models::{ErrorBody, HealthStatus, UpdateUsername, User};

/// Base URL used when `DINOCAMP_API_URL` is not set at compile time.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// The API base URL baked into this build.
pub fn api_url() -> &'static str {
    option_env!("DINOCAMP_API_URL").unwrap_or(DEFAULT_API_URL)
}

/// Failure talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    #[error("server responded with status {status}: {}", error.as_deref().unwrap_or("no error message"))]
    Status { status: u16, error: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// True when the server answered with a non-2xx status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Typed client for `/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(api_url())
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .http
            .get(self.url("health"))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        read_json(response).await
    }

    /// `GET /users`: every camper, ordered by id.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self
            .http
            .get(self.url("users"))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        read_json(response).await
    }

    /// `PUT /users/{id}/username`: returns the updated record.
    pub async fn update_username(&self, id: i32, username: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("users/{id}/username")))
            .json(&UpdateUsername::new(username))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let error = match response.json::<ErrorBody>().await {
            Ok(body) => Some(body.error),
            Err(e) => {
                tracing::debug!("Error body was not JSON: {}", e);
                None
            }
        };
        return Err(ClientError::Status {
            status: status.as_u16(),
            error,
        });
    }
    response.json().await.map_err(ClientError::Decode)
}
