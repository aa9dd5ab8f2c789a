//! # Camper model shared by the server and the roster UI
//!
//! [`User`] is the only entity in the roster. It crosses the HTTP boundary as
//! JSON in both directions, so it lives here rather than in the server crate and
//! compiles for WASM as well as native targets.
//!
//! - `id`: store-assigned primary key, never changed by this system.
//! - `name`, `emoji`: display fields, read only from the API's point of view.
//! - `username`: the one mutable field. `None` means "not set" and is always
//!   serialized as `null` rather than omitted.
//!
//! The request/response companions ([`UpdateUsername`], [`ErrorBody`],
//! [`HealthStatus`]) describe the remaining JSON bodies of the API.

use serde::{Deserialize, Serialize};

/// A roster record as returned by every read or update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: Option<String>,
    pub emoji: String,
}

impl User {
    /// The username as shown in the roster, with a placeholder when unset.
    pub fn display_username(&self) -> &str {
        self.username.as_deref().unwrap_or("No username set")
    }
}

/// Body of `PUT /api/users/{id}/username`.
///
/// `username` is kept as a raw JSON value so that a missing key, `null` or a
/// non-string all fall through to the same validation failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateUsername {
    #[serde(default)]
    pub username: serde_json::Value,
}

impl UpdateUsername {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: serde_json::Value::String(username.into()),
        }
    }

    /// Read the body from an arbitrary JSON document. Only an object can carry
    /// a `username`; arrays and scalars yield an empty request.
    pub fn from_json(body: serde_json::Value) -> Self {
        match body {
            serde_json::Value::Object(mut fields) => Self {
                username: fields.remove("username").unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }

    /// The trimmed candidate, or `None` when it is absent, not a string, or blank.
    pub fn candidate(&self) -> Option<&str> {
        self.username
            .as_str()
            .map(str::trim)
            .filter(|username| !username.is_empty())
    }
}

/// JSON error payload returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Store-provided detail. Serialized as `null` when a message is present
    /// but the store gave no detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Option<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            detail: None,
        }
    }

    /// Attach the store's message and optional detail.
    pub fn with_store_detail(mut self, message: impl Into<String>, detail: Option<String>) -> Self {
        self.message = Some(message.into());
        self.detail = Some(detail);
        self
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
