//! # HTTP routes for the roster API
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/health` | [`health`] |
//! | `GET` | `/api/users` | [`list_users`] |
//! | `PUT` | `/api/users/{id}/username` | [`update_username`] |
//!
//! Every response, including errors and CORS preflights, carries the same
//! permissive cross-origin headers so a browser client on any origin can call
//! the API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::{
    ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use axum::routing::{get, put};
use axum::{Form, Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use api::{HealthStatus, UpdateUsername, User};

use crate::error::ApiError;
use crate::store::UserStore;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

const X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn UserStore>,
    disclose_store_errors: bool,
}

impl AppState {
    pub fn new(store: impl UserStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            disclose_store_errors: true,
        }
    }

    /// Whether list failures include the store's message and detail.
    pub fn with_error_detail(mut self, disclose: bool) -> Self {
        self.disclose_store_errors = disclose;
        self
    }
}

/// Build the API router with tracing and CORS applied to every route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}/username", put(update_username))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
}

/// Answers preflights; the header layers above normalise the values.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, X_REQUESTED_WITH, CONTENT_TYPE, ACCEPT])
}

/// Liveness check. Does not touch the store.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Every camper, ordered by id.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(|source| ApiError::ListFailed {
            source,
            disclose: state.disclose_store_errors,
        })?;
    Ok(Json(users))
}

/// The update body, sent either as a JSON object or as an urlencoded form.
///
/// Any other content type is read as an empty body.
pub struct UsernameBody(pub UpdateUsername);

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<S> FromRequest<S> for UsernameBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
            let body = fields
                .remove("username")
                .map(UpdateUsername::new)
                .unwrap_or_default();
            return Ok(Self(body));
        }

        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(UpdateUsername::from_json(value))),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(UpdateUsername::default())),
            Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
        }
    }
}

/// Set one camper's username to the trimmed value from the body.
pub async fn update_username(
    State(state): State<AppState>,
    Path(id): Path<String>,
    UsernameBody(body): UsernameBody,
) -> Result<Json<User>, ApiError> {
    let username = body.candidate().ok_or(ApiError::InvalidUsername)?;

    // Ids are INTEGER in the store; anything else cannot match a row.
    let id: i32 = id.parse().map_err(|_| ApiError::UserNotFound)?;

    let user = state
        .store
        .update_username(id, username)
        .await
        .map_err(ApiError::UpdateFailed)?
        .ok_or(ApiError::UserNotFound)?;

    tracing::debug!(id, username, "Updated username");
    Ok(Json(user))
}
