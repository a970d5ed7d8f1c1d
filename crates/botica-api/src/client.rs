//! # API Client
//!
//! Thin authenticated JSON client over the REST backend's `/api` base path.
//!
//! Every successful response carries the `{ "data": ... }` envelope; helpers
//! return the unwrapped `.data` value. Any response with status >= 401 is an
//! auth failure per the backend contract (treated inclusively) — it is
//! surfaced to the caller and does NOT clear the stored token.

use reqwest::{Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::session::Session;

/// Base URL used when `BOTICA_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// =============================================================================
// Configuration
// =============================================================================

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin, without the `/api` suffix.
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
        }
    }

    /// Reads `BOTICA_API_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        ApiConfig {
            base_url: std::env::var("BOTICA_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::from_env()
    }
}

// =============================================================================
// Client
// =============================================================================

/// Authenticated JSON client shared by the cache and the dispatcher.
///
/// Cheap to clone; all clones share one connection pool and one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

/// Success envelope: the payload always arrives under `data`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}

/// Error envelope: failures carry a human-readable `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: Session) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: format!("{}/api", config.base_url.trim_end_matches('/')),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Issues one request and unwraps the response envelope.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        if status >= 401 {
            let message = error_message(response).await;
            warn!(status, %message, "auth failure from backend");
            return Err(ApiError::AuthFailed { status, message });
        }
        if status >= 400 {
            let message = error_message(response).await;
            return Err(ApiError::Rejected { status, message });
        }

        let envelope: Envelope = response.json().await?;
        Ok(envelope.data)
    }

    pub async fn get_json(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.request(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await
    }

    pub async fn delete_json(&self, path: &str) -> ApiResult<Value> {
        self.request(Method::DELETE, path, None).await
    }
}

/// Extracts the backend's `message` from an error response, with a generic
/// fallback when the body is not the expected shape.
async fn error_message(response: Response) -> String {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| "unexpected server error".to_string())
}
