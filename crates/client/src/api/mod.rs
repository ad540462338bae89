//! Low-level transport for the story service REST API.
//!
//! # Endpoints
//!
//! | Operation     | Method | Path                                    | Auth           |
//! |---------------|--------|-----------------------------------------|----------------|
//! | list stories  | GET    | `/stories`                              | none           |
//! | create story  | POST   | `/stories`                              | token in body  |
//! | signup        | POST   | `/signup`                               | none           |
//! | login         | POST   | `/login`                                | none           |
//! | get user      | GET    | `/users/{username}`                     | token in query |
//! | favorite      | POST   | `/users/{username}/favorites/{storyId}` | token in body  |
//! | unfavorite    | DELETE | `/users/{username}/favorites/{storyId}` | token in query |
//!
//! Every helper issues exactly one HTTP call: no retries, no caching.
//! Non-success statuses are classified into [`ApiError`] before any body
//! decode, so a 401 with a garbage body is still an auth error.

pub(crate) mod wire;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use paperboy_core::{StoryId, Username};

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorEnvelope, Result};

const USER_AGENT: &str = concat!("paperboy-client/", env!("CARGO_PKG_VERSION"));

/// REST endpoint paths.
pub(crate) mod endpoints {
    use super::{StoryId, Username};

    /// The story collection (list + create).
    pub const STORIES: &str = "/stories";

    /// Account creation.
    pub const SIGNUP: &str = "/signup";

    /// Credential authentication.
    pub const LOGIN: &str = "/login";

    /// One user resource.
    pub fn user(username: &Username) -> String {
        format!("/users/{username}")
    }

    /// One user-to-story favorite marking.
    pub fn favorite(username: &Username, story_id: &StoryId) -> String {
        format!("/users/{username}/favorites/{story_id}")
    }
}

/// Client for the story service REST API.
///
/// Cheaply cloneable via `Arc`; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed (TLS
    /// backend initialisation failure).
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// GET a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .inner
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::decode_body(Self::check_status(response).await?).await
    }

    /// POST a JSON body and decode the JSON response.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let response = self
            .inner
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::decode_body(Self::check_status(response).await?).await
    }

    /// POST where only the status matters; any response body is discarded.
    pub(crate) async fn post_ok(&self, path: &str, body: &serde_json::Value) -> Result<()> {
        let response = self
            .inner
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await.map(drop)
    }

    /// DELETE where only the status matters; any response body is discarded.
    pub(crate) async fn delete_ok(&self, path: &str, query: &[(&str, &str)]) -> Result<()> {
        let response = self
            .inner
            .http
            .delete(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::check_status(response).await.map(drop)
    }

    /// Map a non-success response into the error taxonomy.
    ///
    /// The service's error body is parsed best-effort for its message;
    /// unparseable bodies fall back to the raw text.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map_or(text, |envelope| envelope.error.message);
        Err(ApiError::from_status(status, message))
    }

    /// Decode a success body, surfacing shape mismatches as validation errors.
    async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(ApiError::decode)
    }
}
