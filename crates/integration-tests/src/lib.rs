//! Integration-test harness for the Paperboy client.
//!
//! Spins up an in-process stub of the story service and points a real
//! [`ApiClient`] at it. The stub keeps its state in memory, records every
//! request it serves (so tests can assert on call counts), and can be
//! told to fail its favorites routes (so tests can pin down the
//! optimistic-mutation semantics).
//!
//! # Example
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn test_feed_roundtrip() {
//!     let ctx = TestContext::new().await;
//!     ctx.seed_story("a1", "Ada", "On engines", "http://example.com", "ada");
//!
//!     let list = StoryList::fetch(&ctx.client).await.unwrap();
//!     assert_eq!(list.len(), 1);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use paperboy_client::{ApiClient, ClientConfig, Story};
use paperboy_core::{StoryId, Username};

type SharedState = Arc<Mutex<StubState>>;

// ─────────────────────────────────────────────────────────────────────────────
// Stub state
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct StubState {
    /// username -> account
    users: HashMap<String, StubUser>,
    /// token -> username
    tokens: HashMap<String, String>,
    /// Feed records in server order (newest first).
    stories: Vec<Value>,
    /// Every request served, as "METHOD /path" lines.
    requests: Vec<String>,
    /// When set, both favorites routes answer with this status.
    favorites_failure: Option<u16>,
}

#[derive(Default)]
struct StubUser {
    password: String,
    name: String,
    created_at: String,
    favorites: Vec<Value>,
    stories: Vec<Value>,
}

impl StubState {
    fn username_for_token(&self, token: Option<&Value>) -> Option<String> {
        let token = token?.as_str()?;
        self.tokens.get(token).cloned()
    }

    fn user_record(&self, username: &str) -> Option<Value> {
        let user = self.users.get(username)?;
        Some(json!({
            "username": username,
            "name": user.name.clone(),
            "createdAt": user.created_at.clone(),
            "updatedAt": user.created_at.clone(),
            "favorites": user.favorites.clone(),
            "stories": user.stories.clone(),
        }))
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": {
            "status": status.as_u16(),
            "title": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        },
    });
    (status, Json(body)).into_response()
}

fn nonempty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field)?.as_str().filter(|s| !s.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn list_stories(State(state): State<SharedState>) -> Response {
    let mut state = state.lock().expect("state lock");
    state.requests.push("GET /stories".to_string());

    Json(json!({ "stories": state.stories.clone() })).into_response()
}

async fn create_story(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state lock");
    state.requests.push("POST /stories".to_string());

    let Some(username) = state.username_for_token(body.get("token")) else {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid token.");
    };

    let story = body.get("story").cloned().unwrap_or_default();
    let (Some(author), Some(title), Some(url)) = (
        nonempty_str(&story, "author"),
        nonempty_str(&story, "title"),
        nonempty_str(&story, "url"),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required story fields.");
    };

    let timestamp = now();
    let record = json!({
        "author": author,
        "title": title,
        "url": url,
        "username": username.clone(),
        "storyId": Uuid::new_v4().to_string(),
        "createdAt": timestamp.clone(),
        "updatedAt": timestamp,
    });

    state.stories.insert(0, record.clone());
    if let Some(user) = state.users.get_mut(&username) {
        user.stories.insert(0, record.clone());
    }

    Json(json!({ "story": record })).into_response()
}

async fn signup(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state lock");
    state.requests.push("POST /signup".to_string());

    let user = body.get("user").cloned().unwrap_or_default();
    let (Some(username), Some(password), Some(name)) = (
        nonempty_str(&user, "username"),
        nonempty_str(&user, "password"),
        nonempty_str(&user, "name"),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required user fields.");
    };

    if state.users.contains_key(username) {
        return error_response(StatusCode::CONFLICT, "Username already taken.");
    }

    state.users.insert(
        username.to_string(),
        StubUser {
            password: password.to_string(),
            name: name.to_string(),
            created_at: now(),
            ..StubUser::default()
        },
    );

    let token = Uuid::new_v4().to_string();
    state.tokens.insert(token.clone(), username.to_string());

    let record = state.user_record(username).unwrap_or_default();
    Json(json!({ "user": record, "token": token })).into_response()
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("state lock");
    state.requests.push("POST /login".to_string());

    let user = body.get("user").cloned().unwrap_or_default();
    let (Some(username), Some(password)) = (
        nonempty_str(&user, "username"),
        nonempty_str(&user, "password"),
    ) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required user fields.");
    };

    let valid = state
        .users
        .get(username)
        .is_some_and(|account| account.password == password);
    if !valid {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials.");
    }

    let token = Uuid::new_v4().to_string();
    state.tokens.insert(token.clone(), username.to_string());

    let record = state.user_record(username).unwrap_or_default();
    Json(json!({ "user": record, "token": token })).into_response()
}

async fn get_user(
    State(state): State<SharedState>,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    state.requests.push(format!("GET /users/{username}"));

    let authorized = params
        .get("token")
        .and_then(|token| state.tokens.get(token))
        .is_some_and(|owner| *owner == username);
    if !authorized {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid token.");
    }

    match state.user_record(&username) {
        Some(record) => Json(json!({ "user": record })).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "User not found."),
    }
}

async fn add_favorite(
    State(state): State<SharedState>,
    Path((username, story_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    state
        .requests
        .push(format!("POST /users/{username}/favorites/{story_id}"));

    if let Some(status) = state.favorites_failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_response(status, "Injected failure.");
    }

    let authorized = state
        .username_for_token(body.get("token"))
        .is_some_and(|owner| owner == username);
    if !authorized {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid token.");
    }

    let Some(record) = state
        .stories
        .iter()
        .find(|record| record.get("storyId").and_then(Value::as_str) == Some(story_id.as_str()))
        .cloned()
    else {
        return error_response(StatusCode::NOT_FOUND, "Story not found.");
    };

    if let Some(user) = state.users.get_mut(&username) {
        // The service stores at most one marking per story.
        let already = user
            .favorites
            .iter()
            .any(|f| f.get("storyId") == record.get("storyId"));
        if !already {
            user.favorites.push(record);
        }
    }

    Json(json!({ "message": "Favorite Added!" })).into_response()
}

async fn remove_favorite(
    State(state): State<SharedState>,
    Path((username, story_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().expect("state lock");
    state
        .requests
        .push(format!("DELETE /users/{username}/favorites/{story_id}"));

    if let Some(status) = state.favorites_failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_response(status, "Injected failure.");
    }

    let authorized = params
        .get("token")
        .and_then(|token| state.tokens.get(token))
        .is_some_and(|owner| *owner == username);
    if !authorized {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid token.");
    }

    if let Some(user) = state.users.get_mut(&username) {
        user.favorites
            .retain(|f| f.get("storyId").and_then(Value::as_str) != Some(story_id.as_str()));
    }

    Json(json!({ "message": "Favorite Removed!" })).into_response()
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/stories", get(list_stories).post(create_story))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/users/{username}", get(get_user))
        .route(
            "/users/{username}/favorites/{story_id}",
            post(add_favorite).delete(remove_favorite),
        )
        .with_state(state)
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "paperboy_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Test context
// ─────────────────────────────────────────────────────────────────────────────

/// One stub service plus a client pointed at it.
pub struct TestContext {
    /// Client under test.
    pub client: ApiClient,
    /// Base URL of the stub service.
    pub base_url: String,
    state: SharedState,
}

impl TestContext {
    /// Start a stub service on a random loopback port and build a client
    /// for it.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn new() -> Self {
        init_tracing();

        let state = SharedState::default();
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        let base_url = format!("http://{addr}");
        let client = ApiClient::new(&ClientConfig::with_base_url(base_url.as_str()));

        Self {
            client,
            base_url,
            state,
        }
    }

    /// Append a story record to the stub's feed and return the matching
    /// domain value.
    pub fn seed_story(
        &self,
        story_id: &str,
        author: &str,
        title: &str,
        url: &str,
        username: &str,
    ) -> Story {
        let timestamp = now();
        let record = json!({
            "author": author,
            "title": title,
            "url": url,
            "username": username,
            "storyId": story_id,
            "createdAt": timestamp.clone(),
            "updatedAt": timestamp.clone(),
        });

        let mut state = self.state.lock().expect("state lock");
        state.stories.push(record);

        let parsed: DateTime<Utc> = timestamp.parse().expect("rfc3339 timestamp");
        Story {
            author: author.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            username: Username::new(username),
            story_id: StoryId::new(story_id),
            created_at: parsed,
            updated_at: parsed,
        }
    }

    /// Create an account directly in the stub, bypassing HTTP.
    pub fn seed_user(&self, username: &str, password: &str, name: &str) {
        let mut state = self.state.lock().expect("state lock");
        state.users.insert(
            username.to_string(),
            StubUser {
                password: password.to_string(),
                name: name.to_string(),
                created_at: now(),
                ..StubUser::default()
            },
        );
    }

    /// Mint a token the stub will accept for `username`.
    pub fn issue_token(&self, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let mut state = self.state.lock().expect("state lock");
        state.tokens.insert(token.clone(), username.to_string());
        token
    }

    /// Every request the stub has served, as "METHOD /path" lines.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().expect("state lock").requests.clone()
    }

    /// Make both favorites routes answer with `status` from now on.
    pub fn fail_favorites(&self, status: u16) {
        self.state.lock().expect("state lock").favorites_failure = Some(status);
    }

    /// Story ids currently marked as favorites for `username`, server-side.
    pub fn server_favorites(&self, username: &str) -> Vec<String> {
        let state = self.state.lock().expect("state lock");
        state.users.get(username).map_or_else(Vec::new, |user| {
            user.favorites
                .iter()
                .filter_map(|f| f.get("storyId").and_then(Value::as_str))
                .map(ToOwned::to_owned)
                .collect()
        })
    }
}
