//! The authenticated user and its owned story collections.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use paperboy_core::{SessionToken, Username};

use crate::api::wire::{AuthEnvelope, UserEnvelope};
use crate::api::{ApiClient, endpoints};
use crate::error::Result;
use crate::models::Story;

/// The current account, its session token, and its story collections.
///
/// `favorites` and `own_stories` are owned copies, not shared references
/// into the session's feed. The whole value is discarded on logout; until
/// then the token is treated as valid until a call using it fails.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique account login.
    pub username: Username,
    /// The user's full name.
    pub name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Stories the user has marked as favorites.
    pub favorites: Vec<Story>,
    /// Stories the user has posted.
    pub own_stories: Vec<Story>,
    /// Session credential for authenticated calls.
    pub token: SessionToken,
}

impl User {
    // =========================================================================
    // Account lifecycle
    // =========================================================================

    /// Register a new account and return it with a fresh token.
    ///
    /// The returned user starts with empty `favorites` and `own_stories`.
    ///
    /// # Errors
    ///
    /// `Conflict` if the username is already taken, `Validation` for
    /// malformed fields (as judged by the service).
    pub async fn signup(
        api: &ApiClient,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self> {
        debug!(username, "signing up");
        let body = json!({
            "user": {
                "username": username,
                "password": password,
                "name": name,
            },
        });

        let envelope: AuthEnvelope = api.post_json(endpoints::SIGNUP, &body).await?;
        Ok(envelope.user.into_user(SessionToken::new(envelope.token)))
    }

    /// Authenticate an existing account and return it with a fresh token.
    ///
    /// The returned user carries the account's stored favorites and
    /// posted stories.
    ///
    /// # Errors
    ///
    /// `Auth` on bad credentials.
    pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<Self> {
        debug!(username, "logging in");
        let body = json!({
            "user": {
                "username": username,
                "password": password,
            },
        });

        let envelope: AuthEnvelope = api.post_json(endpoints::LOGIN, &body).await?;
        Ok(envelope.user.into_user(SessionToken::new(envelope.token)))
    }

    /// Restore a session from stored credentials.
    ///
    /// Absence of either credential is not an error: it is the "no
    /// session" case, `Ok(None)` is returned, and no HTTP call is issued.
    /// On success the returned user keeps the passed-in token.
    ///
    /// # Errors
    ///
    /// `Auth` if the service rejects the token.
    pub async fn restore_session(
        api: &ApiClient,
        token: Option<SessionToken>,
        username: Option<Username>,
    ) -> Result<Option<Self>> {
        let (Some(token), Some(username)) = (token, username) else {
            debug!("no stored credentials, skipping session restore");
            return Ok(None);
        };

        debug!(username = %username, "restoring session");
        let envelope: UserEnvelope = api
            .get_json(&endpoints::user(&username), &[("token", token.expose())])
            .await?;
        Ok(Some(envelope.user.into_user(token)))
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Mark a story as a favorite.
    ///
    /// The story is appended to `favorites` before the service call; on
    /// failure the append is NOT undone and the error still propagates
    /// (fire-and-forget toward the local copy). Duplicate-unsafe: calling
    /// twice for the same story without an intervening remove leaves two
    /// local entries.
    ///
    /// # Errors
    ///
    /// `Auth` on a rejected token, `Network`/`Service` otherwise - in
    /// every case after the local append has already happened.
    pub async fn add_favorite(&mut self, api: &ApiClient, story: &Story) -> Result<()> {
        debug!(story_id = %story.story_id, "adding favorite");
        self.favorites.push(story.clone());

        let body = json!({ "token": self.token.expose() });
        api.post_ok(&endpoints::favorite(&self.username, &story.story_id), &body)
            .await
    }

    /// Unmark a favorite.
    ///
    /// Every entry with the story's id is removed from `favorites` before
    /// the service call (normally at most one exists); the removal is not
    /// undone on failure.
    ///
    /// # Errors
    ///
    /// `Auth` on a rejected token, `Network`/`Service` otherwise - after
    /// the local removal has already happened.
    pub async fn remove_favorite(&mut self, api: &ApiClient, story: &Story) -> Result<()> {
        debug!(story_id = %story.story_id, "removing favorite");
        self.favorites.retain(|s| s.story_id != story.story_id);

        api.delete_ok(
            &endpoints::favorite(&self.username, &story.story_id),
            &[("token", self.token.expose())],
        )
        .await
    }

    /// Whether a story is currently in `favorites`.
    #[must_use]
    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorites.iter().any(|s| s.story_id == story.story_id)
    }
}
