//! Application-session state.
//!
//! One owned value replaces ad-hoc "current user" / "current feed"
//! globals: the session holds the API client, the current user (`None`
//! when anonymous), and the current story feed. It is created anonymous,
//! populated by login/signup/restore, and returned to anonymous by
//! [`Session::logout`]. Exactly one optional token; no multi-user
//! support.

use tracing::debug;

use paperboy_core::{SessionToken, Username};

use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{Story, StoryDraft, StoryList, User};

/// Session-level state for one consumer of the story service.
pub struct Session {
    api: ApiClient,
    user: Option<User>,
    stories: StoryList,
}

impl Session {
    /// Create an anonymous session with an empty feed.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            user: None,
            stories: StoryList::default(),
        }
    }

    /// The API client this session talks through.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Currently logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current story feed.
    #[must_use]
    pub fn stories(&self) -> &StoryList {
        &self.stories
    }

    /// Whether the session is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replace the feed with a fresh fetch from the service.
    ///
    /// # Errors
    ///
    /// Propagates the fetch failure; the previous feed is kept on error.
    pub async fn refresh_stories(&mut self) -> Result<&StoryList> {
        self.stories = StoryList::fetch(&self.api).await?;
        Ok(&self.stories)
    }

    /// Log in and enter the authenticated state.
    ///
    /// # Errors
    ///
    /// `Auth` on bad credentials; the session stays anonymous on error.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let user = User::login(&self.api, username, password).await?;
        Ok(self.user.insert(user))
    }

    /// Sign up and enter the authenticated state.
    ///
    /// # Errors
    ///
    /// `Conflict` if the username is taken, `Validation` for malformed
    /// fields; the session stays anonymous on error.
    pub async fn signup(&mut self, username: &str, password: &str, name: &str) -> Result<&User> {
        let user = User::signup(&self.api, username, password, name).await?;
        Ok(self.user.insert(user))
    }

    /// Restore the session from stored credentials.
    ///
    /// Stays anonymous (and issues no HTTP call) when either credential
    /// is absent.
    ///
    /// # Errors
    ///
    /// `Auth` if the service rejects the token.
    pub async fn restore(
        &mut self,
        token: Option<SessionToken>,
        username: Option<Username>,
    ) -> Result<Option<&User>> {
        match User::restore_session(&self.api, token, username).await? {
            Some(user) => Ok(Some(self.user.insert(user))),
            None => Ok(None),
        }
    }

    /// Discard the current user and return to the anonymous state.
    ///
    /// The token is dropped with the user; the feed is kept.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            debug!(username = %user.username, "logging out");
        }
    }

    /// Submit a story as the current user and prepend it to the feed.
    ///
    /// # Errors
    ///
    /// `Auth` when the session is anonymous; otherwise whatever the
    /// submission propagates.
    pub async fn submit_story(&mut self, draft: &StoryDraft) -> Result<Story> {
        let user = self.user.as_ref().ok_or_else(not_logged_in)?;
        self.stories.add_story(&self.api, user, draft).await
    }

    /// Mark a story as a favorite of the current user.
    ///
    /// # Errors
    ///
    /// `Auth` when the session is anonymous; otherwise whatever the
    /// favorite call propagates (the optimistic local append included).
    pub async fn add_favorite(&mut self, story: &Story) -> Result<()> {
        let user = self.user.as_mut().ok_or_else(not_logged_in)?;
        user.add_favorite(&self.api, story).await
    }

    /// Unmark a favorite of the current user.
    ///
    /// # Errors
    ///
    /// `Auth` when the session is anonymous; otherwise whatever the
    /// unfavorite call propagates.
    pub async fn remove_favorite(&mut self, story: &Story) -> Result<()> {
        let user = self.user.as_mut().ok_or_else(not_logged_in)?;
        user.remove_favorite(&self.api, story).await
    }
}

fn not_logged_in() -> ApiError {
    ApiError::Auth("not logged in".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::config::ClientConfig;

    fn session() -> Session {
        // Nothing in these tests performs I/O; the port is never dialed.
        let api = ApiClient::new(&ClientConfig::with_base_url("http://127.0.0.1:9"));
        Session::new(api)
    }

    fn user() -> User {
        User {
            username: Username::new("ada"),
            name: "Ada Lovelace".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            favorites: Vec::new(),
            own_stories: Vec::new(),
            token: SessionToken::new("tok"),
        }
    }

    #[test]
    fn test_new_session_is_anonymous_with_empty_feed() {
        let session = session();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(session.stories().is_empty());
    }

    #[test]
    fn test_logout_discards_user_and_token() {
        let mut session = session();
        session.user = Some(user());
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());

        // Logging out twice is a no-op.
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_anonymous_restore_skips_remote_call() {
        let mut session = session();
        // The stub port above is not listening: a remote call would error.
        let restored = session
            .restore(None, Some(Username::new("ada")))
            .await
            .expect("no-session case is not an error");
        assert!(restored.is_none());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_anonymous_submit_is_auth_error() {
        let mut session = session();
        let draft = StoryDraft::new("Ada", "On engines", "http://example.com");
        let err = session.submit_story(&draft).await.expect_err("anonymous");
        assert!(matches!(err, ApiError::Auth(_)));
    }
}
