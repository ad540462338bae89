//! Story domain types.

use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use paperboy_core::{StoryId, Username};

/// Error parsing the host out of a story URL.
#[derive(Debug, Error)]
pub enum MalformedUrlError {
    /// Not an absolute, schemed URL.
    #[error("invalid story url: {0}")]
    Invalid(#[from] url::ParseError),
    /// Parsed, but the URL has no host component (e.g. `mailto:`).
    #[error("story url has no host")]
    MissingHost,
}

/// A single story from the feed.
///
/// Constructed whenever the service returns a story record - on a feed
/// fetch, on story creation, or embedded in a user's collections - and
/// never mutated afterwards. Two stories are equal when their ids are
/// equal, wherever the instances came from.
#[derive(Debug, Clone)]
pub struct Story {
    /// Display name of the article's author.
    pub author: String,
    /// Story headline.
    pub title: String,
    /// Link the story points at.
    pub url: String,
    /// Login of the account that posted the story.
    pub username: Username,
    /// Service-assigned identifier, stable across sessions.
    pub story_id: StoryId,
    /// When the story was posted.
    pub created_at: DateTime<Utc>,
    /// When the story was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for Story {
    fn eq(&self, other: &Self) -> bool {
        self.story_id == other.story_id
    }
}

impl Eq for Story {}

impl Story {
    /// Parse the host component out of the story URL.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedUrlError`] if the URL is relative, unparseable,
    /// or has no host.
    pub fn host_name(&self) -> Result<String, MalformedUrlError> {
        let url = Url::parse(&self.url)?;
        url.host_str()
            .map(ToOwned::to_owned)
            .ok_or(MalformedUrlError::MissingHost)
    }
}

/// Input for submitting a new story.
///
/// The service assigns the id, the posting username, and the timestamps.
#[derive(Debug, Clone)]
pub struct StoryDraft {
    /// Display name of the article's author.
    pub author: String,
    /// Story headline.
    pub title: String,
    /// Link the story points at.
    pub url: String,
}

impl StoryDraft {
    /// Create a new draft.
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}
