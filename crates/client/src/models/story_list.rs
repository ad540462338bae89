//! The story feed.

use serde_json::json;
use tracing::debug;

use crate::api::wire::{StoriesEnvelope, StoryEnvelope};
use crate::api::{ApiClient, endpoints};
use crate::error::Result;
use crate::models::{Story, StoryDraft, User};

/// The ordered feed of all stories.
///
/// Order reflects the server's ordering, except that locally-submitted
/// stories are prepended immediately - before any re-fetch. One instance
/// lives per session; submissions mutate it in place. There is no remove
/// or update at this layer.
#[derive(Debug, Clone, Default)]
pub struct StoryList {
    stories: Vec<Story>,
}

impl StoryList {
    /// Fetch the full feed from the service.
    ///
    /// No authentication required. Stories come back in server order.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Service` on a non-success
    /// response. No retry is attempted.
    pub async fn fetch(api: &ApiClient) -> Result<Self> {
        debug!("fetching story feed");
        let envelope: StoriesEnvelope = api.get_json(endpoints::STORIES, &[]).await?;

        Ok(Self {
            stories: envelope.stories.into_iter().map(Story::from).collect(),
        })
    }

    /// Stories in feed order.
    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Number of stories in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Submit a new story as `user` and prepend it to the feed.
    ///
    /// The service assigns the id, posting username, and timestamps; the
    /// returned story is the service's echo, and an equal story sits at
    /// position 0 of the feed afterwards.
    ///
    /// # Errors
    ///
    /// `Auth` if the user's token is rejected, `Validation` if the draft
    /// is missing required fields (service-side), `Network`/`Service`
    /// otherwise. On error the feed is untouched.
    pub async fn add_story(
        &mut self,
        api: &ApiClient,
        user: &User,
        draft: &StoryDraft,
    ) -> Result<Story> {
        debug!(author = %draft.author, title = %draft.title, "submitting story");
        let body = json!({
            "token": user.token.expose(),
            "story": {
                "author": draft.author,
                "title": draft.title,
                "url": draft.url,
            },
        });

        let envelope: StoryEnvelope = api.post_json(endpoints::STORIES, &body).await?;
        let story = Story::from(envelope.story);
        self.stories.insert(0, story.clone());
        Ok(story)
    }
}
