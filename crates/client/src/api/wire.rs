//! Wire-format records for the story service API.
//!
//! Every response body decodes into one of these records before it is
//! converted into a domain type. A shape mismatch surfaces
//! [`crate::error::ApiError::Validation`] at the boundary instead of
//! producing a partially-populated model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use paperboy_core::{SessionToken, StoryId, Username};

use crate::models::{Story, User};

/// One story resource as returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoryRecord {
    pub author: String,
    pub title: String,
    pub url: String,
    pub username: Username,
    pub story_id: StoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One user resource as returned by the service.
///
/// `favorites` and `stories` default to empty so a freshly-created
/// account decodes the same way as a populated one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRecord {
    pub username: Username,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<StoryRecord>,
    #[serde(default)]
    pub stories: Vec<StoryRecord>,
}

/// `GET /stories` response.
#[derive(Debug, Deserialize)]
pub(crate) struct StoriesEnvelope {
    pub stories: Vec<StoryRecord>,
}

/// `POST /stories` response.
#[derive(Debug, Deserialize)]
pub(crate) struct StoryEnvelope {
    pub story: StoryRecord,
}

/// `GET /users/{username}` response.
#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: UserRecord,
}

/// `POST /signup` and `POST /login` response.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthEnvelope {
    pub user: UserRecord,
    pub token: String,
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            author: record.author,
            title: record.title,
            url: record.url,
            username: record.username,
            story_id: record.story_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl UserRecord {
    /// Convert into a domain [`User`], attaching the session token.
    pub(crate) fn into_user(self, token: SessionToken) -> User {
        User {
            username: self.username,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            favorites: self.favorites.into_iter().map(Story::from).collect(),
            own_stories: self.stories.into_iter().map(Story::from).collect(),
            token,
        }
    }
}
