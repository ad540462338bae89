//! Paperboy Client - typed async data layer for the Paperboy story service.
//!
//! # Architecture
//!
//! - [`config`] - Client configuration loaded from the environment
//! - [`api`] - Low-level REST transport (one `reqwest::Client`, no retries)
//! - [`models`] - Domain types: [`Story`], [`StoryList`], [`User`]
//! - [`session`] - Application-session state (current user + current feed)
//! - [`error`] - The [`ApiError`] taxonomy every operation propagates
//!
//! The rendering layer is an external consumer: it calls into the models
//! and re-renders from the returned or mutated values. Nothing here
//! retries, caches, or recovers - failures propagate to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use paperboy_client::{ApiClient, ClientConfig, StoryList, User};
//!
//! let config = ClientConfig::from_env()?;
//! let api = ApiClient::new(&config);
//!
//! // Anonymous feed read
//! let stories = StoryList::fetch(&api).await?;
//!
//! // Authenticate and favorite the top story
//! let mut user = User::login(&api, "alice", "hunter2").await?;
//! if let Some(story) = stories.stories().first() {
//!     user.add_favorite(&api, story).await?;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use api::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result};
pub use models::{MalformedUrlError, Story, StoryDraft, StoryList, User};
pub use session::Session;
