//! Feed fetch and story submission against the stub service.

use paperboy_client::{ApiError, StoryDraft, StoryList, User};
use paperboy_core::{SessionToken, StoryId};
use paperboy_integration_tests::TestContext;

#[tokio::test]
async fn test_fetch_maps_every_record() {
    let ctx = TestContext::new().await;
    ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");

    let list = StoryList::fetch(&ctx.client).await.expect("fetch");

    assert_eq!(list.len(), 1);
    assert_eq!(list.stories()[0].story_id, StoryId::new("a1"));
    assert_eq!(list.stories()[0].title, "On engines");
}

#[tokio::test]
async fn test_fetch_preserves_server_order() {
    let ctx = TestContext::new().await;
    ctx.seed_story("a1", "Ada", "First", "http://example.com/1", "ada");
    ctx.seed_story("b2", "Bob", "Second", "http://example.com/2", "bob");

    let list = StoryList::fetch(&ctx.client).await.expect("fetch");

    let ids: Vec<&str> = list.stories().iter().map(|s| s.story_id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "b2"]);
}

#[tokio::test]
async fn test_fetched_story_exposes_hostname() {
    let ctx = TestContext::new().await;
    ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");

    let list = StoryList::fetch(&ctx.client).await.expect("fetch");
    assert_eq!(list.stories()[0].host_name().expect("host"), "example.com");
}

#[tokio::test]
async fn test_add_story_prepends_server_echo() {
    let ctx = TestContext::new().await;
    ctx.seed_story("a1", "Ada", "Existing", "http://example.com/1", "ada");

    let user = User::signup(&ctx.client, "alice", "hunter2", "Alice Liddell")
        .await
        .expect("signup");
    let mut list = StoryList::fetch(&ctx.client).await.expect("fetch");
    let len_before = list.len();

    let draft = StoryDraft::new("Alice", "Breaking news", "http://example.com/breaking");
    let story = list
        .add_story(&ctx.client, &user, &draft)
        .await
        .expect("add story");

    // Server-assigned identity and authorship.
    assert!(!story.story_id.as_str().is_empty());
    assert_eq!(story.username, user.username);

    // Prepend-only: position 0, length +1.
    assert_eq!(list.len(), len_before + 1);
    assert_eq!(list.stories()[0], story);
}

#[tokio::test]
async fn test_add_story_rejected_token_is_auth_error() {
    let ctx = TestContext::new().await;

    let mut user = User::signup(&ctx.client, "alice", "hunter2", "Alice Liddell")
        .await
        .expect("signup");
    user.token = SessionToken::new("bogus");

    let mut list = StoryList::fetch(&ctx.client).await.expect("fetch");
    let len_before = list.len();

    let draft = StoryDraft::new("Alice", "Breaking news", "http://example.com/breaking");
    let err = list
        .add_story(&ctx.client, &user, &draft)
        .await
        .expect_err("rejected token");

    assert!(matches!(err, ApiError::Auth(_)));
    // The feed is untouched on a failed submission.
    assert_eq!(list.len(), len_before);
}

#[tokio::test]
async fn test_add_story_missing_fields_is_validation_error() {
    let ctx = TestContext::new().await;

    let user = User::signup(&ctx.client, "alice", "hunter2", "Alice Liddell")
        .await
        .expect("signup");
    let mut list = StoryList::fetch(&ctx.client).await.expect("fetch");

    let draft = StoryDraft::new("Alice", "", "http://example.com/breaking");
    let err = list
        .add_story(&ctx.client, &user, &draft)
        .await
        .expect_err("empty title");
    assert!(matches!(err, ApiError::Validation(_)));
}
