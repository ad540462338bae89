//! Favorite/unfavorite semantics, including the optimistic no-rollback
//! behavior under injected service failures.

use paperboy_client::{ApiError, User};
use paperboy_integration_tests::TestContext;

async fn signed_up_user(ctx: &TestContext) -> User {
    User::signup(&ctx.client, "alice", "hunter2", "Alice Liddell")
        .await
        .expect("signup")
}

#[tokio::test]
async fn test_add_favorite_updates_local_and_remote() {
    let ctx = TestContext::new().await;
    let story = ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");
    let mut user = signed_up_user(&ctx).await;

    user.add_favorite(&ctx.client, &story)
        .await
        .expect("favorite");

    assert!(user.is_favorite(&story));
    assert_eq!(ctx.server_favorites("alice"), vec!["a1".to_string()]);
}

#[tokio::test]
async fn test_add_then_remove_leaves_no_entry() {
    let ctx = TestContext::new().await;
    let story = ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");
    let mut user = signed_up_user(&ctx).await;

    user.add_favorite(&ctx.client, &story)
        .await
        .expect("favorite");
    user.remove_favorite(&ctx.client, &story)
        .await
        .expect("unfavorite");

    assert!(!user.is_favorite(&story));
    assert!(ctx.server_favorites("alice").is_empty());
}

#[tokio::test]
async fn test_add_then_remove_nets_out_even_when_remote_fails() {
    let ctx = TestContext::new().await;
    let story = ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");
    let mut user = signed_up_user(&ctx).await;

    ctx.fail_favorites(500);

    // Both calls fail remotely, both local mutations still happen: the
    // pair nets out to "not a favorite".
    user.add_favorite(&ctx.client, &story)
        .await
        .expect_err("injected failure");
    user.remove_favorite(&ctx.client, &story)
        .await
        .expect_err("injected failure");

    assert!(!user.is_favorite(&story));
}

#[tokio::test]
async fn test_add_favorite_is_not_rolled_back_on_failure() {
    let ctx = TestContext::new().await;
    let story = ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");
    let mut user = signed_up_user(&ctx).await;

    ctx.fail_favorites(500);

    let err = user
        .add_favorite(&ctx.client, &story)
        .await
        .expect_err("injected failure");

    // The error surfaces, but the local append stays.
    assert!(matches!(err, ApiError::Service { status, .. } if status.as_u16() == 500));
    assert!(user.is_favorite(&story));
    assert!(ctx.server_favorites("alice").is_empty());
}

#[tokio::test]
async fn test_duplicate_adds_are_not_deduped_locally() {
    let ctx = TestContext::new().await;
    let story = ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");
    let mut user = signed_up_user(&ctx).await;

    user.add_favorite(&ctx.client, &story)
        .await
        .expect("favorite");
    user.add_favorite(&ctx.client, &story)
        .await
        .expect("favorite again");

    // No local dedup guard; the service stores one marking.
    assert_eq!(user.favorites.len(), 2);
    assert_eq!(ctx.server_favorites("alice").len(), 1);
}

#[tokio::test]
async fn test_remove_favorite_drops_every_match() {
    let ctx = TestContext::new().await;
    let story = ctx.seed_story("a1", "Ada", "On engines", "http://example.com/engines", "ada");
    let mut user = signed_up_user(&ctx).await;

    user.add_favorite(&ctx.client, &story)
        .await
        .expect("favorite");
    user.add_favorite(&ctx.client, &story)
        .await
        .expect("favorite again");
    assert_eq!(user.favorites.len(), 2);

    user.remove_favorite(&ctx.client, &story)
        .await
        .expect("unfavorite");
    assert!(user.favorites.is_empty());
}
