//! Tests for ForkService::fork method.
//!
//! This module verifies the cache-first fork policy: cache hits never reach GitHub, misses
//! fork and record the response, organizations are part of the cache key, failures leave
//! the cache untouched, and concurrent requests for one key fork only once.

use super::*;

static REPO_URL: &str = "https://github.com/acme/widget";

/// Tests returning a cached fork without contacting GitHub.
///
/// Expected: Ok with the cached payload and zero requests to the fork endpoint
#[tokio::test]
async fn returns_cached_fork_without_remote_call() -> Result<(), TestError> {
    let cached = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, cached.clone())
        .with_fork_endpoint("acme", "widget", json!({ "id": 2 }), 0)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), cached);

    test.assert_mocks();

    Ok(())
}

/// Tests forking and recording the response on a cache miss.
///
/// Expected: Ok with GitHub's response, which is then stored in the cache
#[tokio::test]
async fn forks_and_caches_on_miss() -> Result<(), TestError> {
    let body = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cache_table()
        .with_fork_endpoint("acme", "widget", body.clone(), 1)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), body);

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let cached = cache_repo.get(&CacheKey::new("acme/widget", None)).await?;
    assert_eq!(cached, Some(body));

    test.assert_mocks();

    Ok(())
}

/// Tests that every accepted reference form for one repository shares a cache entry.
///
/// Expected: Ok for all forms with a single request to GitHub
#[tokio::test]
async fn reference_forms_share_cache_entry() -> Result<(), TestError> {
    let body = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cache_table()
        .with_fork_endpoint("acme", "widget", body.clone(), 1)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);

    for reference in [
        "https://github.com/acme/widget",
        "http://github.com/acme/widget.git/",
        "git@github.com:acme/widget.git",
    ] {
        let result = fork_service.fork(reference, None, true).await;
        assert_eq!(result.unwrap(), body);
    }

    test.assert_mocks();

    Ok(())
}

/// Tests that a fork into an organization doesn't use the user fork's cache entry.
///
/// Expected: Ok with a fresh response, stored next to the existing entry
#[tokio::test]
async fn organization_is_part_of_cache_key() -> Result<(), TestError> {
    let user_fork = factory::mock_fork_response("acme", "widget", "octocat");
    let org_fork = factory::mock_fork_response("acme", "widget", "org1");
    let mut test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, user_fork.clone())
        .with_fork_endpoint("acme", "widget", org_fork.clone(), 1)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, Some("org1"), true).await;

    assert_eq!(result.unwrap(), org_fork);

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    assert_eq!(
        cache_repo.get(&CacheKey::new("acme/widget", None)).await?,
        Some(user_fork)
    );
    assert_eq!(test.cache().all_entries().await?.len(), 2);

    test.assert_mocks();

    Ok(())
}

/// Tests that a blank organization is treated as no organization.
///
/// Expected: Ok with the user fork's cached payload and zero requests
#[tokio::test]
async fn blank_organization_uses_user_fork_entry() -> Result<(), TestError> {
    let cached = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, cached.clone())
        .with_fork_endpoint("acme", "widget", json!({}), 0)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, Some("   "), true).await;

    assert_eq!(result.unwrap(), cached);

    test.assert_mocks();

    Ok(())
}

/// Tests that disabling the cache always forks and leaves the cache as it was.
///
/// Expected: Ok with GitHub's response while the cached payload is unchanged
#[tokio::test]
async fn bypasses_cache_when_disabled() -> Result<(), TestError> {
    let cached = json!({ "id": 1 });
    let fresh = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, cached.clone())
        .with_fork_endpoint("acme", "widget", fresh.clone(), 1)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, false).await;

    assert_eq!(result.unwrap(), fresh);

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    assert_eq!(
        cache_repo.get(&CacheKey::new("acme/widget", None)).await?,
        Some(cached)
    );

    test.assert_mocks();

    Ok(())
}

/// Tests that an unparseable reference fails before any remote call.
///
/// Expected: Err(Error::InvalidReference) with zero requests
#[tokio::test]
async fn fails_for_invalid_reference() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cache_table()
        .with_fork_endpoint("acme", "widget", json!({}), 0)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service
        .fork("https://gitlab.com/acme/widget", None, true)
        .await;

    assert!(matches!(result, Err(Error::InvalidReference(_))));

    test.assert_mocks();

    Ok(())
}

/// Tests mapping a GitHub error response.
///
/// Expected: Err(RemoteRejected) with status 422 and GitHub's message; nothing cached
#[tokio::test]
async fn maps_rejection_and_skips_cache() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_cache_table()
        .with_fork_error_endpoint("acme", "widget", 422, "already forked", 1)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    match result {
        Err(Error::GitHubError(github_api::Error::RemoteRejected { status, message })) => {
            assert_eq!(status, 422);
            assert_eq!(message, "already forked");
        }
        other => panic!("expected RemoteRejected, got {:?}", other),
    }
    assert!(test.cache().all_entries().await?.is_empty());

    test.assert_mocks();

    Ok(())
}

/// Tests that a cache miss without a configured token fails.
///
/// Expected: Err(MissingCredential) with zero requests
#[tokio::test]
async fn fails_without_token_on_miss() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .without_token()
        .with_cache_table()
        .with_fork_endpoint("acme", "widget", json!({}), 0)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    assert!(matches!(
        result,
        Err(Error::GitHubError(github_api::Error::MissingCredential))
    ));

    test.assert_mocks();

    Ok(())
}

/// Tests that a cache hit needs no token.
///
/// Expected: Ok with the cached payload
#[tokio::test]
async fn serves_cache_hit_without_token() -> Result<(), TestError> {
    let cached = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .without_token()
        .with_cached_fork("acme/widget", None, cached.clone())
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    assert_eq!(result.unwrap(), cached);

    Ok(())
}

/// Tests concurrent cached forks for one uncached key.
///
/// Verifies that the fork guard lets only the first request reach GitHub while the second
/// waits and is answered from the cache.
///
/// Expected: Ok for both with the same payload and exactly one request
#[tokio::test]
async fn concurrent_forks_for_same_key_fork_once() -> Result<(), TestError> {
    let body = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cache_table()
        .with_fork_endpoint("acme", "widget", body.clone(), 1)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);

    let (first, second) = tokio::join!(
        fork_service.fork(REPO_URL, None, true),
        fork_service.fork("git@github.com:acme/widget.git", None, true),
    );

    assert_eq!(first.unwrap(), body);
    assert_eq!(second.unwrap(), body);
    assert_eq!(guard.active_keys(), 0);

    test.assert_mocks();

    Ok(())
}

/// Tests that uncached forks are not serialized.
///
/// Expected: Ok for both with one request each
#[tokio::test]
async fn concurrent_uncached_forks_each_reach_github() -> Result<(), TestError> {
    let body = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cache_table()
        .with_fork_endpoint("acme", "widget", body.clone(), 2)
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);

    let (first, second) = tokio::join!(
        fork_service.fork(REPO_URL, None, false),
        fork_service.fork(REPO_URL, None, false),
    );

    assert_eq!(first.unwrap(), body);
    assert_eq!(second.unwrap(), body);

    test.assert_mocks();

    Ok(())
}

/// Tests error handling when the cache table is missing.
///
/// Expected: Err(Error::DbErr)
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    assert!(matches!(result, Err(Error::DbErr(_))));

    Ok(())
}

/// Tests that a redirect from the fork endpoint is not followed.
///
/// Expected: Ok with the redirect's own body and no request to the redirect target
#[tokio::test]
async fn does_not_follow_redirect() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cache_table()
        .with_mock_endpoint(|server| {
            let location = format!("{}/repos/acme/renamed/forks", server.url());
            server
                .mock("POST", "/repos/acme/widget/forks")
                .with_status(301)
                .with_header("location", &location)
                .with_body(r#"{"message": "Moved Permanently"}"#)
                .expect(1)
                .create()
        })
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/repos/acme/renamed/forks")
                .with_status(200)
                .with_body("[]")
                .expect(0)
                .create()
        })
        .build()
        .await?;

    let guard = ForkGuard::default();
    let fork_service = ForkService::new(&test.db, &test.github_client, &guard);
    let result = fork_service.fork(REPO_URL, None, true).await;

    assert_eq!(result.unwrap(), json!({ "message": "Moved Permanently" }));

    test.assert_mocks();

    Ok(())
}
