use super::*;

/// Expect Some when a payload is cached for the key
#[tokio::test]
async fn returns_cached_payload() -> Result<(), TestError> {
    let payload = factory::mock_fork_response("acme", "widget", "octocat");
    let test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, payload.clone())
        .build()
        .await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let result = cache_repo.get(&CacheKey::new("acme/widget", None)).await?;

    assert_eq!(result, Some(payload));

    Ok(())
}

/// Expect None when nothing is cached for the key
#[tokio::test]
async fn returns_none_when_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_cache_table().build().await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let result = cache_repo.get(&CacheKey::new("acme/widget", None)).await?;

    assert!(result.is_none());

    Ok(())
}

/// Expect the organization to select between entries of the same repository
#[tokio::test]
async fn distinguishes_organizations() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, json!({ "owner": "octocat" }))
        .with_cached_fork("acme/widget", Some("org1"), json!({ "owner": "org1" }))
        .build()
        .await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);

    let user_fork = cache_repo.get(&CacheKey::new("acme/widget", None)).await?;
    let org_fork = cache_repo
        .get(&CacheKey::new("acme/widget", Some("org1")))
        .await?;
    let other_org = cache_repo
        .get(&CacheKey::new("acme/widget", Some("org2")))
        .await?;

    assert_eq!(user_fork, Some(json!({ "owner": "octocat" })));
    assert_eq!(org_fork, Some(json!({ "owner": "org1" })));
    assert!(other_org.is_none());

    Ok(())
}

/// Expect a blank organization to find the entry stored without one
#[tokio::test]
async fn treats_blank_organization_as_none() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_cached_fork("acme/widget", None, json!({ "id": 1 }))
        .build()
        .await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let result = cache_repo.get(&CacheKey::new("acme/widget", Some(""))).await?;

    assert_eq!(result, Some(json!({ "id": 1 })));

    Ok(())
}

/// Expect the entry's timestamps alongside the payload
#[tokio::test]
async fn returns_entry_with_timestamps() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_cache_table().build().await?;
    let row = test
        .cache()
        .insert_cached_fork("acme/widget", Some("org1"), &json!({ "id": 1 }))
        .await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let entry = cache_repo
        .get_entry(&CacheKey::new("acme/widget", Some("org1")))
        .await?;

    assert!(entry.is_some());
    let entry = entry.unwrap();
    assert_eq!(entry.key, CacheKey::new("acme/widget", Some("org1")));
    assert_eq!(entry.payload, json!({ "id": 1 }));
    assert_eq!(entry.created_at, row.created_at);
    assert_eq!(entry.updated_at, row.updated_at);

    Ok(())
}

/// Expect Error when the stored payload is not valid JSON
#[tokio::test]
async fn fails_for_corrupt_payload() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_cache_table().build().await?;
    test.cache().insert_corrupt_entry("acme/widget").await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let result = cache_repo.get(&CacheKey::new("acme/widget", None)).await;

    assert!(result.is_err());

    Ok(())
}

/// Expect Error when required database tables haven't been created
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let cache_repo = RepositoryCacheRepository::new(&test.db);
    let result = cache_repo.get(&CacheKey::new("acme/widget", None)).await;

    assert!(result.is_err());

    Ok(())
}
