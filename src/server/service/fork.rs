//! Cache-first fork and repository deletion.

use github_api::model::DeleteOutcome;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    data::repository_cache::RepositoryCacheRepository,
    error::Error,
    model::cache::CacheKey,
    service::single_flight::ForkGuard,
    util::repository::RepositoryIdentifier,
};

/// Forks and deletes GitHub repositories, answering repeated forks from the cache.
pub struct ForkService<'a> {
    db: &'a DatabaseConnection,
    github_client: &'a github_api::Client,
    fork_guard: &'a ForkGuard,
}

impl<'a> ForkService<'a> {
    /// Creates a new instance of [`ForkService`]
    pub fn new(
        db: &'a DatabaseConnection,
        github_client: &'a github_api::Client,
        fork_guard: &'a ForkGuard,
    ) -> Self {
        Self {
            db,
            github_client,
            fork_guard,
        }
    }

    /// Forks the repository `reference` points at into `org`, or the authenticated account
    ///
    /// With `use_cache`, a fork already recorded for the same repository and organization
    /// is returned as-is without contacting GitHub, even if the fork has since been deleted
    /// or changed remotely. The cache records fork attempts, it doesn't mirror GitHub.
    /// Concurrent cached requests for the same key are serialized by the fork guard, so only
    /// the first reaches GitHub. A successful fork is written to the cache afterwards; a
    /// failed one leaves the cache untouched.
    ///
    /// Without `use_cache` the cache is neither read nor written and GitHub is always called.
    ///
    /// # Returns
    /// - `Ok(Value)` - GitHub's fork response, fresh or cached
    /// - `Err(Error::InvalidReference)` - `reference` isn't a GitHub repository URL
    /// - `Err(Error::GitHubError)` - Missing token, rejection or unreachable API
    /// - `Err(Error::DbErr)` - The cache couldn't be read or written
    pub async fn fork(
        &self,
        reference: &str,
        org: Option<&str>,
        use_cache: bool,
    ) -> Result<Value, Error> {
        tracing::info!(reference, org = ?org, use_cache, "Fork request");

        let Some(repository) = RepositoryIdentifier::parse(reference) else {
            return Err(Error::InvalidReference(reference.trim().to_string()));
        };
        let key = CacheKey::new(repository.full_name(), org);

        tracing::debug!(owner = %repository.owner, repo = %repository.name, "Parsed repository");

        if !use_cache {
            return self.create_fork(&repository, &key).await;
        }

        let _lock = self.fork_guard.lock(&key).await;
        let cache_repo = RepositoryCacheRepository::new(self.db);

        if let Some(cached) = cache_repo.get(&key).await? {
            tracing::info!(repo = %key.repo_full_name(), org = ?key.org(), "Cache hit");

            return Ok(cached);
        }

        let body = self.create_fork(&repository, &key).await?;
        cache_repo.upsert(&key, &body).await?;

        Ok(body)
    }

    /// Deletes the repository `owner/repo`, typically a fork created earlier
    ///
    /// The cache is not touched: a later cached fork request for the source repository
    /// still returns the response recorded before the deletion. Remove the cache entry
    /// explicitly to fork again.
    ///
    /// # Returns
    /// - `Ok(DeleteOutcome::Deleted)` - GitHub confirmed the deletion
    /// - `Ok(DeleteOutcome::Unconfirmed)` - GitHub answered an unexpected non-error status,
    ///   the outcome is unknown
    /// - `Err(Error::GitHubError)` - Missing token, rejection or unreachable API
    pub async fn delete_fork(&self, owner: &str, repo: &str) -> Result<DeleteOutcome, Error> {
        tracing::info!(owner, repo, "Delete repository request");

        let outcome = self.github_client.delete_repository(owner, repo).await?;

        Ok(outcome)
    }

    async fn create_fork(
        &self,
        repository: &RepositoryIdentifier,
        key: &CacheKey,
    ) -> Result<Value, Error> {
        let body = self
            .github_client
            .create_fork(&repository.owner, &repository.name, key.org())
            .await?;

        Ok(body)
    }
}
