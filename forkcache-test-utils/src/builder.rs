//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use mockito::Mock;
use sea_orm::Schema;
use serde_json::Value;

use crate::{constant::TEST_TOKEN, error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// cached forks, and mock GitHub endpoints. Methods can be chained together and finalized
/// with `build()` to create a complete test setup.
pub struct TestBuilder {
    // Tables to create
    include_cache_table: bool,

    // Database fixtures to insert
    cached_forks: Vec<(String, Option<String>, Value)>, // (repo_full_name, org, payload)

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    fork_endpoints: Vec<(String, String, Value, usize)>, // (owner, repo, body, expected_requests)
    fork_error_endpoints: Vec<(String, String, usize, String, usize)>, // (owner, repo, status, message, expected_requests)
    delete_endpoints: Vec<(String, String, usize, usize)>, // (owner, repo, status, expected_requests)

    token: Option<String>,
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables, fixtures, or mock endpoints configured.
    /// The GitHub client gets the test token unless [`without_token`](Self::without_token)
    /// is called.
    pub fn new() -> Self {
        Self {
            include_cache_table: false,
            cached_forks: Vec::new(),
            mock_builders: Vec::new(),
            fork_endpoints: Vec::new(),
            fork_error_endpoints: Vec::new(),
            delete_endpoints: Vec::new(),
            token: Some(TEST_TOKEN.to_string()),
        }
    }

    /// Add the repository cache table to the test database.
    pub fn with_cache_table(mut self) -> Self {
        self.include_cache_table = true;
        self
    }

    /// Insert a cached fork response into the database.
    ///
    /// Creates the cache table if it hasn't been requested yet. The row is written directly,
    /// bypassing the repository and its org normalization.
    ///
    /// # Arguments
    /// - `repo_full_name` - Source repository, `owner/name`
    /// - `org` - Target organization, `None` for the authenticated account
    /// - `payload` - Fork response to cache
    pub fn with_cached_fork(
        mut self,
        repo_full_name: &str,
        org: Option<&str>,
        payload: Value,
    ) -> Self {
        self.include_cache_table = true;
        self.cached_forks.push((
            repo_full_name.to_string(),
            org.map(str::to_string),
            payload,
        ));
        self
    }

    /// Add a custom mock endpoint to the test server.
    ///
    /// # Arguments
    /// - `builder` - Closure receiving the mock server and returning the created mock
    ///
    /// # Example
    ///
    /// ```ignore
    /// let test = TestBuilder::new()
    ///     .with_mock_endpoint(|server| {
    ///         server
    ///             .mock("POST", "/repos/acme/widget/forks")
    ///             .with_status(500)
    ///             .expect(1)
    ///             .create()
    ///     })
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_mock_endpoint<F>(mut self, builder: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(builder));
        self
    }

    /// Add a successful fork endpoint to the test server.
    ///
    /// Creates a mock `POST /repos/{owner}/{repo}/forks` answering `202 Accepted` with
    /// `body`. The mock will verify it was called exactly `expected_requests` times.
    pub fn with_fork_endpoint(
        mut self,
        owner: &str,
        repo: &str,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.fork_endpoints
            .push((owner.to_string(), repo.to_string(), body, expected_requests));
        self
    }

    /// Add a failing fork endpoint to the test server.
    ///
    /// Creates a mock `POST /repos/{owner}/{repo}/forks` answering `status` with a GitHub
    /// style `{"message": ...}` error body.
    pub fn with_fork_error_endpoint(
        mut self,
        owner: &str,
        repo: &str,
        status: usize,
        message: &str,
        expected_requests: usize,
    ) -> Self {
        self.fork_error_endpoints.push((
            owner.to_string(),
            repo.to_string(),
            status,
            message.to_string(),
            expected_requests,
        ));
        self
    }

    /// Add a repository delete endpoint to the test server.
    ///
    /// Creates a mock `DELETE /repos/{owner}/{repo}` answering `status` with no body.
    pub fn with_delete_endpoint(
        mut self,
        owner: &str,
        repo: &str,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.delete_endpoints
            .push((owner.to_string(), repo.to_string(), status, expected_requests));
        self
    }

    /// Build the GitHub client without an access token.
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    /// Build the test context.
    ///
    /// Executes all queued operations in order:
    /// 1. Create database tables
    /// 2. Insert cached forks
    /// 3. Create mock endpoints
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test context
    /// - `Err(TestError)` - Client, table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new(self.token.as_deref()).await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_cache_table {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.push(schema.create_table_from_entity(entity::prelude::RepositoryCache));
        }

        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (repo_full_name, org, payload) in self.cached_forks {
            setup
                .cache()
                .insert_cached_fork(&repo_full_name, org.as_deref(), &payload)
                .await?;
        }

        // 3. Create mock endpoints
        // Note: Custom endpoints are created first to allow proper sequential mockito matching
        // when tests need to create multiple mocks for the same path (e.g., error then success)
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (owner, repo, body, expected) in self.fork_endpoints {
            mocks.push(
                setup
                    .github()
                    .create_fork_endpoint(&owner, &repo, &body, expected),
            );
        }

        for (owner, repo, status, message, expected) in self.fork_error_endpoints {
            mocks.push(
                setup
                    .github()
                    .create_fork_error_endpoint(&owner, &repo, status, &message, expected),
            );
        }

        for (owner, repo, status, expected) in self.delete_endpoints {
            mocks.push(
                setup
                    .github()
                    .create_delete_endpoint(&owner, &repo, status, expected),
            );
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
