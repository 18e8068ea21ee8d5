//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context includes an
//! in-memory SQLite database, a mock GitHub API server and a GitHub client configured to
//! use it.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_USER_AGENT, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather
/// than constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new().with_cache_table().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Access the GitHub client
/// let client = &test.github_client;
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// GitHub client configured to use the mock server
    pub github_client: github_api::Client,

    /// Mock HTTP server for GitHub endpoints
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Convert database and GitHub client into any type that can be constructed from them
    ///
    /// This allows conversion to AppState without creating a circular dependency
    /// between the test-utils crate and the main forkcache crate.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let app_state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, github_api::Client)>,
    {
        T::from((self.db.clone(), self.github_client.clone()))
    }
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Arguments
    /// - `token` - Token to configure on the GitHub client, `None` for a client without one
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::GitHubError)` - GitHub client failed to build
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new(token: Option<&str>) -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;

        let mut builder = github_api::Client::builder()
            .api_url(&mock_server.url())
            .user_agent(TEST_USER_AGENT);
        if let Some(token) = token {
            builder = builder.token(token);
        }
        let github_client = builder.build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            server: mock_server,
            db,
            github_client,
            mocks: Vec::new(),
        })
    }

    /// Create database tables from schema statements.
    ///
    /// # Arguments
    /// - `stmts` - Vector of CREATE TABLE statements to execute
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
