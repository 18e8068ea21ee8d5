//! GitHub HTTP mock endpoint creation utilities.
//!
//! This module provides methods for creating mock HTTP endpoints that simulate
//! GitHub REST API responses. These endpoints are registered with the mockito server
//! and can verify they were called the expected number of times.

use mockito::Mock;
use serde_json::Value;

use crate::fixtures::github::{factory, GitHubFixtures};

impl<'a> GitHubFixtures<'a> {
    /// Create a mock HTTP endpoint for fork creation.
    ///
    /// Sets up a mock `POST /repos/{owner}/{repo}/forks` that answers `202 Accepted` with
    /// `body`. The mock verifies it was called exactly `expected_requests` times.
    ///
    /// # Arguments
    /// - `owner` - Owner of the source repository
    /// - `repo` - Name of the source repository
    /// - `body` - JSON body to return
    /// - `expected_requests` - Number of times this endpoint should be called
    ///
    /// # Returns
    /// - `Mock` - The created mock endpoint that will be automatically verified
    pub fn create_fork_endpoint(
        &mut self,
        owner: &str,
        repo: &str,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/repos/{}/{}/forks", owner, repo);

        self.setup
            .server
            .mock("POST", url.as_str())
            .with_status(202)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint for a rejected fork.
    ///
    /// Sets up a mock `POST /repos/{owner}/{repo}/forks` that answers `status` with a
    /// GitHub error body carrying `message`.
    pub fn create_fork_error_endpoint(
        &mut self,
        owner: &str,
        repo: &str,
        status: usize,
        message: &str,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/repos/{}/{}/forks", owner, repo);

        self.setup
            .server
            .mock("POST", url.as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(factory::mock_error_response(message).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint for repository deletion.
    ///
    /// Sets up a mock `DELETE /repos/{owner}/{repo}` that answers `status` with no body.
    pub fn create_delete_endpoint(
        &mut self,
        owner: &str,
        repo: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/repos/{}/{}", owner, repo);

        self.setup
            .server
            .mock("DELETE", url.as_str())
            .with_status(status)
            .expect(expected_requests)
            .create()
    }
}
