//! Test configuration constants for GitHub client setup.
//!
//! These values are not real credentials but placeholder values for testing purposes.

/// User agent string for test GitHub client requests.
pub static TEST_USER_AGENT: &str = "forkcache-tests/1.0 (+https://github.com/forkcache/forkcache)";

/// Placeholder personal access token sent as the bearer credential to the mock server.
pub static TEST_TOKEN: &str = "ghp_test_token";
