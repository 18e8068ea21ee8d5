//! GitHub response body factories.

use serde_json::{json, Value};

/// Create a mock fork creation response.
///
/// Returns the subset of GitHub's repository object that fork responses carry and tests
/// look at.
///
/// # Arguments
/// - `owner` - Owner of the source repository
/// - `repo` - Name of the source repository
/// - `fork_owner` - Account or organization the fork was created under
///
/// # Returns
/// - `Value` - A fork response body with test data
pub fn mock_fork_response(owner: &str, repo: &str, fork_owner: &str) -> Value {
    json!({
        "id": 1296269,
        "name": repo,
        "full_name": format!("{}/{}", fork_owner, repo),
        "fork": true,
        "html_url": format!("https://github.com/{}/{}", fork_owner, repo),
        "owner": {
            "login": fork_owner,
            "type": "User"
        },
        "parent": {
            "full_name": format!("{}/{}", owner, repo)
        },
        "source": {
            "full_name": format!("{}/{}", owner, repo)
        }
    })
}

/// Create a GitHub style error body.
pub fn mock_error_response(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest/repos/forks#create-a-fork"
    })
}
