//! Request and outcome types for the GitHub repository endpoints.

use serde::Serialize;

/// Placeholder `message` used when a successful response body is not JSON.
pub const NON_JSON_RESPONSE: &str = "<non-json-response>";

/// Placeholder used when an error body is JSON but carries no `message` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Body of `POST /repos/{owner}/{repo}/forks` when forking into an organization.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateForkRequest<'a> {
    pub organization: &'a str,
}

/// Result of `DELETE /repos/{owner}/{repo}` that GitHub did not reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// GitHub answered `204 No Content`, the repository is gone.
    Deleted,
    /// GitHub answered a non-error status other than 204. The deletion may or may not
    /// have happened.
    Unconfirmed { status: u16 },
}

impl DeleteOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}
