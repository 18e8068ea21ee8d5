use thiserror::Error;

/// Errors returned by the GitHub client.
#[derive(Error, Debug)]
pub enum Error {
    /// No access token was configured on the client.
    #[error("GitHub access token is not configured, set GITHUB_PAT")]
    MissingCredential,
    /// GitHub answered with a status code of 400 or above.
    #[error("GitHub API error {status}: {message}")]
    RemoteRejected { status: u16, message: String },
    /// The request timed out or failed at the transport level.
    #[error("Failed to reach the GitHub API: {0}")]
    RemoteUnreachable(#[source] reqwest::Error),
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build GitHub HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl Error {
    /// Status code of a rejected request, if GitHub answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
