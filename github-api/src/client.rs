use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Response, StatusCode,
};
use serde_json::{json, Value};

use crate::{
    error::Error,
    model::{CreateForkRequest, DeleteOutcome, NON_JSON_RESPONSE, UNKNOWN_ERROR},
};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// User agent sent when the builder is not given one.
pub const DEFAULT_USER_AGENT: &str = concat!("forkcache/", env!("CARGO_PKG_VERSION"));

/// Upper bound on a single request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// GitHub REST client.
///
/// Cheap to clone, clones share the same connection pool. Requests are never retried;
/// a timeout or transport failure is returned as [`Error::RemoteUnreachable`]. Redirects
/// are not followed, a 3xx answer is interpreted like any other status.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

// Keeps the token out of logs
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.api_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    api_url: String,
    user_agent: String,
    token: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API base URL, used to point the client at a mock server.
    pub fn api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Sets the personal access token. A blank token is treated as no token.
    pub fn token(mut self, token: &str) -> Self {
        let token = token.trim();
        self.token = (!token.is_empty()).then(|| token.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .default_headers(headers)
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(Error::Build)?;

        Ok(Client {
            http,
            api_url: self.api_url,
            token: self.token,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn bearer_token(&self) -> Result<&str, Error> {
        self.token.as_deref().ok_or(Error::MissingCredential)
    }

    /// Forks `owner/repo` into the authenticated account, or into `organization` if given.
    ///
    /// GitHub answers `202 Accepted` with the fork's repository object while the copy is
    /// created in the background. On success the response body is returned as JSON; a body
    /// that is not valid JSON becomes `{"message": "<non-json-response>"}`.
    ///
    /// # Errors
    /// - [`Error::MissingCredential`] before any request is sent if no token is configured
    /// - [`Error::RemoteRejected`] for any status of 400 or above
    /// - [`Error::RemoteUnreachable`] on timeout or transport failure
    pub async fn create_fork(
        &self,
        owner: &str,
        repo: &str,
        organization: Option<&str>,
    ) -> Result<Value, Error> {
        let token = self.bearer_token()?;
        let url = format!("{}/repos/{}/{}/forks", self.api_url, owner, repo);

        tracing::debug!(url = %url, organization = ?organization, "POST fork");

        let mut request = self.http.post(&url).bearer_auth(token);
        if let Some(organization) = organization {
            request = request.json(&CreateForkRequest { organization });
        }

        let response = request.send().await.map_err(Error::RemoteUnreachable)?;
        let status = response.status();

        tracing::info!(status = status.as_u16(), "GitHub fork response");

        if is_error(status) {
            return Err(rejection(status, response).await);
        }

        let text = response.text().await.map_err(Error::RemoteUnreachable)?;

        tracing::debug!("GitHub fork body received");

        Ok(success_body(&text))
    }

    /// Deletes `owner/repo`.
    ///
    /// `204 No Content` is the only response treated as a confirmed deletion. Any other
    /// status below 400 is logged and returned as [`DeleteOutcome::Unconfirmed`].
    pub async fn delete_repository(&self, owner: &str, repo: &str) -> Result<DeleteOutcome, Error> {
        let token = self.bearer_token()?;
        let url = format!("{}/repos/{}/{}", self.api_url, owner, repo);

        tracing::debug!(url = %url, "DELETE repository");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(Error::RemoteUnreachable)?;
        let status = response.status();

        tracing::info!(status = status.as_u16(), "GitHub delete response");

        if status == StatusCode::NO_CONTENT {
            tracing::info!(owner, repo, "Repository deleted");
            return Ok(DeleteOutcome::Deleted);
        }

        if is_error(status) {
            return Err(rejection(status, response).await);
        }

        tracing::warn!(
            owner,
            repo,
            status = status.as_u16(),
            "Unexpected status code for repository deletion"
        );

        Ok(DeleteOutcome::Unconfirmed {
            status: status.as_u16(),
        })
    }
}

fn is_error(status: StatusCode) -> bool {
    status.as_u16() >= 400
}

async fn rejection(status: StatusCode, response: Response) -> Error {
    // A body that can't be read still yields a rejection, just with an empty message source
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                status = status.as_u16(),
                error = %e,
                "Failed to read GitHub error body"
            );
            String::new()
        }
    };
    let message = error_message(&text);

    tracing::error!(status = status.as_u16(), message = %message, "GitHub API error");

    Error::RemoteRejected {
        status: status.as_u16(),
        message,
    }
}

/// Best-effort `message` of an error body; raw text when the body is not JSON.
fn error_message(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR)
            .to_string(),
        Err(_) => text.to_string(),
    }
}

fn success_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": NON_JSON_RESPONSE }))
}
