use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Request to fork a GitHub repository
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ForkRequestDto {
    /// Repository reference, e.g. `https://github.com/acme/widget` or
    /// `git@github.com:acme/widget.git`
    pub repo_url: String,
    /// Organization to fork into, omit to fork into the authenticated account
    #[serde(default)]
    pub org: Option<String>,
    /// Whether to answer from and record into the fork cache
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

/// The response for a successful fork request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ForkResponseDto {
    pub status: String,
    /// GitHub's fork response, possibly served from cache
    #[schema(value_type = Object)]
    pub data: Value,
}

/// The response when GitHub answered a deletion with an unexpected non-error status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteForkResponseDto {
    pub status: String,
    /// The status code GitHub answered with
    pub remote_status: u16,
}

/// A cached fork response
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct CacheEntryDto {
    pub repo_full_name: String,
    pub org: Option<String>,
    #[schema(value_type = Object)]
    pub payload: Value,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthDto {
    pub status: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageDto {
    pub message: String,
}
