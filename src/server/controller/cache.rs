//! Fork cache inspection and eviction endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::api::{CacheEntryDto, ErrorDto},
    server::{
        data::repository_cache::RepositoryCacheRepository,
        error::Error,
        model::{app::AppState, cache::CacheKey},
    },
};

/// OpenAPI tag for cache routes
pub static CACHE_TAG: &str = "cache";

/// Identifies one fork cache entry
#[derive(Deserialize, IntoParams)]
pub struct CacheQuery {
    /// Source repository, `owner/name`
    pub repo_full_name: String,
    /// Target organization, omit for forks into the authenticated account
    #[serde(default)]
    pub org: Option<String>,
}

impl CacheQuery {
    fn key(&self) -> CacheKey {
        CacheKey::new(self.repo_full_name.trim(), self.org.as_deref())
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDto {
            error: "Cache entry not found".to_string(),
        }),
    )
        .into_response()
}

/// Get a cached fork response
#[utoipa::path(
    get,
    path = "/api/cache",
    tag = CACHE_TAG,
    params(CacheQuery),
    responses(
        (status = 200, description = "The cached fork response", body = CacheEntryDto),
        (status = 404, description = "Nothing is cached for the repository and organization", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cache_entry(
    State(state): State<AppState>,
    Query(query): Query<CacheQuery>,
) -> Result<impl IntoResponse, Error> {
    let cache_repo = RepositoryCacheRepository::new(&state.db);

    let Some(entry) = cache_repo.get_entry(&query.key()).await? else {
        return Ok(not_found());
    };

    Ok((StatusCode::OK, Json(CacheEntryDto::from(entry))).into_response())
}

/// Remove a cached fork response
///
/// The next cached fork request for the repository and organization will reach GitHub
/// again.
#[utoipa::path(
    delete,
    path = "/api/cache",
    tag = CACHE_TAG,
    params(CacheQuery),
    responses(
        (status = 204, description = "The cache entry was removed"),
        (status = 404, description = "Nothing is cached for the repository and organization", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_cache_entry(
    State(state): State<AppState>,
    Query(query): Query<CacheQuery>,
) -> Result<impl IntoResponse, Error> {
    let cache_repo = RepositoryCacheRepository::new(&state.db);
    let key = query.key();

    if !cache_repo.delete(&key).await? {
        return Ok(not_found());
    }

    tracing::info!(repo = %key.repo_full_name(), org = ?key.org(), "Cache entry removed");

    Ok(StatusCode::NO_CONTENT.into_response())
}
