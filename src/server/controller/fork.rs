//! Fork and repository deletion endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use github_api::model::DeleteOutcome;

use crate::{
    model::api::{DeleteForkResponseDto, ErrorDto, ForkRequestDto, ForkResponseDto},
    server::{error::Error, model::app::AppState, service::fork::ForkService},
};

/// OpenAPI tag for fork routes
pub static FORK_TAG: &str = "fork";

/// Fork a GitHub repository
///
/// Forks the repository `repo_url` points at into `org`, or into the account owning the
/// configured token. Unless `use_cache` is `false`, a fork already recorded for the same
/// repository and organization is returned without contacting GitHub.
#[utoipa::path(
    post,
    path = "/api/forks",
    tag = FORK_TAG,
    request_body = ForkRequestDto,
    responses(
        (status = 200, description = "GitHub's fork response, fresh or cached", body = ForkResponseDto),
        (status = 400, description = "The repository URL is not a GitHub repository", body = ErrorDto),
        (status = 502, description = "GitHub rejected the request, was unreachable, or no token is configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_fork(
    State(state): State<AppState>,
    Json(request): Json<ForkRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let fork_service = ForkService::new(&state.db, &state.github_client, &state.fork_guard);

    let data = fork_service
        .fork(&request.repo_url, request.org.as_deref(), request.use_cache)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ForkResponseDto {
            status: "ok".to_string(),
            data,
        }),
    ))
}

/// Delete a GitHub repository
///
/// Deletes `owner/repo`, typically a fork created earlier. The fork cache is left as is.
#[utoipa::path(
    delete,
    path = "/api/forks/{owner}/{repo}",
    tag = FORK_TAG,
    params(
        ("owner" = String, Path, description = "Owner of the repository to delete"),
        ("repo" = String, Path, description = "Name of the repository to delete"),
    ),
    responses(
        (status = 204, description = "GitHub confirmed the deletion"),
        (status = 202, description = "GitHub answered an unexpected status, the deletion is unconfirmed", body = DeleteForkResponseDto),
        (status = 502, description = "GitHub rejected the request, was unreachable, or no token is configured", body = ErrorDto),
    ),
)]
pub async fn delete_fork(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<impl IntoResponse, Error> {
    let fork_service = ForkService::new(&state.db, &state.github_client, &state.fork_guard);

    match fork_service.delete_fork(&owner, &repo).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT.into_response()),
        DeleteOutcome::Unconfirmed { status } => Ok((
            StatusCode::ACCEPTED,
            Json(DeleteForkResponseDto {
                status: "unconfirmed".to_string(),
                remote_status: status,
            }),
        )
            .into_response()),
    }
}
