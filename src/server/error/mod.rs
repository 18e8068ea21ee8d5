//! Error types for the forkcache server.
//!
//! This module provides the server's error type. Expected outcomes of a fork or delete
//! request (a reference that can't be parsed, a missing token, GitHub rejecting the call or
//! being unreachable) are distinct variants the caller can inspect. All errors implement
//! `IntoResponse` for Axum HTTP responses and use `thiserror` for their definitions.

pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::error::config::ConfigError};

/// Main error type for the forkcache server.
///
/// # Error Categories
/// - Input errors (repository reference that can't be parsed), never reach GitHub
/// - GitHub errors (missing token, rejected request, unreachable API), never retried
/// - Configuration errors (invalid environment variables)
/// - Storage and I/O errors (database queries, SQLite directory creation)
#[derive(Error, Debug)]
pub enum Error {
    /// The repository reference is not a recognized GitHub URL.
    #[error("Invalid GitHub repository URL: {0:?}")]
    InvalidReference(String),
    /// Configuration error (invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// GitHub client error (missing token, error status, timeout or transport failure).
    #[error(transparent)]
    GitHubError(#[from] github_api::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// I/O error (binding the listener, creating the SQLite directory).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For repository references that can't be parsed
/// - 502 Bad Gateway - For any failure talking to GitHub, with the error message
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidReference(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            Self::GitHubError(err) => {
                tracing::error!("GitHub request failed: {}", err);

                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
            Self::ConfigError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
