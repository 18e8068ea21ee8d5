//! Shared application state.

use sea_orm::DatabaseConnection;

use crate::server::service::single_flight::ForkGuard;

/// State shared by every HTTP handler.
///
/// Constructed once at startup; clones share the same connection pool, GitHub client
/// and fork guard.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool backing the fork cache.
    pub db: DatabaseConnection,
    /// GitHub REST client.
    pub github_client: github_api::Client,
    /// Per-key serialization of cached fork requests.
    pub fork_guard: ForkGuard,
}

impl AppState {
    /// Creates application state with a fresh fork guard.
    pub fn new(db: DatabaseConnection, github_client: github_api::Client) -> Self {
        Self {
            db,
            github_client,
            fork_guard: ForkGuard::default(),
        }
    }
}

impl From<(DatabaseConnection, github_api::Client)> for AppState {
    fn from((db, github_client): (DatabaseConnection, github_api::Client)) -> Self {
        Self::new(db, github_client)
    }
}
