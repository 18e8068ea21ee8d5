//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /` - Welcome message
/// - `GET /health` - Liveness check
/// - `POST /api/forks` - Fork a repository, answering from the cache when possible
/// - `DELETE /api/forks/{owner}/{repo}` - Delete a repository
/// - `GET /api/cache` - Get a cached fork response
/// - `DELETE /api/cache` - Remove a cached fork response
///
/// The OpenAPI specification is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState::new(db, github_client));
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "forkcache", description = "GitHub fork cache API"), tags(
        (name = controller::fork::FORK_TAG, description = "Fork and delete repositories"),
        (name = controller::cache::CACHE_TAG, description = "Inspect and evict cached forks"),
        (name = controller::health::HEALTH_TAG, description = "Liveness"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::root))
        .routes(routes!(controller::health::health_check))
        .routes(routes!(controller::fork::create_fork))
        .routes(routes!(controller::fork::delete_fork))
        .routes(routes!(
            controller::cache::get_cache_entry,
            controller::cache::delete_cache_entry
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
