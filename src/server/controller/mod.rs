//! HTTP controller endpoints for the forkcache web API.
//!
//! This module contains Axum handlers for forking and deleting repositories, inspecting the
//! fork cache, and liveness checks. Controllers extract request data, call into services
//! and repositories, and map the results to HTTP responses. They use utoipa for OpenAPI
//! documentation.

pub mod cache;
pub mod fork;
pub mod health;
