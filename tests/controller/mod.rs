//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the application's HTTP controllers,
//! verifying request handling, response formatting and the mapping of service errors onto
//! status codes for all API endpoints.

mod cache;
mod health;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use forkcache::server::model::app::AppState;
use forkcache_test_utils::prelude::*;
use serde_json::json;

use crate::util::{body_is_empty, body_json};
