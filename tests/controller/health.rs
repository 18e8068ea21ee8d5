//! Tests for the root and health endpoints.

use forkcache::server::controller::health::{health_check, root};

use super::*;

#[tokio::test]
async fn root_returns_welcome_message() {
    let resp = root().await.into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "message": "Welcome to forkcache" })
    );
}

#[tokio::test]
async fn health_check_returns_ok() {
    let resp = health_check().await.into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "status": "ok" }));
}
