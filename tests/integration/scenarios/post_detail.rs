use crate::integration::helpers::client::TestClient;
use crate::integration::helpers::mock_server::{unreachable_url, MockCms};
use axum::http::StatusCode;
use serde_json::Value;

/// 観点: slug で引いた投稿と前後リンクが返る
#[tokio::test]
async fn test_post_by_slug_with_neighbours() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (status, body) = client.get_json("/api/posts/work-7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["id"], "7");
    assert_eq!(body["post"]["title"], "Neon Lights");
    assert_eq!(body["post"]["type"], "gif");
    assert_eq!(body["previousPost"]["slug"], "work-6");
    assert_eq!(body["nextPost"]["slug"], "work-8");
    assert_eq!(body["nextPost"]["title"], "Work 8");
}

/// 観点: slug のない投稿は post-{id} で引け、前後リンクも同じ形式になる
#[tokio::test]
async fn test_post_by_generated_slug() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (status, body) = client.get_json("/api/posts/post-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["id"], "3");
    assert_eq!(body["post"]["slug"], "");

    let (_, neighbour) = client.get_json("/api/posts/work-4").await;
    assert_eq!(neighbour["previousPost"]["slug"], "post-3");
}

#[tokio::test]
async fn test_first_post_has_no_previous() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (_, body) = client.get_json("/api/posts/work-1").await;
    assert_eq!(body["previousPost"], Value::Null);
    assert_eq!(body["nextPost"]["slug"], "work-2");
}

#[tokio::test]
async fn test_missing_post_is_404() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (status, body) = client.get_json("/api/posts/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found: does-not-exist");

    let (status, _) = client.get_json("/api/posts/post-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_with_unreachable_backend_is_502() {
    let client = TestClient::new(&unreachable_url().await);

    let (status, body) = client.get_json("/api/posts/work-1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to load content");
}
