use crate::integration::helpers::client::TestClient;
use crate::integration::helpers::mock_server::{param, post_type_of, unreachable_url, MockCms};
use axum::http::StatusCode;
use serde_json::Value;

fn ids(body: &Value) -> Vec<String> {
    body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

fn expected(ids: &[u64]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// 観点: 既定では新しい順に1ページ分が返る
#[tokio::test]
async fn test_home_first_page() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (status, body) = client.get_json("/api/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), expected(&[23, 22, 21, 20, 19]));
    assert_eq!(body["hasMore"], true);
    assert_eq!(body["isLoading"], false);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["page"], 1);
    assert_eq!(body["selectedType"], Value::Null);
    assert_eq!(body["searchQuery"], "");

    let params = &cms.listing_requests()[0];
    assert_eq!(param(params, "pagination[pageSize]"), Some("5"));
    assert_eq!(param(params, "sort"), Some("createdAt:desc"));
}

/// 観点: pages=N で N ページ分が順番どおりに連結される
#[tokio::test]
async fn test_home_load_more_pages() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (_, body) = client.get_json("/api/home?pages=3").await;
    let want: Vec<u64> = (9..=23).rev().collect();
    assert_eq!(ids(&body), expected(&want));
    assert_eq!(body["page"], 3);
    assert_eq!(body["hasMore"], true);
}

#[tokio::test]
async fn test_home_stops_at_last_page() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (_, body) = client.get_json("/api/home?pages=20").await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 23);
    assert_eq!(body["page"], 5);
    assert_eq!(body["hasMore"], false);
    // 最終ページ以降は問い合わせない
    assert_eq!(cms.listing_requests().len(), 5);
}

/// 観点: type=video では video のみ、メディアはギャラリー先頭の動画
#[tokio::test]
async fn test_home_type_filter() {
    let cms = MockCms::start().await;
    let base = cms.base_url();
    let client = TestClient::new(&base);

    let (status, body) = client.get_json("/api/home?type=video").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), expected(&[22, 18, 14, 10, 6]));
    assert!(body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["type"] == "video"));
    assert_eq!(body["selectedType"], "video");
    assert_eq!(body["hasMore"], true);

    let first = &body["posts"][0];
    assert_eq!(first["mediaUrl"], format!("{}/uploads/clip-22.mp4", base));
    assert_eq!(
        first["mediaFormats"]["thumbnail"],
        format!("{}/uploads/thumbnail_poster-22.jpg", base)
    );
    assert_eq!(first["mediaAlt"], "Poster 22");
}

/// 観点: 検索はタイトルと説明文の大文字小文字を区別しない部分一致
#[tokio::test]
async fn test_home_search() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (_, body) = client.get_json("/api/home?search=neon").await;
    assert_eq!(ids(&body), expected(&[20, 15, 10, 7, 5]));
    assert_eq!(body["searchQuery"], "neon");
    assert_eq!(body["hasMore"], false);
}

/// 観点: 検索中はタイプ絞り込みを送らない
#[tokio::test]
async fn test_home_search_overrides_type() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (_, body) = client.get_json("/api/home?type=gif&search=neon").await;
    assert_eq!(ids(&body), expected(&[20, 15, 10, 7, 5]));
    assert!(ids(&body)
        .iter()
        .any(|id| post_type_of(id.parse().unwrap()) != "gif"));
    assert_eq!(body["selectedType"], "gif");

    let params = cms.listing_requests().pop().unwrap();
    assert_eq!(param(&params, "filters[postType][$eq]"), None);
    assert_eq!(
        param(&params, "filters[$or][1][description][$containsi]"),
        Some("neon")
    );
}

#[tokio::test]
async fn test_home_unknown_type_is_bad_request() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (status, body) = client.get_json("/api/home?type=hologram").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown post type: hologram");
    assert!(cms.listing_requests().is_empty());
}

/// 観点: CMS のエラーはスナップショットの error として返り、一覧は空になる
#[tokio::test]
async fn test_home_backend_error_degrades() {
    let cms = MockCms::start().await;
    let client = TestClient::new(&cms.base_url());

    let (status, body) = client.get_json("/api/home?search=explode").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"], serde_json::json!([]));
    assert_eq!(body["hasMore"], false);
    assert_eq!(body["error"], "Internal Server Error (HTTP 500)");
}

#[tokio::test]
async fn test_home_unreachable_backend() {
    let client = TestClient::new(&unreachable_url().await);

    let (status, body) = client.get_json("/api/home?pages=3").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].as_str().unwrap().starts_with("Request to "));
    assert_eq!(body["posts"], serde_json::json!([]));
    assert_eq!(body["page"], 1);
}
