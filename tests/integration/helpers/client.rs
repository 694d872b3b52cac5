use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use portfolio_feed::{
    app,
    state::{AppConfig, AppState, SharedState},
};
use tower::ServiceExt; // for oneshot

pub const TEST_PAGE_SIZE: u32 = 5;

pub fn create_test_state(cms_url: &str) -> SharedState {
    let config = AppConfig {
        strapi_url: cms_url.to_string(),
        strapi_api_token: None,
        page_size: TEST_PAGE_SIZE,
        port: 0,
    };
    AppState::new(config, reqwest::Client::new())
}

pub struct TestClient {
    pub router: Router,
}

impl TestClient {
    pub fn new(cms_url: &str) -> Self {
        Self {
            router: app(create_test_state(cms_url)),
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        // Router is cheap to clone; oneshot consumes it.
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body_bytes.to_vec())
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let (status, body) = self.get(uri).await;
        (status, String::from_utf8_lossy(&body).to_string())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let body_json: serde_json::Value = if body.is_empty() {
            serde_json::json!(null)
        } else {
            serde_json::from_slice(&body).unwrap_or_else(
                |_| serde_json::json!({ "raw": String::from_utf8_lossy(&body) }),
            )
        };
        (status, body_json)
    }
}
