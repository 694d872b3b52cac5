use serde::Deserialize;
use strapi::{StrapiClient, DEFAULT_PAGE_SIZE};

pub const DEFAULT_STRAPI_URL: &str = "http://localhost:1337";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub strapi_url: String,
    pub strapi_api_token: Option<String>,
    pub page_size: u32,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 環境変数の取得元を差し替えられるようにしておく (テスト用)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let strapi_url = lookup("STRAPI_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STRAPI_URL.to_string());
        let strapi_api_token = lookup("STRAPI_API_TOKEN").filter(|v| !v.is_empty());
        let page_size = lookup("PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            strapi_url,
            strapi_api_token,
            page_size,
            port,
        }
    }

    pub fn strapi(&self) -> strapi::StrapiConfig {
        strapi::StrapiConfig::new(self.strapi_url.clone(), self.strapi_api_token.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub search: Option<String>,
    /// Number of pages loaded so far ("load more" presses + 1).
    pub pages: Option<u32>,
}

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub strapi: StrapiClient,
}

impl AppState {
    pub fn new(config: AppConfig, http_client: reqwest::Client) -> Self {
        let strapi = StrapiClient::new(http_client, &config.strapi());
        Self { config, strapi }
    }
}
