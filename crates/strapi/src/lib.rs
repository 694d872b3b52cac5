pub mod api;
pub mod error;
pub mod query;
pub mod structs;

pub use api::{PostFetcher, StrapiClient, DETAIL_TIMEOUT};
pub use error::FetchError;
pub use query::{PostQuery, DEFAULT_PAGE_SIZE};
pub use structs::{AdjacentPosts, Category, PostLink, PostPage};

/// CMS の接続設定
#[derive(Debug, Clone)]
pub struct StrapiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl StrapiConfig {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.filter(|t| !t.is_empty()),
        }
    }
}
