use crate::error::FetchError;
use crate::query::{populate_params, PostQuery};
use crate::structs::{
    AdjacentPosts, Category, ErrorEnvelope, ListEnvelope, PostLink, PostPage, SingleEnvelope,
};
use crate::StrapiConfig;
use portfolio_core::payload::Entry;
use portfolio_core::{ContentAdapter, Pagination, RawCategory, ViewPost};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Upper bound for a single-post lookup. Listing requests have no timeout.
pub const DETAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of post pages. The listing controller only depends on this, so
/// tests can hand it a fake backend.
#[async_trait::async_trait]
pub trait PostFetcher: Send + Sync {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<PostPage, FetchError>;
}

/// REST client for the portfolio CMS. Cheap to clone; the underlying
/// `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct StrapiClient {
    client: Client,
    token: Option<String>,
    adapter: ContentAdapter,
    detail_timeout: Duration,
}

impl StrapiClient {
    pub fn new(client: Client, config: &StrapiConfig) -> Self {
        Self {
            client,
            token: config.api_token.clone(),
            adapter: ContentAdapter::new(config.base_url.as_str()),
            detail_timeout: DETAIL_TIMEOUT,
        }
    }

    pub fn with_detail_timeout(mut self, timeout: Duration) -> Self {
        self.detail_timeout = timeout;
        self
    }

    pub fn adapter(&self) -> &ContentAdapter {
        &self.adapter
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/api{}", self.adapter.origin(), path);
        tracing::debug!("GET {} {:?}", url, params);

        let mut req = self.client.get(&url).query(params);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await.map_err(|e| {
            tracing::error!("CMS request failed: {}", e);
            FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            }
        })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|e| e.error);
            let message = body
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            tracing::warn!("CMS returned error: status={}, body={}", status, text);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
                code: body.and_then(|b| b.name),
            });
        }

        let bytes = res.bytes().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }

    pub async fn get_posts(&self, query: &PostQuery) -> Result<PostPage, FetchError> {
        let mut params = populate_params();
        params.extend(query.to_params());

        let envelope: ListEnvelope = self.get("/posts", &params).await?;
        let posts: Vec<ViewPost> = envelope
            .data
            .iter()
            .map(|value| self.adapter.decode_post(value))
            .collect();
        let pagination = envelope
            .meta
            .and_then(|m| m.pagination)
            .unwrap_or_else(|| Pagination::single_page(posts.len()));

        Ok(PostPage { posts, pagination })
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<ViewPost>, FetchError> {
        let mut params = vec![("filters[slug][$eq]".to_string(), slug.to_string())];
        params.extend(populate_params());

        let envelope: ListEnvelope = self.get("/posts", &params).await?;
        Ok(envelope
            .data
            .first()
            .map(|value| self.adapter.decode_post(value)))
    }

    pub async fn get_post_by_id(&self, id: u64) -> Result<Option<ViewPost>, FetchError> {
        let path = format!("/posts/{}", id);
        match self.get::<SingleEnvelope>(&path, &populate_params()).await {
            Ok(envelope) => Ok(envelope
                .data
                .filter(|value| !value.is_null())
                .map(|value| self.adapter.decode_post(&value))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Resolve a detail-page slug. `post-{n}` is the fallback slug generated
    /// for posts without one and is looked up by id.
    pub async fn find_post(&self, route_slug: &str) -> Result<Option<ViewPost>, FetchError> {
        let lookup = async {
            match route_slug
                .strip_prefix("post-")
                .and_then(|id| id.parse::<u64>().ok())
            {
                Some(id) => {
                    tracing::debug!("Looking up post by id {}", id);
                    self.get_post_by_id(id).await
                }
                None => {
                    tracing::debug!("Looking up post by slug {}", route_slug);
                    self.get_post_by_slug(route_slug).await
                }
            }
        };

        tokio::time::timeout(self.detail_timeout, lookup)
            .await
            .map_err(|_| {
                tracing::error!("Post lookup timed out. The CMS may be unreachable.");
                FetchError::Timeout(self.detail_timeout)
            })?
    }

    /// 前後の投稿へのリンク。取得に失敗した場合は両方 None
    pub async fn get_adjacent_posts(&self, id: u64) -> AdjacentPosts {
        let neighbour = |op: &str, sort: &str| {
            vec![
                (format!("filters[id][{}]", op), id.to_string()),
                ("sort".to_string(), sort.to_string()),
                ("pagination[limit]".to_string(), "1".to_string()),
            ]
        };
        let previous_params = neighbour("$lt", "id:desc");
        let next_params = neighbour("$gt", "id:asc");

        let (previous, next) = tokio::join!(
            self.get::<ListEnvelope>("/posts", &previous_params),
            self.get::<ListEnvelope>("/posts", &next_params)
        );

        match (previous, next) {
            (Ok(previous), Ok(next)) => AdjacentPosts {
                previous_post: self.first_link(&previous),
                next_post: self.first_link(&next),
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Error fetching adjacent posts of {}: {}", id, e);
                AdjacentPosts::default()
            }
        }
    }

    fn first_link(&self, envelope: &ListEnvelope) -> Option<PostLink> {
        let post = self.adapter.decode_post(envelope.data.first()?);
        if post.is_sentinel() {
            return None;
        }
        Some(PostLink {
            slug: post.route_slug(),
            title: post.title,
        })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        let params = vec![("sort".to_string(), "name:asc".to_string())];
        let envelope: ListEnvelope = self.get("/categories", &params).await?;

        Ok(envelope
            .data
            .iter()
            .filter_map(|value| match Entry::<RawCategory>::deserialize(value) {
                Ok(entry) => {
                    let raw = entry.into_category();
                    Some(Category {
                        id: raw.id?.to_string(),
                        name: raw.name.unwrap_or_default(),
                        slug: raw.slug.unwrap_or_default(),
                        description: raw.description.unwrap_or_default(),
                    })
                }
                Err(e) => {
                    tracing::warn!("Skipping invalid category: {}", e);
                    None
                }
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl PostFetcher for StrapiClient {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<PostPage, FetchError> {
        self.get_posts(query).await
    }
}
