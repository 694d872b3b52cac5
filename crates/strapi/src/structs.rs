use portfolio_core::{Pagination, ViewPost};
use serde::{Deserialize, Deserializer, Serialize};

/// `{ data: [...], meta: { pagination } }`. Items stay as raw JSON so that a
/// single malformed post degrades to a sentinel instead of failing the page.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    pub meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "page_pagination")]
    pub pagination: Option<Pagination>,
}

/// Keeps only page-based pagination. `pagination[limit]` requests come back
/// as `{ start, limit, total }`, which is treated as absent.
fn page_pagination<'de, D>(deserializer: D) -> Result<Option<Pagination>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match Pagination::deserialize(&value) {
        Ok(pagination) => Ok(Some(pagination)),
        Err(e) => {
            tracing::debug!("Ignoring pagination meta {}: {}", value, e);
            Ok(None)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SingleEnvelope {
    pub data: Option<serde_json::Value>,
}

/// Error body the CMS sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub name: Option<String>,
    pub message: Option<String>,
}

/// One decoded page of posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<ViewPost>,
    pub pagination: Pagination,
}

/// Link to a neighbouring post on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLink {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacentPosts {
    pub previous_post: Option<PostLink>,
    pub next_post: Option<PostLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}
