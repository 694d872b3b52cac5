use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 投稿の表示テンプレート種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Standard,
    Video,
    Gif,
    Gallery,
}

impl PostType {
    pub const ALL: [PostType; 4] = [Self::Standard, Self::Video, Self::Gif, Self::Gallery];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(Self::Standard),
            "video" => Some(Self::Video),
            "gif" => Some(Self::Gif),
            "gallery" => Some(Self::Gallery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Video => "video",
            Self::Gif => "gif",
            Self::Gallery => "gallery",
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoProvider {
    Vimeo,
    SelfHosted,
}

impl VideoProvider {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "vimeo" => Some(Self::Vimeo),
            "self-hosted" => Some(Self::SelfHosted),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format (CMS のレスポンスそのまま)
// ---------------------------------------------------------------------------

/// A single size variant of an uploaded media file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMediaFormat {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Uploaded media as the CMS returns it. `url` and the format urls are
/// relative to the CMS origin unless the upload provider stores absolute ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub alternative_text: Option<String>,
    pub caption: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime: Option<String>,
    pub url: Option<String>,
    pub formats: Option<BTreeMap<String, Option<RawMediaFormat>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    pub id: Option<u64>,
    pub document_id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Post record as the CMS returns it (flat shape). Every field is optional so
/// that a partially populated record still decodes; validation happens in the
/// adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub id: Option<u64>,
    pub document_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub post_type: Option<String>,
    pub is_featured: Option<bool>,
    #[serde(rename = "videoURL")]
    pub video_url: Option<String>,
    pub video_provider: Option<String>,
    pub disable_autoplay: Option<bool>,
    pub disable_loop: Option<bool>,
    #[serde(rename = "gifURL")]
    pub gif_url: Option<String>,
    pub gif_provider: Option<String>,
    pub content: Option<serde_json::Value>,
    pub featured_image: Option<RawMedia>,
    pub gallery_images: Option<Vec<RawMedia>>,
    pub categories: Option<Vec<RawCategory>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub published_at: Option<String>,
}

/// `meta.pagination` of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

impl Pagination {
    /// Used when the CMS omits pagination metadata: everything fits on one page.
    pub fn single_page(len: usize) -> Self {
        let total = u32::try_from(len).unwrap_or(u32::MAX);
        Self {
            page: 1,
            page_size: total,
            page_count: 1,
            total,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.page_count
    }
}

// ---------------------------------------------------------------------------
// View model (描画用に正規化済み)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
}

/// Render-ready post. Every field carries a value; see
/// [`ContentAdapter::to_view_post`](crate::ContentAdapter::to_view_post) for
/// the fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPost {
    pub id: String,
    pub document_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub slug: String,
    pub media_url: String,
    pub media_formats: BTreeMap<String, String>,
    pub media_alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_provider: Option<VideoProvider>,
    pub autoplay: bool,
    pub looping: bool,
    pub gif_url: String,
    pub gallery_images: Vec<GalleryImage>,
    pub categories: Vec<CategorySummary>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const INVALID_POST_ID: &str = "0";
pub const INVALID_POST_TITLE: &str = "Error: Invalid post data";
pub const UNTITLED: &str = "Untitled";

impl ViewPost {
    /// 不正な入力の代わりに返すセンチネル
    pub fn invalid() -> Self {
        let now = Utc::now();
        Self {
            id: INVALID_POST_ID.to_string(),
            document_id: String::new(),
            title: INVALID_POST_TITLE.to_string(),
            description: String::new(),
            post_type: PostType::Standard,
            slug: String::new(),
            media_url: String::new(),
            media_formats: BTreeMap::new(),
            media_alt: String::new(),
            content: None,
            video_url: String::new(),
            video_provider: None,
            autoplay: true,
            looping: true,
            gif_url: String::new(),
            gallery_images: Vec::new(),
            categories: Vec::new(),
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == INVALID_POST_ID
    }

    /// Slug used for links to the detail page. Falls back to `post-{id}` when
    /// the CMS slug is missing or unusable in a path.
    pub fn route_slug(&self) -> String {
        let slug = self.slug.trim();
        let malformed = slug.is_empty()
            || slug == "undefined"
            || slug == "null"
            || slug.contains('/')
            || slug.chars().any(char::is_whitespace);
        if malformed {
            tracing::debug!(id = %self.id, original = %self.slug, "Using fallback slug");
            format!("post-{}", self.id)
        } else {
            slug.to_string()
        }
    }
}
