use crate::models::{
    CategorySummary, GalleryImage, PostType, RawMedia, RawPost, VideoProvider, ViewPost, UNTITLED,
};
use crate::payload::PostPayload;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// CMS のレスポンスを描画用の [`ViewPost`] に変換する。
///
/// Holds the CMS origin that every relative media path is resolved against.
/// Never fails: malformed input becomes [`ViewPost::invalid`].
#[derive(Debug, Clone)]
pub struct ContentAdapter {
    origin: String,
}

impl ContentAdapter {
    pub fn new(origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        // Remove trailing slash if present
        while origin.ends_with('/') {
            origin.pop();
        }
        Self { origin }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Join a CMS path onto the origin with exactly one slash.
    /// Absolute URLs (e.g. a CDN upload provider) pass through untouched.
    fn absolute(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.origin, path))
    }

    pub fn resolve_media_url(&self, media: Option<&RawMedia>) -> String {
        media
            .and_then(|m| m.url.as_deref())
            .and_then(|url| self.absolute(url))
            .unwrap_or_default()
    }

    /// Absolute URL per named size variant. Variants without a url are left out.
    pub fn resolve_media_formats(&self, media: Option<&RawMedia>) -> BTreeMap<String, String> {
        let Some(formats) = media.and_then(|m| m.formats.as_ref()) else {
            return BTreeMap::new();
        };

        formats
            .iter()
            .filter_map(|(name, format)| {
                let url = format.as_ref()?.url.as_deref()?;
                Some((name.clone(), self.absolute(url)?))
            })
            .collect()
    }

    pub fn to_view_post(&self, raw: Option<&RawPost>) -> ViewPost {
        let Some(raw) = raw else {
            tracing::warn!("Invalid post data: missing record");
            return ViewPost::invalid();
        };
        let Some(id) = raw.id else {
            tracing::warn!("Invalid post data: record without id");
            return ViewPost::invalid();
        };

        let post_type = match raw.post_type.as_deref() {
            Some(tag) => PostType::from_str(tag).unwrap_or_else(|| {
                tracing::warn!("Post {} has unknown postType {:?}, using standard", id, tag);
                PostType::Standard
            }),
            None => {
                tracing::warn!("Post {} has no postType, using standard", id);
                PostType::Standard
            }
        };

        let gallery = raw.gallery_images.as_deref().unwrap_or_default();

        // Video posts keep their clip in the gallery list; the featured image
        // is only a poster there.
        let media_url = match gallery.first() {
            Some(first) if post_type == PostType::Video => self.resolve_media_url(Some(first)),
            _ => self.resolve_media_url(raw.featured_image.as_ref()),
        };

        let title = raw
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let created_at = parse_timestamp(raw.created_at.as_deref())
            .or_else(|| parse_timestamp(raw.published_at.as_deref()))
            .unwrap_or_default();
        let updated_at = parse_timestamp(raw.updated_at.as_deref()).unwrap_or(created_at);

        ViewPost {
            id: id.to_string(),
            document_id: raw.document_id.clone().unwrap_or_default(),
            title,
            description: raw.description.clone().unwrap_or_default(),
            post_type,
            slug: raw.slug.clone().unwrap_or_default(),
            media_url,
            media_formats: self.resolve_media_formats(raw.featured_image.as_ref()),
            media_alt: raw
                .featured_image
                .as_ref()
                .and_then(|m| m.alternative_text.clone())
                .unwrap_or_default(),
            content: raw.content.clone().filter(|c| !c.is_null()),
            video_url: raw.video_url.clone().unwrap_or_default(),
            video_provider: raw
                .video_provider
                .as_deref()
                .and_then(VideoProvider::from_str),
            autoplay: !raw.disable_autoplay.unwrap_or(false),
            looping: !raw.disable_loop.unwrap_or(false),
            gif_url: raw.gif_url.clone().unwrap_or_default(),
            gallery_images: gallery
                .iter()
                .map(|image| GalleryImage {
                    url: self.resolve_media_url(Some(image)),
                    alt: image.alternative_text.clone().unwrap_or_default(),
                })
                .collect(),
            categories: raw
                .categories
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|c| CategorySummary {
                    name: c.name.clone().unwrap_or_default(),
                    slug: c.slug.clone().unwrap_or_default(),
                })
                .collect(),
            is_featured: raw.is_featured.unwrap_or(false),
            created_at,
            updated_at,
        }
    }

    /// Decode either payload shape and normalise it. Anything that does not
    /// decode becomes the sentinel.
    pub fn decode_post(&self, value: &serde_json::Value) -> ViewPost {
        if value.is_null() {
            return self.to_view_post(None);
        }
        match PostPayload::deserialize(value) {
            Ok(payload) => self.to_view_post(Some(&payload.into_raw())),
            Err(e) => {
                tracing::warn!("Invalid post data: {}", e);
                ViewPost::invalid()
            }
        }
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Ignoring unparsable timestamp {:?}: {}", value, e);
            None
        }
    }
}
