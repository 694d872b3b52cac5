//! Wrapped (`{ id, attributes }`) と flat の2種類のペイロード形式を
//! 1回の判別付きデコードで [`RawPost`] に揃える。
//!
//! Wrapped posts also wrap their relations: `featuredImage: { data: {...} }`,
//! `galleryImages: { data: [...] }`.

use crate::models::{RawCategory, RawMedia, RawPost};
use serde::{Deserialize, Deserializer};

/// An entry that is either `{ id, attributes: T }` or `T` itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Entry<T> {
    Wrapped { id: Option<u64>, attributes: T },
    Flat(T),
}

/// `{ data: T }` wrapper used for relations of wrapped posts. `data` must be
/// present (it may be `null`), otherwise an inline object would match too.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Relation<T> {
    #[serde(deserialize_with = "required_nullable")]
    pub data: Option<T>,
}

fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// A relation field that may or may not carry the `{ data }` wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RelationField<T> {
    Wrapped(Relation<T>),
    Inline(T),
}

impl<T> RelationField<T> {
    fn into_inner(self) -> Option<T> {
        match self {
            Self::Wrapped(rel) => rel.data,
            Self::Inline(value) => Some(value),
        }
    }
}

impl Entry<RawMedia> {
    pub fn into_media(self) -> RawMedia {
        match self {
            Self::Wrapped { id, mut attributes } => {
                attributes.id = attributes.id.or(id);
                attributes
            }
            Self::Flat(media) => media,
        }
    }
}

impl Entry<RawCategory> {
    pub fn into_category(self) -> RawCategory {
        match self {
            Self::Wrapped { id, mut attributes } => {
                attributes.id = attributes.id.or(id);
                attributes
            }
            Self::Flat(category) => category,
        }
    }
}

/// Attribute block of a wrapped post. Scalar fields come from the flattened
/// [`RawPost`]; relation fields are claimed here first so their wrappers can
/// be unpacked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedAttributes {
    featured_image: Option<RelationField<Entry<RawMedia>>>,
    gallery_images: Option<RelationField<Vec<Entry<RawMedia>>>>,
    categories: Option<RelationField<Vec<Entry<RawCategory>>>>,
    #[serde(flatten)]
    base: RawPost,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostPayload {
    Wrapped {
        id: Option<u64>,
        attributes: Box<WrappedAttributes>,
    },
    Flat(Box<RawPost>),
}

impl PostPayload {
    pub fn into_raw(self) -> RawPost {
        match self {
            Self::Flat(raw) => *raw,
            Self::Wrapped { id, attributes } => {
                let WrappedAttributes {
                    featured_image,
                    gallery_images,
                    categories,
                    mut base,
                } = *attributes;

                base.id = base.id.or(id);
                base.featured_image = featured_image
                    .and_then(RelationField::into_inner)
                    .map(Entry::into_media);
                base.gallery_images = gallery_images
                    .and_then(RelationField::into_inner)
                    .map(|list| list.into_iter().map(Entry::into_media).collect());
                base.categories = categories
                    .and_then(RelationField::into_inner)
                    .map(|list| list.into_iter().map(Entry::into_category).collect());
                base
            }
        }
    }
}
