//! Post / media models of the portfolio CMS and the adapter that turns them
//! into render-ready [`ViewPost`]s.

pub mod adapter;
pub mod models;
pub mod payload;

pub use adapter::ContentAdapter;
pub use models::{
    CategorySummary, GalleryImage, Pagination, PostType, RawCategory, RawMedia, RawMediaFormat,
    RawPost, VideoProvider, ViewPost, INVALID_POST_ID,
};
pub use payload::PostPayload;
