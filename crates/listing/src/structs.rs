use portfolio_core::{PostType, ViewPost};
use serde::Serialize;
use strapi::{FetchError, DEFAULT_PAGE_SIZE};

/// 検索とタイプ絞り込みが両方指定されたときの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterComposition {
    /// Search wins; the type filter is not sent while a search is active.
    #[default]
    SearchOverridesType,
    /// Both filters are sent and the CMS AND-combines them.
    Intersect,
}

#[derive(Debug, Clone)]
pub struct ListingOptions {
    pub initial_type: Option<PostType>,
    pub initial_search: String,
    pub page_size: u32,
    pub composition: FilterComposition,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            initial_type: None,
            initial_search: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            composition: FilterComposition::default(),
        }
    }
}

/// Read-only view of the listing handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot {
    pub posts: Vec<ViewPost>,
    pub is_loading: bool,
    pub error: Option<FetchError>,
    pub has_more: bool,
    pub selected_type: Option<PostType>,
    pub search_query: String,
    pub page: u32,
}
