use portfolio_core::PostType;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT: &str = "createdAt:desc";

/// Relations the listing and detail views need populated.
pub const POPULATE: [&str; 3] = ["featuredImage", "galleryImages", "categories"];

/// Parameters of a post listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub page: u32,
    pub page_size: u32,
    pub post_type: Option<PostType>,
    pub search: Option<String>,
    pub sort: String,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            post_type: None,
            search: None,
            sort: DEFAULT_SORT.to_string(),
        }
    }
}

impl PostQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn post_type(mut self, post_type: Option<PostType>) -> Self {
        self.post_type = post_type;
        self
    }

    pub fn search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }

    /// Query string pairs, without `populate`.
    ///
    /// Search is a case-insensitive substring match on title OR description.
    /// When both filters are set they are AND-combined by the CMS.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("pagination[page]".to_string(), self.page.to_string()),
            ("pagination[pageSize]".to_string(), self.page_size.to_string()),
            ("sort".to_string(), self.sort.clone()),
        ];

        if let Some(post_type) = self.post_type {
            params.push((
                "filters[postType][$eq]".to_string(),
                post_type.as_str().to_string(),
            ));
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push((
                "filters[$or][0][title][$containsi]".to_string(),
                search.to_string(),
            ));
            params.push((
                "filters[$or][1][description][$containsi]".to_string(),
                search.to_string(),
            ));
        }

        params
    }
}

pub(crate) fn populate_params() -> Vec<(String, String)> {
    POPULATE
        .iter()
        .map(|field| ("populate".to_string(), field.to_string()))
        .collect()
}
