use crate::structs::{FilterComposition, ListingOptions, ListingSnapshot};
use portfolio_core::{PostType, ViewPost};
use std::sync::{Mutex, MutexGuard, PoisonError};
use strapi::{FetchError, PostFetcher, PostQuery};

#[derive(Debug)]
struct ListingState {
    posts: Vec<ViewPost>,
    page: u32,
    has_more: bool,
    type_filter: Option<PostType>,
    search: String,
    is_loading: bool,
    error: Option<FetchError>,
    /// 最後に発行したリクエストの連番。これと一致する応答だけを反映する
    latest_request: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Apply {
    Replace,
    Append,
}

/// Paginated, filterable post listing for the home grid.
///
/// Operations take `&self` and may overlap. Every fetch is numbered; a
/// response is applied only if no newer fetch was issued after it, so the
/// listing always reflects the most recently requested filters.
///
/// Nothing is loaded until [`refresh`](Self::refresh) (or use
/// [`mount`](Self::mount)).
pub struct ListingController<F> {
    fetcher: F,
    page_size: u32,
    composition: FilterComposition,
    state: Mutex<ListingState>,
}

impl<F: PostFetcher> ListingController<F> {
    pub fn new(fetcher: F, options: ListingOptions) -> Self {
        Self {
            fetcher,
            page_size: options.page_size,
            composition: options.composition,
            state: Mutex::new(ListingState {
                posts: Vec::new(),
                page: 1,
                has_more: false,
                type_filter: options.initial_type,
                search: options.initial_search,
                is_loading: false,
                error: None,
                latest_request: 0,
            }),
        }
    }

    /// Construct and load the first page.
    pub async fn mount(fetcher: F, options: ListingOptions) -> Self {
        let controller = Self::new(fetcher, options);
        controller.refresh().await;
        controller
    }

    fn state(&self) -> MutexGuard<'_, ListingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let s = self.state();
        ListingSnapshot {
            posts: s.posts.clone(),
            is_loading: s.is_loading,
            error: s.error.clone(),
            has_more: s.has_more,
            selected_type: s.type_filter,
            search_query: s.search.clone(),
            page: s.page,
        }
    }

    pub fn posts(&self) -> Vec<ViewPost> {
        self.state().posts.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state().error.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state().has_more
    }

    pub fn selected_type(&self) -> Option<PostType> {
        self.state().type_filter
    }

    pub fn search_query(&self) -> String {
        self.state().search.clone()
    }

    pub fn page(&self) -> u32 {
        self.state().page
    }

    /// Reload page 1 with the current filters.
    pub async fn refresh(&self) {
        let (seq, query) = {
            let mut s = self.state();
            s.page = 1;
            self.begin(&mut s)
        };
        self.run(seq, query, Apply::Replace).await;
    }

    pub async fn set_type(&self, post_type: Option<PostType>) {
        let (seq, query) = {
            let mut s = self.state();
            s.type_filter = post_type;
            s.page = 1;
            self.begin(&mut s)
        };
        self.run(seq, query, Apply::Replace).await;
    }

    pub async fn set_search(&self, text: impl Into<String>) {
        let (seq, query) = {
            let mut s = self.state();
            s.search = text.into();
            s.page = 1;
            self.begin(&mut s)
        };
        self.run(seq, query, Apply::Replace).await;
    }

    pub async fn reset_filters(&self) {
        let (seq, query) = {
            let mut s = self.state();
            s.type_filter = None;
            s.search.clear();
            s.page = 1;
            self.begin(&mut s)
        };
        self.run(seq, query, Apply::Replace).await;
    }

    /// Fetch the next page and append it. Does nothing while a fetch is in
    /// flight or when the last page has been reached.
    pub async fn load_more(&self) {
        let (seq, query) = {
            let mut s = self.state();
            if s.is_loading || !s.has_more {
                tracing::debug!(
                    "load_more skipped (loading={}, has_more={})",
                    s.is_loading,
                    s.has_more
                );
                return;
            }
            s.page += 1;
            self.begin(&mut s)
        };
        self.run(seq, query, Apply::Append).await;
    }

    fn begin(&self, s: &mut ListingState) -> (u64, PostQuery) {
        s.latest_request += 1;
        s.is_loading = true;

        let search = Some(s.search.clone()).filter(|q| !q.is_empty());
        let post_type = match self.composition {
            FilterComposition::SearchOverridesType if search.is_some() => None,
            _ => s.type_filter,
        };
        let query = PostQuery::default()
            .page(s.page)
            .page_size(self.page_size)
            .post_type(post_type)
            .search(search);

        (s.latest_request, query)
    }

    async fn run(&self, seq: u64, query: PostQuery, apply: Apply) {
        let result = self.fetcher.fetch_posts(&query).await;

        let mut s = self.state();
        if s.latest_request != seq {
            tracing::debug!(
                "Discarding stale listing response #{} (latest #{})",
                seq,
                s.latest_request
            );
            return;
        }
        s.is_loading = false;

        match result {
            Ok(page) => {
                tracing::debug!(
                    "Loaded page {}/{} ({} posts)",
                    page.pagination.page,
                    page.pagination.page_count,
                    page.posts.len()
                );
                match apply {
                    Apply::Replace => s.posts = page.posts,
                    Apply::Append => s.posts.extend(page.posts),
                }
                s.has_more = page.pagination.has_more();
                s.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch posts (page {}): {}", query.page, e);
                s.error = Some(e);
                s.posts.clear();
                s.has_more = false;
            }
        }
    }
}
