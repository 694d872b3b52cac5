use crate::error::AppError;
use crate::state::{HomeQuery, SharedState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use listing::{ListingController, ListingOptions, ListingSnapshot};
use portfolio_core::PostType;

/// 一度に返すページ数の上限
pub const MAX_PAGES: u32 = 20;

/// Home grid listing. Replays what the page does in the browser: apply the
/// filters, then press "load more" until `pages` pages are loaded or the
/// listing runs out. Fetch failures come back inside the snapshot.
pub async fn get_home(
    State(state): State<SharedState>,
    Query(params): Query<HomeQuery>,
) -> Result<Json<ListingSnapshot>, AppError> {
    tracing::info!(
        "Received home request (type={:?}, search={:?}, pages={:?})",
        params.post_type,
        params.search,
        params.pages
    );

    let initial_type = match params.post_type.as_deref().filter(|t| !t.is_empty()) {
        Some(tag) => Some(
            PostType::from_str(tag)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown post type: {}", tag)))?,
        ),
        None => None,
    };
    let pages = params.pages.unwrap_or(1).clamp(1, MAX_PAGES);

    let options = ListingOptions {
        initial_type,
        initial_search: params.search.unwrap_or_default(),
        page_size: state.config.page_size,
        ..Default::default()
    };

    let controller = ListingController::mount(state.strapi.clone(), options).await;
    for _ in 1..pages {
        if !controller.has_more() {
            break;
        }
        controller.load_more().await;
    }

    Ok(Json(controller.snapshot()))
}
