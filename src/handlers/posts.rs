use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    response::Json,
};
use portfolio_core::ViewPost;
use serde::Serialize;
use strapi::{AdjacentPosts, Category};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub post: ViewPost,
    #[serde(flatten)]
    pub adjacent: AdjacentPosts,
}

pub async fn get_post(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetail>, AppError> {
    tracing::info!("Received post request: {}", slug);

    let post = state
        .strapi
        .find_post(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post not found: {}", slug)))?;

    if post.is_sentinel() {
        tracing::warn!("Post {} decoded as invalid, treating as not found", slug);
        return Err(AppError::NotFound(format!("Post not found: {}", slug)));
    }

    let adjacent = match post.id.parse::<u64>() {
        Ok(id) => state.strapi.get_adjacent_posts(id).await,
        Err(_) => AdjacentPosts::default(),
    };

    Ok(Json(PostDetail { post, adjacent }))
}

pub async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.strapi.list_categories().await?))
}
