// handlers/public/posts.rs - Post reads
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::Post;
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::state::AppState;

/// GET /posts/test
pub async fn test() -> Json<Value> {
    Json(json!({ "msg": "Posts works" }))
}

/// GET /posts - all posts, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.posts.list_posts().await?;
    Ok(Json(posts))
}

/// GET /posts/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get_post(path_id(&id)).await?;
    Ok(Json(post))
}
