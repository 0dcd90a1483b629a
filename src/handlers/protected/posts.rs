// handlers/protected/posts.rs - Post writes, likes and comments
//
// A missing post on like/unlike/comment routes is a 400, not a 404.
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::database::models::Post;
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::JsonBody;
use crate::state::AppState;
use crate::validation::PostInput;

/// POST /posts
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.create_post(&user, input).await?;
    Ok(Json(post))
}

/// DELETE /posts/:id - author only
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.posts.delete_post(user.id, path_id(&id)).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /posts/like/:id
pub async fn like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .posts
        .like_post(user.id, path_id(&id))
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(Json(post))
}

/// POST /posts/unlike/:id
pub async fn unlike(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .posts
        .unlike_post(user.id, path_id(&id))
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(Json(post))
}

/// POST /posts/comment/:id
pub async fn comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .posts
        .add_comment(&user, path_id(&id), input)
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(Json(post))
}

/// DELETE /posts/comment/:id/:comment_id
pub async fn uncomment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .posts
        .remove_comment(path_id(&id), path_id(&comment_id))
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(Json(post))
}
