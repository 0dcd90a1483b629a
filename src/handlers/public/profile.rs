// handlers/public/profile.rs - Profile reads
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::ProfileView;
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::state::AppState;

/// GET /profile/test
pub async fn test() -> Json<Value> {
    Json(json!({ "msg": "Profile works" }))
}

/// GET /profile/all
pub async fn all(State(state): State<AppState>) -> Result<Json<Vec<ProfileView>>, ApiError> {
    let profiles = state.profiles.get_all_profiles().await?;
    Ok(Json(profiles))
}

/// GET /profile/handle/:handle
pub async fn by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let profile = state.profiles.get_profile_by_handle(&handle).await?;
    Ok(Json(profile))
}

/// GET /profile/user/:user_id
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let profile = state.profiles.get_profile_by_user_id(path_id(&user_id)).await?;
    Ok(Json(profile))
}
