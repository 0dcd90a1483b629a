// handlers/protected/profile.rs - The caller's own profile
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::database::models::{Profile, ProfileView};
use crate::error::ApiError;
use crate::handlers::path_id;
use crate::middleware::JsonBody;
use crate::state::AppState;
use crate::validation::{EducationInput, ExperienceInput, ProfileInput};

/// GET /profile
pub async fn current(State(state): State<AppState>, user: AuthUser) -> Result<Json<ProfileView>, ApiError> {
    let profile = state.profiles.get_own_profile(user.id).await?;
    Ok(Json(profile))
}

/// POST /profile - create on first call, update afterwards
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.profiles.upsert_profile(user.id, input).await?;
    Ok(Json(profile))
}

/// DELETE /profile - removes the profile and then the user account
pub async fn delete_account(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>, ApiError> {
    state.profiles.delete_profile_and_user(user.id).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /profile/experience
pub async fn add_experience(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<ExperienceInput>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.profiles.add_experience(user.id, input).await?;
    Ok(Json(profile))
}

/// DELETE /profile/experience/:exp_id
pub async fn remove_experience(
    State(state): State<AppState>,
    user: AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .profiles
        .remove_experience(user.id, path_id(&exp_id))
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(Json(profile))
}

/// POST /profile/education
pub async fn add_education(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<EducationInput>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.profiles.add_education(user.id, input).await?;
    Ok(Json(profile))
}

/// DELETE /profile/education/:edu_id
pub async fn remove_education(
    State(state): State<AppState>,
    user: AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .profiles
        .remove_education(user.id, path_id(&edu_id))
        .await
        .map_err(|e| ApiError::from(e).not_found_as_bad_request())?;
    Ok(Json(profile))
}
