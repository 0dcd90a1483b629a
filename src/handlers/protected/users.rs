// handlers/protected/users.rs - GET /users/current
use axum::Json;

use crate::auth::AuthUser;

pub async fn current(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}
