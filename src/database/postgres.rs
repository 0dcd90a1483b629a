use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Post, Profile, User};
use super::store::{PostStore, ProfileStore, StoreHealth, UserStore};

/// Document stores backed by Postgres JSONB rows
#[derive(Clone)]
pub struct PgStore {
    manager: DatabaseManager,
}

impl PgStore {
    pub fn new(manager: DatabaseManager) -> Self {
        Self { manager }
    }

    fn pool(&self) -> &PgPool {
        self.manager.pool()
    }
}

/// Translate a unique-constraint failure into the field it guards
fn map_unique_violation(err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("profiles_handle_key") => "handle",
                Some("profiles_user_id_key") => "user",
                Some("users_email_key") => "email",
                _ => "id",
            };
            return DatabaseError::UniqueViolation(field);
        }
    }
    DatabaseError::Sqlx(err)
}

fn profile_from_row((Json(mut profile), version): (Json<Profile>, i64)) -> Profile {
    profile.version = version;
    profile
}

fn post_from_row((Json(mut post), version): (Json<Post>, i64)) -> Post {
    post.version = version;
    post
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn find_profile_by_user(&self, user: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let row: Option<(Json<Profile>, i64)> =
            sqlx::query_as("SELECT doc, version FROM profiles WHERE user_id = $1")
                .bind(user)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(profile_from_row))
    }

    async fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, DatabaseError> {
        let row: Option<(Json<Profile>, i64)> =
            sqlx::query_as("SELECT doc, version FROM profiles WHERE handle = $1")
                .bind(handle)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(profile_from_row))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DatabaseError> {
        let rows: Vec<(Json<Profile>, i64)> =
            sqlx::query_as("SELECT doc, version FROM profiles ORDER BY date ASC")
                .fetch_all(self.pool())
                .await?;
        Ok(rows.into_iter().map(profile_from_row).collect())
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError> {
        let mut stored = profile.clone();
        stored.version = 0;

        sqlx::query(
            "INSERT INTO profiles (id, user_id, handle, version, date, doc) VALUES ($1, $2, $3, 0, $4, $5)",
        )
        .bind(stored.id)
        .bind(stored.user)
        .bind(&stored.handle)
        .bind(stored.date)
        .bind(Json(&stored))
        .execute(self.pool())
        .await
        .map_err(map_unique_violation)?;

        Ok(stored)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError> {
        let mut stored = profile.clone();
        stored.version = profile.version + 1;

        let result = sqlx::query(
            "UPDATE profiles SET handle = $3, doc = $4, version = version + 1 WHERE id = $1 AND version = $2",
        )
        .bind(profile.id)
        .bind(profile.version)
        .bind(&stored.handle)
        .bind(Json(&stored))
        .execute(self.pool())
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::VersionConflict { collection: "profile", id: profile.id });
        }
        Ok(stored)
    }

    async fn delete_profile_by_user(&self, user: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn list_posts(&self) -> Result<Vec<Post>, DatabaseError> {
        let rows: Vec<(Json<Post>, i64)> =
            sqlx::query_as("SELECT doc, version FROM posts ORDER BY date DESC")
                .fetch_all(self.pool())
                .await?;
        Ok(rows.into_iter().map(post_from_row).collect())
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, DatabaseError> {
        let row: Option<(Json<Post>, i64)> =
            sqlx::query_as("SELECT doc, version FROM posts WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(post_from_row))
    }

    async fn insert_post(&self, post: &Post) -> Result<Post, DatabaseError> {
        let mut stored = post.clone();
        stored.version = 0;

        sqlx::query("INSERT INTO posts (id, user_id, version, date, doc) VALUES ($1, $2, 0, $3, $4)")
            .bind(stored.id)
            .bind(stored.user)
            .bind(stored.date)
            .bind(Json(&stored))
            .execute(self.pool())
            .await
            .map_err(map_unique_violation)?;

        Ok(stored)
    }

    async fn save_post(&self, post: &Post) -> Result<Post, DatabaseError> {
        let mut stored = post.clone();
        stored.version = post.version + 1;

        let result = sqlx::query(
            "UPDATE posts SET doc = $3, version = version + 1 WHERE id = $1 AND version = $2",
        )
        .bind(post.id)
        .bind(post.version)
        .bind(Json(&stored))
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::VersionConflict { collection: "post", id: post.id });
        }
        Ok(stored)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email, avatar, date FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, DatabaseError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, avatar, date FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool())
        .await?;
        Ok(users)
    }

    async fn insert_user(&self, user: &User) -> Result<User, DatabaseError> {
        sqlx::query("INSERT INTO users (id, name, email, avatar, date) VALUES ($1, $2, $3, $4, $5)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.avatar)
            .bind(user.date)
            .execute(self.pool())
            .await
            .map_err(map_unique_violation)?;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.manager.health_check().await
    }
}
