//! Storage seams for the document collections.
//!
//! `save_*` is a conditional write: it succeeds only when the stored version
//! still equals the version carried by the document, and returns the document
//! with its version bumped. Anything else is `DatabaseError::VersionConflict`.

use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Post, Profile, User};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile_by_user(&self, user: Uuid) -> Result<Option<Profile>, DatabaseError>;

    async fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, DatabaseError>;

    /// All profiles, oldest first
    async fn list_profiles(&self) -> Result<Vec<Profile>, DatabaseError>;

    /// Fails with `UniqueViolation("handle")` or `UniqueViolation("user")`
    async fn insert_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError>;

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError>;

    async fn delete_profile_by_user(&self, user: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, most recent `date` first
    async fn list_posts(&self) -> Result<Vec<Post>, DatabaseError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, DatabaseError>;

    async fn insert_post(&self, post: &Post) -> Result<Post, DatabaseError>;

    async fn save_post(&self, post: &Post) -> Result<Post, DatabaseError>;

    async fn delete_post(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, DatabaseError>;

    /// Fails with `UniqueViolation("email")`
    async fn insert_user(&self, user: &User) -> Result<User, DatabaseError>;

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
