use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Post, Profile, User};
use super::store::{PostStore, ProfileStore, StoreHealth, UserStore};

/// Process-local document stores with the same uniqueness and versioning
/// rules as the Postgres backend. Used by tests and `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<Uuid, Profile>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_profile_unique(
    profiles: &HashMap<Uuid, Profile>,
    candidate: &Profile,
) -> Result<(), DatabaseError> {
    let others = || profiles.values().filter(|p| p.id != candidate.id);
    // Owner before handle, the order the migration declares the constraints in
    if others().any(|existing| existing.user == candidate.user) {
        return Err(DatabaseError::UniqueViolation("user"));
    }
    if others().any(|existing| existing.handle == candidate.handle) {
        return Err(DatabaseError::UniqueViolation("handle"));
    }
    Ok(())
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile_by_user(&self, user: Uuid) -> Result<Option<Profile>, DatabaseError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().find(|p| p.user == user).cloned())
    }

    async fn find_profile_by_handle(&self, handle: &str) -> Result<Option<Profile>, DatabaseError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().find(|p| p.handle == handle).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DatabaseError> {
        let profiles = self.profiles.read().await;
        let mut all: Vec<Profile> = profiles.values().cloned().collect();
        all.sort_by_key(|p| p.date);
        Ok(all)
    }

    async fn insert_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(DatabaseError::UniqueViolation("id"));
        }
        check_profile_unique(&profiles, profile)?;

        let mut stored = profile.clone();
        stored.version = 0;
        profiles.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, DatabaseError> {
        let mut profiles = self.profiles.write().await;
        let current_version = profiles.get(&profile.id).map(|p| p.version);
        if current_version != Some(profile.version) {
            return Err(DatabaseError::VersionConflict { collection: "profile", id: profile.id });
        }
        check_profile_unique(&profiles, profile)?;

        let mut stored = profile.clone();
        stored.version += 1;
        profiles.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_profile_by_user(&self, user: Uuid) -> Result<bool, DatabaseError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        profiles.retain(|_, p| p.user != user);
        Ok(profiles.len() < before)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>, DatabaseError> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, DatabaseError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<Post, DatabaseError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(DatabaseError::UniqueViolation("id"));
        }
        let mut stored = post.clone();
        stored.version = 0;
        posts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn save_post(&self, post: &Post) -> Result<Post, DatabaseError> {
        let mut posts = self.posts.write().await;
        let current_version = posts.get(&post.id).map(|p| p.version);
        if current_version != Some(post.version) {
            return Err(DatabaseError::VersionConflict { collection: "post", id: post.id });
        }
        let mut stored = post.clone();
        stored.version += 1;
        posts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn insert_user(&self, user: &User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(DatabaseError::UniqueViolation("id"));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("email"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let store = MemoryStore::new();
        let profile = store
            .insert_profile(&Profile::new(Uuid::new_v4(), "alice", "Developer"))
            .await
            .unwrap();

        let saved = store.save_profile(&profile).await.unwrap();
        assert_eq!(saved.version, 1);

        // Second writer still holds version 0
        let err = store.save_profile(&profile).await.unwrap_err();
        assert!(matches!(err, DatabaseError::VersionConflict { .. }));
    }

    #[tokio::test]
    async fn handle_is_unique() {
        let store = MemoryStore::new();
        store
            .insert_profile(&Profile::new(Uuid::new_v4(), "alice", "Developer"))
            .await
            .unwrap();
        let err = store
            .insert_profile(&Profile::new(Uuid::new_v4(), "alice", "Designer"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation("handle")));
        assert_eq!(store.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_profile_for_same_user_is_a_user_violation() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.insert_profile(&Profile::new(user, "alice", "Developer")).await.unwrap();

        let err = store
            .insert_profile(&Profile::new(user, "alice", "Developer"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation("user")));
        assert_eq!(store.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn posts_list_newest_first() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for offset in [2, 0, 1] {
            let mut post = Post::new(Uuid::new_v4(), "A", "", "some post text");
            post.date = now - Duration::minutes(offset);
            store.insert_post(&post).await.unwrap();
        }
        let dates: Vec<_> = store.list_posts().await.unwrap().iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![now, now - Duration::minutes(1), now - Duration::minutes(2)]
        );
    }
}
