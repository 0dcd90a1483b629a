use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::collection::EmbeddedCollection;
use crate::config::AppConfig;
use crate::database::models::{Comment, Like, Post};
use crate::database::{DatabaseError, PostStore};
use crate::validation::PostInput;

use super::ServiceError;

/// Posts, likes and comments
pub struct PostService {
    posts: Arc<dyn PostStore>,
    max_update_attempts: u32,
    empty_list_not_found: bool,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, config: &AppConfig) -> Self {
        Self {
            posts,
            max_update_attempts: config.database.max_update_attempts.max(1),
            empty_list_not_found: config.api.empty_list_not_found,
        }
    }

    /// Most recent first
    pub async fn list_posts(&self) -> Result<Vec<Post>, ServiceError> {
        let posts = self.posts.list_posts().await?;
        if posts.is_empty() && self.empty_list_not_found {
            return Err(ServiceError::no_posts());
        }
        Ok(posts)
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<Post, ServiceError> {
        self.posts.find_post(post_id).await?.ok_or_else(ServiceError::no_post)
    }

    /// The author's name and avatar are copied onto the post as they are now.
    pub async fn create_post(&self, caller: &AuthUser, input: PostInput) -> Result<Post, ServiceError> {
        let text = input.into_text().map_err(ServiceError::Validation)?;
        let post = Post::new(caller.id, caller.name.clone(), caller.avatar.clone(), text);
        let created = self.posts.insert_post(&post).await?;
        info!("User {} created post {}", caller.id, created.id);
        Ok(created)
    }

    pub async fn delete_post(&self, caller: Uuid, post_id: Uuid) -> Result<(), ServiceError> {
        let post = self.get_post(post_id).await?;
        if post.user != caller {
            warn!("User {} attempted to delete post {} owned by {}", caller, post_id, post.user);
            return Err(ServiceError::NotAuthorized);
        }

        if !self.posts.delete_post(post_id).await? {
            return Err(ServiceError::no_post());
        }
        info!("User {} deleted post {}", caller, post_id);
        Ok(())
    }

    pub async fn like_post(&self, caller: Uuid, post_id: Uuid) -> Result<Post, ServiceError> {
        self.update_post(post_id, |post| {
            post.likes.prepend_unique(Like { user: caller }).map_err(|_| ServiceError::AlreadyLiked)
        })
        .await
    }

    pub async fn unlike_post(&self, caller: Uuid, post_id: Uuid) -> Result<Post, ServiceError> {
        self.update_post(post_id, |post| {
            post.likes.remove_by_key(&caller).map(|_| ()).map_err(|_| ServiceError::NotLiked)
        })
        .await
    }

    pub async fn add_comment(&self, caller: &AuthUser, post_id: Uuid, input: PostInput) -> Result<Post, ServiceError> {
        let text = input.into_text().map_err(ServiceError::Validation)?;
        let comment = Comment::new(caller.id, caller.name.clone(), caller.avatar.clone(), text);
        self.update_post(post_id, |post| {
            post.comments.prepend(comment.clone());
            Ok(())
        })
        .await
    }

    pub async fn remove_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Post, ServiceError> {
        self.update_post(post_id, |post| {
            post.comments
                .remove_by_key(&comment_id)
                .map(|_| ())
                .map_err(|_| ServiceError::no_comment())
        })
        .await
    }

    /// Load, mutate, persist with a version check; re-run on conflict.
    async fn update_post<F>(&self, post_id: Uuid, mutate: F) -> Result<Post, ServiceError>
    where
        F: Fn(&mut Post) -> Result<(), ServiceError> + Send + Sync,
    {
        for attempt in 1..=self.max_update_attempts {
            let mut post = self.get_post(post_id).await?;
            mutate(&mut post)?;

            match self.posts.save_post(&post).await {
                Ok(saved) => return Ok(saved),
                Err(DatabaseError::VersionConflict { .. }) => {
                    debug!(
                        "Version conflict saving post {} (attempt {}/{})",
                        post_id, attempt, self.max_update_attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!("Giving up on update of post {} after {} attempts", post_id, self.max_update_attempts);
        Err(ServiceError::Conflict { collection: "post", attempts: self.max_update_attempts })
    }
}
