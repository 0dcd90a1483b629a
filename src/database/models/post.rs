use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Keyed;

/// A post. `name` and `avatar` are a snapshot of the author taken at creation
/// time and are not refreshed when the user changes them later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
    #[serde(rename = "__v", default)]
    pub version: i64,
}

impl Post {
    pub fn new(user: Uuid, name: impl Into<String>, avatar: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text: text.into(),
            name: name.into(),
            avatar: avatar.into(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
            version: 0,
        }
    }
}

/// Likes are keyed by the liking user, so a post holds at most one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub user: Uuid,
}

impl Keyed for Like {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.user
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    pub fn new(user: Uuid, name: impl Into<String>, avatar: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            text: text.into(),
            name: name.into(),
            avatar: avatar.into(),
            date: Utc::now(),
        }
    }
}

impl Keyed for Comment {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}
