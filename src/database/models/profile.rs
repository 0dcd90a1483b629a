use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::user::UserSummary;
use crate::collection::Keyed;

/// Developer profile, one per user. Experience and education entries are
/// owned by the profile and have no existence outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
    /// Optimistic concurrency counter, bumped on every persist
    #[serde(rename = "__v", default)]
    pub version: i64,
}

impl Profile {
    pub fn new(user: Uuid, handle: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            handle: handle.into(),
            company: None,
            website: None,
            location: None,
            bio: None,
            status: status.into(),
            skills: Vec::new(),
            githubusername: None,
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: Utc::now(),
            version: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    /// Overlay the platforms present in `other`, keeping the rest.
    pub fn merge(&mut self, other: Social) {
        if other.youtube.is_some() {
            self.youtube = other.youtube;
        }
        if other.twitter.is_some() {
            self.twitter = other.twitter;
        }
        if other.linkedin.is_some() {
            self.linkedin = other.linkedin;
        }
        if other.instagram.is_some() {
            self.instagram = other.instagram;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Keyed for Experience {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Keyed for Education {
    type Key = Uuid;

    fn key(&self) -> &Uuid {
        &self.id
    }
}

/// Profile as returned to clients, with the owning user's name and avatar
/// populated in place of the bare `user` id.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub profile: Profile,
    pub user: Option<UserSummary>,
}

impl Serialize for ProfileView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error;

        let mut value = serde_json::to_value(&self.profile).map_err(S::Error::custom)?;
        if let (Some(user), Some(fields)) = (&self.user, value.as_object_mut()) {
            fields.insert("user".to_string(), serde_json::to_value(user).map_err(S::Error::custom)?);
        }
        value.serialize(serializer)
    }
}
