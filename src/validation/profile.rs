use serde::Deserialize;

use super::{failed, is_length, optional, optional_url, required, FieldError, FieldErrors, Validation};
use crate::database::models::Social;

/// Body of `POST /profile`. Skills arrive as one comma separated string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

/// Validated profile fields. Optional values are `None` when not supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub handle: String,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: Social,
}

pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_handle(handle: Option<&str>) -> Result<String, FieldError> {
    let handle = required(handle, "handle", "Profile handle is required")?;
    if !is_length(&handle, 2, 40) {
        return Err(FieldError::new("handle", "Handle needs to be between 2 and 40 characters"));
    }
    Ok(handle)
}

/// At least one non-blank token once split on commas
fn check_skills(skills: Option<&str>) -> Result<Vec<String>, FieldError> {
    let raw = required(skills, "skills", "Skills field is required")?;
    let skills = parse_skills(&raw);
    if skills.is_empty() {
        return Err(FieldError::new("skills", "Skills field is required"));
    }
    Ok(skills)
}

impl ProfileInput {
    pub fn validate(&self) -> Validation {
        self.clone().into_fields().map(|_| ()).into()
    }

    pub fn into_fields(self) -> Result<ProfileFields, FieldErrors> {
        let handle = check_handle(self.handle.as_deref());
        let status = required(self.status.as_deref(), "status", "Status field is required");
        let skills = check_skills(self.skills.as_deref());
        let website = optional_url(self.website.as_deref(), "website");
        let youtube = optional_url(self.youtube.as_deref(), "youtube");
        let twitter = optional_url(self.twitter.as_deref(), "twitter");
        let linkedin = optional_url(self.linkedin.as_deref(), "linkedin");
        let instagram = optional_url(self.instagram.as_deref(), "instagram");

        let validation = Validation::from_checks([
            failed(&handle),
            failed(&status),
            failed(&skills),
            failed(&website),
            failed(&youtube),
            failed(&twitter),
            failed(&linkedin),
            failed(&instagram),
        ]);

        match (handle, status, skills, website, youtube, twitter, linkedin, instagram) {
            (Ok(handle), Ok(status), Ok(skills), Ok(website), Ok(youtube), Ok(twitter), Ok(linkedin), Ok(instagram)) => {
                Ok(ProfileFields {
                    handle,
                    status,
                    skills,
                    company: optional(self.company.as_deref()),
                    website,
                    location: optional(self.location.as_deref()),
                    bio: optional(self.bio.as_deref()),
                    githubusername: optional(self.githubusername.as_deref()),
                    social: Social { youtube, twitter, linkedin, instagram },
                })
            }
            _ => Err(validation.into_errors()),
        }
    }
}
