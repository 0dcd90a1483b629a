use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::collection::EmbeddedCollection;
use crate::config::AppConfig;
use crate::database::models::{Profile, ProfileView, UserSummary};
use crate::database::{DatabaseError, ProfileStore, UserStore};
use crate::validation::{EducationInput, ExperienceInput, ProfileFields, ProfileInput};

use super::ServiceError;

/// Profile lookup, upsert, experience/education management and account deletion
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    users: Arc<dyn UserStore>,
    max_update_attempts: u32,
    empty_list_not_found: bool,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>, users: Arc<dyn UserStore>, config: &AppConfig) -> Self {
        Self {
            profiles,
            users,
            max_update_attempts: config.database.max_update_attempts.max(1),
            empty_list_not_found: config.api.empty_list_not_found,
        }
    }

    pub async fn get_own_profile(&self, caller: Uuid) -> Result<ProfileView, ServiceError> {
        let profile = self
            .profiles
            .find_profile_by_user(caller)
            .await?
            .ok_or_else(ServiceError::no_profile)?;
        self.populate_one(profile).await
    }

    pub async fn get_all_profiles(&self) -> Result<Vec<ProfileView>, ServiceError> {
        let profiles = self.profiles.list_profiles().await?;
        if profiles.is_empty() && self.empty_list_not_found {
            return Err(ServiceError::no_profiles());
        }
        self.populate(profiles).await
    }

    pub async fn get_profile_by_user_id(&self, user: Uuid) -> Result<ProfileView, ServiceError> {
        let profile = self
            .profiles
            .find_profile_by_user(user)
            .await?
            .ok_or_else(ServiceError::no_profile)?;
        self.populate_one(profile).await
    }

    pub async fn get_profile_by_handle(&self, handle: &str) -> Result<ProfileView, ServiceError> {
        let profile = self
            .profiles
            .find_profile_by_handle(handle)
            .await?
            .ok_or_else(ServiceError::no_handle)?;
        self.populate_one(profile).await
    }

    /// Create the caller's profile, or update the supplied fields of the existing one.
    pub async fn upsert_profile(&self, caller: Uuid, input: ProfileInput) -> Result<Profile, ServiceError> {
        let fields = input.into_fields().map_err(ServiceError::Validation)?;

        if self.profiles.find_profile_by_user(caller).await?.is_some() {
            debug!("Updating profile for user {}", caller);
            return self.update_profile(caller, |profile| apply_fields(profile, &fields)).await;
        }

        if let Some(owner) = self.profiles.find_profile_by_handle(&fields.handle).await? {
            if owner.user != caller {
                warn!("Profile creation for user {} rejected: handle '{}' taken", caller, fields.handle);
                return Err(ServiceError::DuplicateHandle);
            }
        }

        let mut profile = Profile::new(caller, fields.handle.clone(), fields.status.clone());
        apply_fields(&mut profile, &fields)?;

        match self.profiles.insert_profile(&profile).await {
            Ok(created) => {
                info!("Created profile '{}' for user {}", created.handle, caller);
                Ok(created)
            }
            // A concurrent request may have created this user's profile first;
            // whichever constraint fired, that case becomes an update.
            Err(DatabaseError::UniqueViolation(field @ ("user" | "handle"))) => {
                if self.profiles.find_profile_by_user(caller).await?.is_none() {
                    return Err(DatabaseError::UniqueViolation(field).into());
                }
                debug!("Profile for user {} created concurrently, updating instead", caller);
                self.update_profile(caller, |profile| apply_fields(profile, &fields)).await
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn add_experience(&self, caller: Uuid, input: ExperienceInput) -> Result<Profile, ServiceError> {
        let entry = input.into_experience().map_err(ServiceError::Validation)?;
        self.update_profile(caller, |profile| {
            profile.experience.prepend(entry.clone());
            Ok(())
        })
        .await
    }

    pub async fn remove_experience(&self, caller: Uuid, entry_id: Uuid) -> Result<Profile, ServiceError> {
        self.update_profile(caller, |profile| {
            profile
                .experience
                .remove_by_key(&entry_id)
                .map(|_| ())
                .map_err(|_| ServiceError::no_experience())
        })
        .await
    }

    pub async fn add_education(&self, caller: Uuid, input: EducationInput) -> Result<Profile, ServiceError> {
        let entry = input.into_education().map_err(ServiceError::Validation)?;
        self.update_profile(caller, |profile| {
            profile.education.prepend(entry.clone());
            Ok(())
        })
        .await
    }

    pub async fn remove_education(&self, caller: Uuid, entry_id: Uuid) -> Result<Profile, ServiceError> {
        self.update_profile(caller, |profile| {
            profile
                .education
                .remove_by_key(&entry_id)
                .map(|_| ())
                .map_err(|_| ServiceError::no_education())
        })
        .await
    }

    /// Remove the caller's profile, then the user record. The two deletes are
    /// not transactional; a failure on the second is reported as `PartialDelete`.
    pub async fn delete_profile_and_user(&self, caller: Uuid) -> Result<(), ServiceError> {
        let profile_removed = self.profiles.delete_profile_by_user(caller).await?;

        match self.users.delete_user(caller).await {
            Ok(user_removed) => {
                info!(
                    "Deleted account {} (profile removed: {}, user removed: {})",
                    caller, profile_removed, user_removed
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "Account deletion for {} incomplete: profile removed: {}, user delete failed: {}",
                    caller, profile_removed, source
                );
                Err(ServiceError::PartialDelete { profile_removed, source })
            }
        }
    }

    /// Load the caller's profile, apply `mutate`, and persist with a version
    /// check. On a conflicting concurrent write the whole cycle re-runs.
    async fn update_profile<F>(&self, caller: Uuid, mutate: F) -> Result<Profile, ServiceError>
    where
        F: Fn(&mut Profile) -> Result<(), ServiceError> + Send + Sync,
    {
        for attempt in 1..=self.max_update_attempts {
            let mut profile = self
                .profiles
                .find_profile_by_user(caller)
                .await?
                .ok_or_else(ServiceError::no_profile)?;

            mutate(&mut profile)?;

            match self.profiles.save_profile(&profile).await {
                Ok(saved) => return Ok(saved),
                Err(DatabaseError::VersionConflict { .. }) => {
                    debug!(
                        "Version conflict saving profile of {} (attempt {}/{})",
                        caller, attempt, self.max_update_attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!("Giving up on profile update for {} after {} attempts", caller, self.max_update_attempts);
        Err(ServiceError::Conflict { collection: "profile", attempts: self.max_update_attempts })
    }

    async fn populate_one(&self, profile: Profile) -> Result<ProfileView, ServiceError> {
        let user = self.users.find_user(profile.user).await?;
        Ok(ProfileView {
            user: user.as_ref().map(UserSummary::from),
            profile,
        })
    }

    async fn populate(&self, profiles: Vec<Profile>) -> Result<Vec<ProfileView>, ServiceError> {
        let ids: Vec<Uuid> = profiles.iter().map(|p| p.user).collect();
        let users: HashMap<Uuid, UserSummary> = self
            .users
            .find_users(&ids)
            .await?
            .iter()
            .map(|u| (u.id, UserSummary::from(u)))
            .collect();

        Ok(profiles
            .into_iter()
            .map(|profile| ProfileView {
                user: users.get(&profile.user).cloned(),
                profile,
            })
            .collect())
    }
}

/// Overwrite required fields, and optional ones only when supplied
fn apply_fields(profile: &mut Profile, fields: &ProfileFields) -> Result<(), ServiceError> {
    let fields = fields.clone();

    profile.handle = fields.handle;
    profile.status = fields.status;
    profile.skills = fields.skills;
    if fields.company.is_some() {
        profile.company = fields.company;
    }
    if fields.website.is_some() {
        profile.website = fields.website;
    }
    if fields.location.is_some() {
        profile.location = fields.location;
    }
    if fields.bio.is_some() {
        profile.bio = fields.bio;
    }
    if fields.githubusername.is_some() {
        profile.githubusername = fields.githubusername;
    }
    profile.social.merge(fields.social);
    Ok(())
}
