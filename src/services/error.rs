use thiserror::Error;

use crate::database::DatabaseError;
use crate::validation::FieldErrors;

/// Domain failures shared by the profile and post services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input")]
    Validation(FieldErrors),

    /// `field` is the key the message is reported under
    #[error("{message}")]
    NotFound { field: &'static str, message: &'static str },

    #[error("User not authorised")]
    NotAuthorized,

    #[error("That handle already exists")]
    DuplicateHandle,

    #[error("User already liked this post")]
    AlreadyLiked,

    #[error("User has not yet liked this post")]
    NotLiked,

    #[error("Gave up updating {collection} after {attempts} conflicting attempts")]
    Conflict { collection: &'static str, attempts: u32 },

    /// Profile step of account deletion ran, user step failed
    #[error("Account deletion incomplete (profile removed: {profile_removed}): {source}")]
    PartialDelete { profile_removed: bool, source: DatabaseError },

    #[error(transparent)]
    Persistence(DatabaseError),
}

impl ServiceError {
    pub fn no_profile() -> Self {
        ServiceError::NotFound { field: "noprofile", message: "There is no profile for this user" }
    }

    pub fn no_profiles() -> Self {
        ServiceError::NotFound { field: "noprofile", message: "There are no profiles to show" }
    }

    pub fn no_handle() -> Self {
        ServiceError::NotFound { field: "noprofile", message: "There is no profile for this handle" }
    }

    pub fn no_post() -> Self {
        ServiceError::NotFound { field: "nopost", message: "That post does not exist" }
    }

    pub fn no_posts() -> Self {
        ServiceError::NotFound { field: "noposts", message: "There are no posts to show" }
    }

    pub fn no_comment() -> Self {
        ServiceError::NotFound { field: "nocomment", message: "That comment does not exist" }
    }

    pub fn no_experience() -> Self {
        ServiceError::NotFound { field: "experience", message: "Experience not found" }
    }

    pub fn no_education() -> Self {
        ServiceError::NotFound { field: "education", message: "Education not found" }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation("handle") => ServiceError::DuplicateHandle,
            other => ServiceError::Persistence(other),
        }
    }
}
