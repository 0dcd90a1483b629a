// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::database::DatabaseError;
use crate::services::ServiceError;
use crate::validation::FieldErrors;

/// HTTP API error. Every variant renders as a field-name -> message map.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(FieldErrors),

    // 401 Unauthorized
    Unauthorized(FieldErrors),

    // 404 Not Found
    NotFound(FieldErrors),

    // 409 Conflict
    Conflict(FieldErrors),

    // 500 Internal Server Error
    InternalServerError(FieldErrors),

    // 503 Service Unavailable
    ServiceUnavailable(FieldErrors),
}

fn single(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), message.into());
    errors
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn fields(&self) -> &FieldErrors {
        match self {
            ApiError::BadRequest(errors)
            | ApiError::Unauthorized(errors)
            | ApiError::NotFound(errors)
            | ApiError::Conflict(errors)
            | ApiError::InternalServerError(errors)
            | ApiError::ServiceUnavailable(errors) => errors,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.fields()).unwrap_or(Value::Null)
    }

    /// The mutation endpoints report a missing document as a bad request
    pub fn not_found_as_bad_request(self) -> Self {
        match self {
            ApiError::NotFound(errors) => ApiError::BadRequest(errors),
            other => other,
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(errors: FieldErrors) -> Self {
        ApiError::BadRequest(errors)
    }

    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(single(field, message))
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::BadRequest(single("body", message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(single("unauthorized", message))
    }

    pub fn not_found(field: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound(single(field, message))
    }

    pub fn conflict(field: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict(single(field, message))
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(single("server", message))
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(single("server", message))
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_connection() {
            tracing::error!("Database unavailable: {}", err);
            return ApiError::service_unavailable("Database temporarily unavailable");
        }
        match err {
            DatabaseError::ConfigMissing(key) => {
                tracing::error!("Missing configuration: {}", key);
                ApiError::service_unavailable("Storage is not configured")
            }
            DatabaseError::UniqueViolation(field) => {
                ApiError::bad_request(field, format!("That {} already exists", field))
            }
            DatabaseError::VersionConflict { collection, .. } => {
                ApiError::conflict(collection, "The document was modified concurrently, please retry")
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => ApiError::validation(errors),
            ServiceError::NotFound { field, message } => ApiError::not_found(field, message),
            ServiceError::NotAuthorized => ApiError::Unauthorized(single("notauthorised", "User not authorised")),
            ServiceError::DuplicateHandle => ApiError::bad_request("handle", "That handle already exists"),
            ServiceError::AlreadyLiked => ApiError::bad_request("alreadyliked", "User already liked this post"),
            ServiceError::NotLiked => ApiError::bad_request("notliked", "You have not yet liked this post"),
            ServiceError::Conflict { collection, attempts } => {
                tracing::warn!("Update of {} abandoned after {} attempts", collection, attempts);
                ApiError::conflict(collection, "The document was modified concurrently, please retry")
            }
            ServiceError::PartialDelete { profile_removed, source } => {
                tracing::error!("Partial account deletion: {}", source);
                let profile_step = if profile_removed { "Profile was deleted" } else { "No profile was found" };
                ApiError::InternalServerError(single(
                    "user",
                    format!("{} but the user account could not be deleted", profile_step),
                ))
            }
            ServiceError::Persistence(db) => db.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut messages: Vec<String> = self
            .fields()
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        messages.sort();
        write!(f, "{} ({})", self.status_code(), messages.join(", "))
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
