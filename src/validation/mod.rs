//! Input validators.
//!
//! Each rule yields its own `Result`; a validator combines them into a
//! [`Validation`] holding at most one message per field. A field is absent
//! when it is missing, null, or blank after trimming.

pub mod education;
pub mod experience;
pub mod post;
pub mod profile;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

pub use education::EducationInput;
pub use experience::ExperienceInput;
pub use post::PostInput;
pub use profile::{ProfileFields, ProfileInput};

/// Field name -> human readable message
pub type FieldErrors = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Outcome of validating one input record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    errors: FieldErrors,
}

impl Validation {
    /// Combine rule outcomes; the first failure reported for a field wins.
    pub fn from_checks<I>(checks: I) -> Self
    where
        I: IntoIterator<Item = Option<FieldError>>,
    {
        let mut errors = FieldErrors::new();
        for error in checks.into_iter().flatten() {
            errors.entry(error.field.to_string()).or_insert(error.message);
        }
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

impl From<Result<(), FieldErrors>> for Validation {
    fn from(result: Result<(), FieldErrors>) -> Self {
        match result {
            Ok(()) => Self::default(),
            Err(errors) => Self { errors },
        }
    }
}

/// Borrow the error of a rule outcome for [`Validation::from_checks`]
pub(crate) fn failed<T>(result: &Result<T, FieldError>) -> Option<FieldError> {
    result.as_ref().err().cloned()
}

pub fn is_empty(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Inclusive bounds, counted in characters
pub fn is_length(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

pub fn is_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Accepts `YYYY-MM-DD` or RFC 3339
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub(crate) fn required(value: Option<&str>, field: &'static str, message: &str) -> Result<String, FieldError> {
    match value {
        Some(v) if !is_empty(Some(v)) => Ok(v.trim().to_string()),
        _ => Err(FieldError::new(field, message)),
    }
}

/// Blank counts as "not supplied"
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub(crate) fn optional_url(value: Option<&str>, field: &'static str) -> Result<Option<String>, FieldError> {
    match optional(value) {
        Some(v) if !is_url(&v) => Err(FieldError::new(field, "Not a valid URL")),
        other => Ok(other),
    }
}

pub(crate) fn required_date(value: Option<&str>, field: &'static str, message: &str) -> Result<DateTime<Utc>, FieldError> {
    let raw = required(value, field, message)?;
    parse_date(&raw).ok_or_else(|| FieldError::new(field, "Not a valid date"))
}

pub(crate) fn optional_date(value: Option<&str>, field: &'static str) -> Result<Option<DateTime<Utc>>, FieldError> {
    match optional(value) {
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| FieldError::new(field, "Not a valid date")),
        None => Ok(None),
    }
}
