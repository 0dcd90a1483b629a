use serde::Deserialize;
use uuid::Uuid;

use super::{failed, optional, optional_date, required, required_date, FieldErrors, Validation};
use crate::database::models::Experience;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExperienceInput {
    pub fn validate(&self) -> Validation {
        self.clone().into_experience().map(|_| ()).into()
    }

    /// Validate and mint a new entry with a fresh identity
    pub fn into_experience(self) -> Result<Experience, FieldErrors> {
        let title = required(self.title.as_deref(), "title", "Job title field is required");
        let company = required(self.company.as_deref(), "company", "Company field is required");
        let from = required_date(self.from.as_deref(), "from", "From date field is required");
        let to = optional_date(self.to.as_deref(), "to");

        let validation = Validation::from_checks([failed(&title), failed(&company), failed(&from), failed(&to)]);

        match (title, company, from, to) {
            (Ok(title), Ok(company), Ok(from), Ok(to)) => Ok(Experience {
                id: Uuid::new_v4(),
                title,
                company,
                location: optional(self.location.as_deref()),
                from,
                to,
                current: self.current.unwrap_or(false),
                description: optional(self.description.as_deref()),
            }),
            _ => Err(validation.into_errors()),
        }
    }
}
