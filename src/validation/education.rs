use serde::Deserialize;
use uuid::Uuid;

use super::{failed, optional, optional_date, required, required_date, FieldErrors, Validation};
use crate::database::models::Education;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationInput {
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub fieldofstudy: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EducationInput {
    pub fn validate(&self) -> Validation {
        self.clone().into_education().map(|_| ()).into()
    }

    pub fn into_education(self) -> Result<Education, FieldErrors> {
        let school = required(self.school.as_deref(), "school", "School field is required");
        let degree = required(self.degree.as_deref(), "degree", "Degree field is required");
        let fieldofstudy = required(self.fieldofstudy.as_deref(), "fieldofstudy", "Field of study field is required");
        let from = required_date(self.from.as_deref(), "from", "From date field is required");
        let to = optional_date(self.to.as_deref(), "to");

        let validation = Validation::from_checks([
            failed(&school),
            failed(&degree),
            failed(&fieldofstudy),
            failed(&from),
            failed(&to),
        ]);

        match (school, degree, fieldofstudy, from, to) {
            (Ok(school), Ok(degree), Ok(fieldofstudy), Ok(from), Ok(to)) => Ok(Education {
                id: Uuid::new_v4(),
                school,
                degree,
                fieldofstudy,
                from,
                to,
                current: self.current.unwrap_or(false),
                description: optional(self.description.as_deref()),
            }),
            _ => Err(validation.into_errors()),
        }
    }
}
