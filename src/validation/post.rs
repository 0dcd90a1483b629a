use serde::Deserialize;

use super::{failed, is_empty, is_length, FieldError, FieldErrors, Validation};

pub const TEXT_MIN: usize = 10;
pub const TEXT_MAX: usize = 300;

/// Body of a post or comment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub text: Option<String>,
}

impl PostInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn validate(&self) -> Validation {
        Validation::from_checks([failed(&check_text(self.text.as_deref()))])
    }

    pub fn into_text(self) -> Result<String, FieldErrors> {
        check_text(self.text.as_deref()).map_err(|e| Validation::from_checks([Some(e)]).into_errors())
    }
}

fn check_text(text: Option<&str>) -> Result<String, FieldError> {
    match text {
        Some(text) if !is_empty(Some(text)) => {
            if is_length(text, TEXT_MIN, TEXT_MAX) {
                Ok(text.to_string())
            } else {
                Err(FieldError::new(
                    "text",
                    format!("Text must be between {} and {} characters", TEXT_MIN, TEXT_MAX),
                ))
            }
        }
        _ => Err(FieldError::new("text", "Text field is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_text_within_bounds() {
        for len in [TEXT_MIN, 150, TEXT_MAX] {
            let input = PostInput::new("a".repeat(len));
            assert!(input.validate().is_valid(), "length {} should be valid", len);
        }
    }

    #[test]
    fn rejects_text_outside_bounds() {
        for len in [1, TEXT_MIN - 1, TEXT_MAX + 1] {
            let validation = PostInput::new("a".repeat(len)).validate();
            assert!(!validation.is_valid());
            assert_eq!(
                validation.errors()["text"],
                "Text must be between 10 and 300 characters"
            );
        }
    }

    #[test]
    fn empty_text_yields_single_required_error() {
        for input in [PostInput::default(), PostInput::new(""), PostInput::new("    ")] {
            let validation = input.validate();
            assert_eq!(validation.errors().len(), 1);
            assert_eq!(validation.errors()["text"], "Text field is required");
        }
    }

    #[test]
    fn five_characters_is_invalid_and_ten_is_valid() {
        assert!(PostInput::new("hello").into_text().unwrap_err().contains_key("text"));
        assert_eq!(PostInput::new("0123456789").into_text().unwrap(), "0123456789");
    }
}
