use std::fmt;

use super::errors::DomainError;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collects field errors so a payload is rejected with every problem at once.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Trims `value`, requires it to be non-empty and at most `max_len` characters.
    pub fn required(&mut self, field: &'static str, value: &str, max_len: usize) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, "must not be empty");
        } else {
            self.check_len(field, value, max_len);
        }
        value.to_string()
    }

    /// Trims `value`; empty input becomes `None`.
    pub fn optional(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max_len: usize,
    ) -> Option<String> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        self.check_len(field, value, max_len);
        Some(value.to_string())
    }

    /// Like [`FieldErrors::required`], but also restricts the value to `[a-z0-9_-]`.
    pub fn slug(&mut self, field: &'static str, value: &str, max_len: usize) -> String {
        let value = self.required(field, value, max_len);
        if !value.is_empty() && !is_slug(&value) {
            self.push(
                field,
                "may only contain lowercase letters, digits, '-' and '_'",
            );
        }
        value
    }

    fn check_len(&mut self, field: &'static str, value: &str, max_len: usize) {
        if value.chars().count() > max_len {
            self.push(field, format!("must be at most {max_len} characters"));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.errors))
        }
    }
}

pub fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_flags_blank_values() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required("first_name", "  Ivan ", 255), "Ivan");
        assert!(errors.is_empty());

        errors.required("last_name", "   ", 255);
        let Err(DomainError::Validation(fields)) = errors.finish() else {
            panic!("expected a validation error");
        };
        assert_eq!(fields, vec![FieldError::new("last_name", "must not be empty")]);
    }

    #[test]
    fn length_is_counted_in_characters() {
        let mut errors = FieldErrors::new();
        // Cyrillic letters are two bytes each in UTF-8.
        errors.required("title", "Масло", 5);
        assert!(errors.is_empty());
        errors.required("title", "Моторное", 5);
        assert!(!errors.is_empty());
    }

    #[test]
    fn optional_turns_blank_into_none() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.optional("comments", Some("  "), 10), None);
        assert_eq!(errors.optional("comments", None, 10), None);
        assert_eq!(
            errors.optional("comments", Some(" call first "), 20),
            Some("call first".to_string())
        );
        assert!(errors.finish().is_ok());
    }

    #[test]
    fn slug_rejects_uppercase_and_spaces() {
        assert!(is_slug("light_motors"));
        assert!(is_slug("castrol-5w30"));
        assert!(!is_slug("Light Motors"));
        assert!(!is_slug(""));

        let mut errors = FieldErrors::new();
        errors.slug("slug", "Bad Slug", 200);
        assert!(errors.finish().is_err());
    }
}
