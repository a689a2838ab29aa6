use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::validation::FieldErrors;

/// Number of reviews shown on the feedback page.
pub const LATEST_REVIEWS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub title: String,
    pub body: String,
}

impl ReviewDraft {
    pub fn validate(self) -> Result<ReviewDraft, DomainError> {
        let mut errors = FieldErrors::new();
        let title = errors.required("title", &self.title, 50);
        let body = errors.required("body", &self.body, 255);
        errors.finish()?;
        Ok(ReviewDraft { title, body })
    }
}

/// An entry of the homepage slider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SlideDraft {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: String,
}

impl SlideDraft {
    pub fn validate(self) -> Result<SlideDraft, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", &self.name, 100);
        let title = errors.optional("title", self.title.as_deref(), 150);
        let description = errors.optional("description", self.description.as_deref(), 150);
        let image = errors.required("image", &self.image, 255);
        errors.finish()?;
        Ok(SlideDraft {
            name,
            title,
            description,
            image,
        })
    }
}
