use crate::domain::content::{Review, ReviewDraft, Slide, SlideDraft, LATEST_REVIEWS};
use crate::domain::errors::DomainError;
use crate::domain::ports::ContentRepository;

pub struct ContentService<R> {
    repo: R,
}

impl<R: ContentRepository> ContentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_review(&self, draft: ReviewDraft) -> Result<Review, DomainError> {
        self.repo.insert_review(draft.validate()?)
    }

    pub fn latest_reviews(&self) -> Result<Vec<Review>, DomainError> {
        self.repo.latest_reviews(LATEST_REVIEWS)
    }

    pub fn slides(&self) -> Result<Vec<Slide>, DomainError> {
        self.repo.slides()
    }

    pub fn add_slide(&self, draft: SlideDraft) -> Result<Slide, DomainError> {
        self.repo.insert_slide(draft.validate()?)
    }
}
