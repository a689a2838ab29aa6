use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::content::{Review, ReviewDraft, Slide, SlideDraft};
use crate::domain::errors::DomainError;
use crate::domain::ports::ContentRepository;
use crate::schema::{reviews, slides};

use super::models::{ReviewRow, SlideRow};

pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ContentRepository for DieselContentRepository {
    fn insert_review(&self, draft: ReviewDraft) -> Result<Review, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(reviews::table)
            .values(&ReviewRow {
                id: Uuid::new_v4(),
                title: draft.title,
                body: draft.body,
                created_at: Utc::now(),
            })
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn latest_reviews(&self, limit: i64) -> Result<Vec<Review>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = reviews::table
            .select(ReviewRow::as_select())
            .order((reviews::created_at.desc(), reviews::id.desc()))
            .limit(limit)
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    fn slides(&self) -> Result<Vec<Slide>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = slides::table
            .select(SlideRow::as_select())
            .order((slides::created_at.asc(), slides::id.asc()))
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Slide::from).collect())
    }

    fn insert_slide(&self, draft: SlideDraft) -> Result<Slide, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(slides::table)
            .values(&SlideRow {
                id: Uuid::new_v4(),
                name: draft.name,
                title: draft.title.unwrap_or_default(),
                description: draft.description.unwrap_or_default(),
                image: draft.image,
                created_at: Utc::now(),
            })
            .returning(SlideRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }
}
