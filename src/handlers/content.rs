use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use crate::domain::content::{Review, ReviewDraft, Slide, SlideDraft};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            title: r.title,
            body: r.body,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SlideRequest {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Path of an already uploaded image
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlideResponse {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

impl From<Slide> for SlideResponse {
    fn from(s: Slide) -> Self {
        Self {
            id: s.id,
            name: s.name,
            title: s.title,
            description: s.description,
            image: s.image,
        }
    }
}

#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "The five newest reviews", body = Vec<ReviewResponse>),
    ),
    tag = "content"
)]
pub async fn latest_reviews(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reviews = blocking(move || state.content.latest_reviews()).await?;
    let body: Vec<ReviewResponse> = reviews.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/reviews",
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review stored", body = ReviewResponse),
        (status = 422, description = "Invalid fields"),
    ),
    tag = "content"
)]
pub async fn create_review(
    state: web::Data<AppState>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let review = blocking(move || {
        state.content.add_review(ReviewDraft {
            title: body.title,
            body: body.body,
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

#[utoipa::path(
    get,
    path = "/slides",
    responses(
        (status = 200, description = "Homepage slides", body = Vec<SlideResponse>),
    ),
    tag = "content"
)]
pub async fn list_slides(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let slides = blocking(move || state.content.slides()).await?;
    let body: Vec<SlideResponse> = slides.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/slides",
    request_body = SlideRequest,
    responses(
        (status = 201, description = "Slide stored", body = SlideResponse),
        (status = 422, description = "Invalid fields"),
    ),
    tag = "content"
)]
pub async fn create_slide(
    state: web::Data<AppState>,
    body: web::Json<SlideRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let slide = blocking(move || {
        state.content.add_slide(SlideDraft {
            name: body.name,
            title: body.title,
            description: body.description,
            image: body.image,
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(SlideResponse::from(slide)))
}
