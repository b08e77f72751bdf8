//! Review Service
//!
//! Business logic for the review ledger.

use chrono::Utc;
use uuid::Uuid;
use vendo_core::domain::review::{Review, ReviewResponse};
use vendo_core::dto::review::{PostResponse, PostReview};

use crate::error::{EngineError, Result};
use crate::service::rating;
use crate::store::Stores;

/// Post a new review
///
/// Reviews are independent of jobs and providers; any caller may post one.
pub fn add_review(stores: &Stores, req: &PostReview) -> Result<Review> {
    rating::validate_rating(req.rating)?;

    let review = stores.reviews.create(req);

    tracing::info!("Review added: {} ({} star(s))", review.id, review.rating);

    Ok(review)
}

/// Append a response to an existing review's thread
pub fn respond_to_review(stores: &Stores, review_id: Uuid, req: &PostResponse) -> Result<()> {
    let response = ReviewResponse {
        text: req.text.clone(),
        author: req.author,
        created_at: Utc::now(),
    };

    if !stores.reviews.respond(&review_id, response) {
        return Err(EngineError::ReviewNotFound(review_id));
    }

    tracing::debug!("Response added to review: {}", review_id);

    Ok(())
}

/// List all reviews with their responses, in insertion order
pub fn list_reviews(stores: &Stores) -> Vec<Review> {
    stores.reviews.list()
}
