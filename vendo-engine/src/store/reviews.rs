//! Review ledger store
//!
//! Handles all review state. Reviews and their threaded responses are
//! append-only and listed in raw insertion order.

use std::sync::Mutex;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use vendo_core::domain::review::{Review, ReviewResponse};
use vendo_core::dto::review::PostReview;

/// In-memory review ledger
#[derive(Debug, Default)]
pub struct ReviewLedger {
    reviews: DashMap<Uuid, Review>,
    /// Review identifiers in the order they were posted
    order: Mutex<Vec<Uuid>>,
}

impl ReviewLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new review with a fresh identifier and timestamp
    pub fn create(&self, req: &PostReview) -> Review {
        let review = Review {
            id: Uuid::new_v4(),
            rating: req.rating,
            text: req.text.clone(),
            author: req.author,
            created_at: Utc::now(),
            responses: Vec::new(),
        };
        self.order
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(review.id);
        self.reviews.insert(review.id, review.clone());
        review
    }

    /// Appends a response, returning false when the review is unknown
    pub fn respond(&self, review_id: &Uuid, response: ReviewResponse) -> bool {
        match self.reviews.get_mut(review_id) {
            Some(mut entry) => {
                entry.add_response(response);
                true
            }
            None => false,
        }
    }

    /// Returns a snapshot of a single review thread
    pub fn get(&self, review_id: &Uuid) -> Option<Review> {
        self.reviews.get(review_id).map(|entry| entry.clone())
    }

    /// Lists all reviews with their responses, in insertion order
    pub fn list(&self) -> Vec<Review> {
        let ids: Vec<Uuid> = self.order.lock().unwrap_or_else(|e| e.into_inner()).clone();
        ids.iter()
            .filter_map(|id| self.reviews.get(id).map(|entry| entry.clone()))
            .collect()
    }

    /// Number of reviews posted
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Returns true when no review has been posted
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Inserts a fully formed review at the end of the order
    pub(crate) fn insert(&self, review: Review) {
        self.order
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(review.id);
        self.reviews.insert(review.id, review);
    }
}
