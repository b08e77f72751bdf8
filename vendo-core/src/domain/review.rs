//! Review domain model
//!
//! Represents marketplace reviews and their threaded responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A review left on the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier for the review
    pub id: Uuid,

    /// Score on the 1..=5 scale
    pub rating: u8,

    /// Free-form review text
    pub text: String,

    /// Whether the author wrote as a provider or as a user
    pub author: AuthorRole,

    /// When the review was posted
    pub created_at: DateTime<Utc>,

    /// Responses attached to this review, oldest first
    pub responses: Vec<ReviewResponse>,
}

impl Review {
    /// Appends a response to the thread
    pub fn add_response(&mut self, response: ReviewResponse) {
        self.responses.push(response);
    }
}

/// A response inside a review thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Free-form response text
    pub text: String,

    /// Whether the author wrote as a provider or as a user
    pub author: AuthorRole,

    /// When the response was posted
    pub created_at: DateTime<Utc>,
}

/// The role a review or response was authored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorRole {
    /// Written by a compute provider
    Provider,

    /// Written by a marketplace user
    User,
}

impl AuthorRole {
    /// Returns true when the author wrote as a provider
    pub fn is_provider(&self) -> bool {
        matches!(self, AuthorRole::Provider)
    }
}

impl std::fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorRole::Provider => write!(f, "Provider"),
            AuthorRole::User => write!(f, "User"),
        }
    }
}
