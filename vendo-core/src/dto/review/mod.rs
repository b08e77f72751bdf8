//! Review DTOs
//!
//! Data transfer objects for posting reviews and responses.

use serde::{Deserialize, Serialize};

use crate::domain::review::AuthorRole;

/// Request to post a new review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostReview {
    /// Score on the 1..=5 scale
    pub rating: u8,

    /// Free-form review text
    pub text: String,

    /// Role the review is authored under
    pub author: AuthorRole,
}

/// Request to respond to an existing review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    /// Free-form response text
    pub text: String,

    /// Role the response is authored under
    pub author: AuthorRole,
}
