use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored book. `id` is assigned by the database on insert and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, Display)]
#[display("#{} \"{}\" by {}", id, title, author)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
}

/// The writable fields of a book, as sent in create and update requests.
/// Any `id` in the request body is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub price: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("price must be a positive number")]
    NonPositivePrice,
}

impl BookDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        // NaN fails this comparison too
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(ValidationError::NonPositivePrice);
        }
        Ok(())
    }

    pub fn with_id(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
        }
    }
}
