use crate::domain::{Book, BookDetails};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod sqlite;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

// a BookRepository is shared between request handlers behind an Arc
// sqlx::Pool is thread safe, so implementations only need to hold a clone of it
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, details: &BookDetails) -> RepositoryResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Book>>;
    async fn get_all(&self) -> RepositoryResult<Vec<Book>>;

    // write operations return the number of rows affected, 0 when the id is absent
    async fn update(&self, id: i64, details: &BookDetails) -> RepositoryResult<u64>;
    async fn delete(&self, id: i64) -> RepositoryResult<u64>;
}
