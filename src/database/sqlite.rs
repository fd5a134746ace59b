use crate::database::{BookRepository, RepositoryError, RepositoryResult};
use crate::domain::{Book, BookDetails};
use async_trait::async_trait;
use sqlx::migrate::MigrateError;
use sqlx::{Pool, Sqlite};
use std::future::Future;
use std::time::Duration;

/// Creates the `books` table if it is not there yet.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
    query_timeout: Duration,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    // every statement gets the same upper bound, no request waits on the database forever
    async fn bounded<T, F>(&self, operation: F) -> RepositoryResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, operation).await {
            Ok(result) => result.map_err(RepositoryError::from),
            Err(_) => Err(RepositoryError::Timeout(self.query_timeout)),
        }
    }
}

#[async_trait]
impl BookRepository for SqliteRepository {
    async fn insert(&self, details: &BookDetails) -> RepositoryResult<i64> {
        let id = self
            .bounded(
                sqlx::query_scalar::<_, i64>(
                    "INSERT INTO books (title, author, price) VALUES (?, ?, ?) RETURNING id",
                )
                .bind(&details.title)
                .bind(&details.author)
                .bind(details.price)
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::debug!(book_id = id, "inserted book row");
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Book>> {
        self.bounded(
            sqlx::query_as::<_, Book>("SELECT id, title, author, price FROM books WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Book>> {
        self.bounded(
            sqlx::query_as::<_, Book>("SELECT id, title, author, price FROM books ORDER BY id")
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn update(&self, id: i64, details: &BookDetails) -> RepositoryResult<u64> {
        let result = self
            .bounded(
                sqlx::query("UPDATE books SET title = ?, author = ?, price = ? WHERE id = ?")
                    .bind(&details.title)
                    .bind(&details.author)
                    .bind(details.price)
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        tracing::debug!(book_id = id, rows = result.rows_affected(), "updated book row");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<u64> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM books WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await?;

        tracing::debug!(book_id = id, rows = result.rows_affected(), "deleted book row");
        Ok(result.rows_affected())
    }
}
