use axum::{body::Body, http::Request};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tower::ServiceExt;

use crate::database::sqlite::SqliteRepository;
use crate::database::BookRepository;
use crate::tests::unit_sqlite_books_database::{
    create_mock_details, setup_test_pool, TEST_QUERY_TIMEOUT,
};
use crate::{build_router, AppState};

// the "Hammer" test: many clients reading random books at the same time through one shared pool
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // heavy; run with `cargo test -- --ignored`
async fn test_api_hammer_random_reads() {
    let book_count: i64 = 500;
    let request_count = 5000;

    let repo = SqliteRepository::new(setup_test_pool().await, TEST_QUERY_TIMEOUT);
    for i in 0..book_count {
        repo.insert(&create_mock_details(&format!("Book {}", i), 9.99))
            .await
            .unwrap();
    }

    let app = Arc::new(build_router(AppState {
        repo: Arc::new(repo),
    }));

    let mut set = JoinSet::new();
    let start = Instant::now();

    for _ in 0..request_count {
        let app_clone = app.clone();
        set.spawn(async move {
            let uri = {
                let mut rng = rand::rng();
                format!("/books/{}", rng.random_range(1..=book_count))
            };

            let response = app_clone
                .as_ref()
                .clone()
                .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), 200, "GET {}", uri);
        });
    }

    while let Some(joined) = set.join_next().await {
        joined.unwrap();
    }

    let duration = start.elapsed();
    println!(
        "served {} random reads over {} books in {:?} ({:.2} req/s)",
        request_count,
        book_count,
        duration,
        request_count as f64 / duration.as_secs_f64()
    );
}
