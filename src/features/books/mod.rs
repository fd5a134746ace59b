pub mod model;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use model::OperationResult;

use crate::domain::BookDetails;
use crate::features::response::{respond_with_json, ApiError};
use crate::AppState;

pub fn books_router() -> Router<AppState> {
    Router::new()
        .route("/books", get(get_all_books_handler).post(create_book_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
}

async fn create_book_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookDetails>, JsonRejection>,
) -> Result<Response, ApiError> {
    let details = validated_details(payload)?;

    let id = state.repo.insert(&details).await?;
    tracing::info!(book_id = id, "book created: {}", details.with_id(id));

    Ok(respond_with_json(
        StatusCode::CREATED,
        &OperationResult::new(id, "Book created successfully"),
    ))
}

async fn get_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_book_id(&raw_id)?;

    match state.repo.get_by_id(id).await? {
        Some(book) => {
            tracing::debug!(book = %book, "book fetched");
            Ok(respond_with_json(StatusCode::OK, &book))
        }
        None => Err(ApiError::NotFound(id)),
    }
}

async fn get_all_books_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let books = state.repo.get_all().await?;
    Ok(respond_with_json(StatusCode::OK, &books))
}

async fn update_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<BookDetails>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_book_id(&raw_id)?;
    let details = validated_details(payload)?;

    let updated_rows = state.repo.update(id, &details).await?;
    if updated_rows == 0 {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!(book_id = id, rows = updated_rows, "book updated");

    Ok(respond_with_json(
        StatusCode::OK,
        &OperationResult::new(id, format!("Book successfully updated: {}", updated_rows)),
    ))
}

async fn delete_book_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_book_id(&raw_id)?;

    let deleted_rows = state.repo.delete(id).await?;
    if deleted_rows == 0 {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!(book_id = id, rows = deleted_rows, "book deleted");

    Ok(respond_with_json(
        StatusCode::OK,
        &OperationResult::new(id, format!("Book deleted successfully: {}", deleted_rows)),
    ))
}

fn parse_book_id(raw_id: &str) -> Result<i64, ApiError> {
    raw_id
        .parse::<i64>()
        .map_err(|e| ApiError::InvalidId(format!("{:?}: {}", raw_id, e)))
}

// create and update share one rule set, so an update can't store a book create would reject
fn validated_details(
    payload: Result<Json<BookDetails>, JsonRejection>,
) -> Result<BookDetails, ApiError> {
    let Json(details) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    details.validate()?;
    Ok(details)
}
