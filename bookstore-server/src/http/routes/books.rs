//! Book endpoints
//!
//! Thin wrappers over BookRepo: each handler validates shape, calls one
//! repo method, and maps the result. Connection acquire/release and
//! commit/rollback discipline live in the repo layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::models::{Book, BookDraft};
use crate::state::AppState;

/// Delete confirmation response
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /books - list all books, ordered by id
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books().list().await?;
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Book>, ApiError> {
    let book = state.books().get(id).await?;
    Ok(Json(book))
}

/// POST /books - create a book
async fn create_book(
    State(state): State<AppState>,
    Json(draft): Json<BookDraft>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    draft.validate()?;
    let book = state.books().create(&draft).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /books/{id} - replace all business fields of a book
async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<Book>, ApiError> {
    draft.validate()?;
    let book = state.books().update(id, &draft).await?;
    Ok(Json(book))
}

/// DELETE /books/{id} - delete a book
async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.books().delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "book deleted successfully",
    }))
}

/// Book routes, mounted under the /api/v1 prefix
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_confirmation_shape() {
        let body = DeleteResponse {
            message: "book deleted successfully",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "book deleted successfully"})
        );
    }

    // End-to-end route tests need a database behind the pool.
    // Run with DB_* vars set: cargo test -p bookstore-server -- --ignored
}
