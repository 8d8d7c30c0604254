use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::ApiError,
    extractor::json::ApiJson,
    store::book::{Book, BookFields},
};

use super::BooksState;

#[derive(Debug)]
pub struct CreateBookResponse(pub Book);

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub async fn create_book(
    State(state): State<BooksState>,
    ApiJson(payload): ApiJson<BookFields>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .store
        .create(payload)
        .await
        .map_err(|err| state.store_error(err))?;

    tracing::info!(id = book.id, "Book created");

    Ok(CreateBookResponse(book))
}
