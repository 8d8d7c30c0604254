use axum::extract::State;

use crate::{
    error::ApiError,
    extractor::{json::ApiJson, path::ApiPath},
    store::book::BookFields,
};

use super::{get_book::GetBookResponse, BookIdPath, BooksState};

pub async fn update_book(
    ApiPath(path): ApiPath<BookIdPath>,
    State(state): State<BooksState>,
    ApiJson(payload): ApiJson<BookFields>,
) -> Result<GetBookResponse, ApiError> {
    let book = state
        .store
        .update(path.id, payload)
        .await
        .map_err(|err| state.store_error(err))?;

    tracing::info!(id = book.id, "Book updated");

    Ok(GetBookResponse(book))
}
