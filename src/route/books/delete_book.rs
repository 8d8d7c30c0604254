use axum::{extract::State, http::StatusCode};

use crate::{error::ApiError, extractor::path::ApiPath};

use super::{BookIdPath, BooksState};

pub async fn delete_book(
    ApiPath(path): ApiPath<BookIdPath>,
    State(state): State<BooksState>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete(path.id)
        .await
        .map_err(|err| state.store_error(err))?;

    tracing::info!(id = path.id, "Book deleted");

    Ok(StatusCode::NO_CONTENT)
}
