use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{error::ApiError, extractor::query::ApiQuery, store::book::Book};

use super::BooksState;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListBooksQuery {
    /// Only books whose author matches exactly. Empty means no filter.
    pub author: Option<String>,
}

#[derive(Debug)]
pub struct ListBooksResponse(pub Vec<Book>);

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

pub async fn list_books(
    ApiQuery(query): ApiQuery<ListBooksQuery>,
    State(state): State<BooksState>,
) -> Result<ListBooksResponse, ApiError> {
    let books = match query.author.filter(|author| !author.is_empty()) {
        Some(author) => state.store.list_by_author(&author).await,
        None => state.store.list_all().await,
    };

    books
        .map(ListBooksResponse)
        .map_err(|err| state.store_error(err))
}

pub async fn list_available_books(
    State(state): State<BooksState>,
) -> Result<ListBooksResponse, ApiError> {
    state
        .store
        .list_available()
        .await
        .map(ListBooksResponse)
        .map_err(|err| state.store_error(err))
}
