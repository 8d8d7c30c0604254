use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{error::ApiError, extractor::path::ApiPath, store::book::Book};

use super::{BookIdPath, BooksState};

#[derive(Debug)]
pub struct GetBookResponse(pub Book);

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

pub async fn get_book(
    ApiPath(path): ApiPath<BookIdPath>,
    State(state): State<BooksState>,
) -> Result<GetBookResponse, ApiError> {
    state
        .store
        .get(path.id)
        .await
        .map(GetBookResponse)
        .map_err(|err| state.store_error(err))
}
