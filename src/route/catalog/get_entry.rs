use axum::{extract::State, Json};

use crate::{error::ApiError, extractor::path::ApiPath, store::memory::CatalogEntry};

use super::{CatalogState, EntryIdPath};

pub async fn get_entry(
    ApiPath(path): ApiPath<EntryIdPath>,
    State(state): State<CatalogState>,
) -> Result<Json<CatalogEntry>, ApiError> {
    state
        .store
        .get(path.id)
        .await
        .map(Json)
        .map_err(|err| state.store_error(err))
}
