use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    extractor::json::ApiJson,
    store::memory::{CatalogEntry, NewCatalogEntry},
};

use super::CatalogState;

pub async fn create_entry(
    State(state): State<CatalogState>,
    ApiJson(payload): ApiJson<NewCatalogEntry>,
) -> Result<(StatusCode, Json<CatalogEntry>), ApiError> {
    let entry = state
        .store
        .create(payload)
        .await
        .map_err(|err| state.store_error(err))?;

    tracing::info!(id = entry.id, "Catalog entry created");

    Ok((StatusCode::CREATED, Json(entry)))
}
