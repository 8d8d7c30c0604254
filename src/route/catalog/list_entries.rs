use axum::{extract::State, Json};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{extractor::query::ApiQuery, store::memory::CatalogEntry};

use super::CatalogState;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListEntriesQuery {
    /// Empty means no filter.
    pub author: Option<String>,
}

pub async fn list_entries(
    ApiQuery(query): ApiQuery<ListEntriesQuery>,
    State(state): State<CatalogState>,
) -> Json<Vec<CatalogEntry>> {
    let entries = match query.author.filter(|author| !author.is_empty()) {
        Some(author) => state.store.list_by_author(&author).await,
        None => state.store.load().await,
    };

    Json(entries)
}
