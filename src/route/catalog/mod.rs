//! Routes of the in-memory catalog, mounted under `/book`.

use serde::Deserialize;

use crate::{state::ApiState, store::memory::MemoryCatalog};

pub mod app;
pub mod create_entry;
pub mod get_entry;
pub mod list_entries;

pub type CatalogState = ApiState<MemoryCatalog>;

#[derive(Debug, Deserialize)]
pub struct EntryIdPath {
    pub id: u64,
}
