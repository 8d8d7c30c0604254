use axum::{routing::get, Router};

use super::CatalogState;

pub fn app() -> Router<CatalogState> {
    Router::<CatalogState>::new()
        .route(
            "/book",
            get(super::list_entries::list_entries).post(super::create_entry::create_entry),
        )
        .route("/book/:id", get(super::get_entry::get_entry))
}
