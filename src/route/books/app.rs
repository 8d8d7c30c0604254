use axum::{routing::get, Router};

use super::BooksState;

pub fn app() -> Router<BooksState> {
    Router::<BooksState>::new()
        .route(
            "/books",
            get(super::list_books::list_books).post(super::create_book::create_book),
        )
        .route(
            "/books/available",
            get(super::list_books::list_available_books),
        )
        .route(
            "/books/:id",
            get(super::get_book::get_book)
                .put(super::update_book::update_book)
                .delete(super::delete_book::delete_book),
        )
}
