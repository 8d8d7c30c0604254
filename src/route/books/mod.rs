//! Routes of the file-backed store, mounted under `/books`.

use serde::Deserialize;

use crate::{state::ApiState, store::file::FileBookStore};

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

pub type BooksState = ApiState<FileBookStore>;

#[derive(Debug, Deserialize)]
pub struct BookIdPath {
    pub id: u64,
}
