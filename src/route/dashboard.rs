use axum::extract::State;

/// Plain-text welcome message answered for every unmatched path.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard(pub &'static str);

pub const BOOKS_DASHBOARD: Dashboard = Dashboard(
    "This is the BookStore dashboard. To get all the books go to /books, \
     or /books?author=<name> to filter by author.\n\
     Available books are listed at /books/available and a specific book at /books/<id>.\n\
     Books can be added with POST /books, changed with PUT /books/<id> \
     and removed with DELETE /books/<id>.",
);

pub const CATALOG_DASHBOARD: Dashboard = Dashboard(
    "This is the BookStore dashboard. To get all the books go to /book.\n\
     If you want a specific book go to /book/<id> (id = 1, 2, 3, 4, 5).\n\
     You can add a book on the /book route too, but you need to use the POST method.",
);

pub async fn dashboard(State(Dashboard(message)): State<Dashboard>) -> &'static str {
    message
}
