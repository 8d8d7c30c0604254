use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::{
    validation::{boolean, non_blank_string, present, Field, FieldError},
    Identified,
};

const TITLE: Field = Field::new("title", "title must be a non-empty string");
const AUTHOR: Field = Field::new("author", "author must be a non-empty string");
const AVAILABLE: Field = Field::new("available", "available must be a boolean");

/// A record of the file-backed store.
///
/// Records are not validated on load. Any element of the backing array
/// decodes: a missing, null or mistyped known field takes its default (`0`,
/// `""` or `false`), and unknown fields are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub available: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    fn new(id: u64, title: &str, author: &str, available: bool) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            available,
            extra: Map::new(),
        }
    }

    fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }

        if let Some(author) = patch.author {
            self.author = author;
        }

        if let Some(available) = patch.available {
            self.available = available;
        }
    }
}

impl From<Value> for Book {
    /// Elements that are not JSON objects decode to an empty record.
    fn from(value: Value) -> Self {
        let Value::Object(mut extra) = value else {
            return Book::default();
        };

        Book {
            id: take(&mut extra, "id"),
            title: take(&mut extra, "title"),
            author: take(&mut extra, "author"),
            available: take(&mut extra, "available"),
            extra,
        }
    }
}

/// Removes `key` from `record` and decodes it, falling back to the default.
fn take<T: DeserializeOwned + Default>(record: &mut Map<String, Value>, key: &str) -> T {
    record
        .remove(key)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

impl Identified for Book {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Records written when the backing file is missing or unusable.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new(1, "Atomic Habits", "James Clear", true),
        Book::new(2, "Deep Work", "Cal Newport", true),
    ]
}

/// Create and update payload.
///
/// Every field is optional so the same shape serves both validation modes.
/// Values are kept as raw JSON: `None` means absent, while an explicit `null`
/// or a value of the wrong type is present and fails that field's rule. A
/// caller-supplied `id` is not part of it and is ignored.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct BookFields {
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<String>")]
    #[validate(custom(function = "non_blank_string"))]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<String>")]
    #[validate(custom(function = "non_blank_string"))]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<bool>")]
    #[validate(custom(function = "boolean"))]
    pub available: Option<Value>,
}

/// A fully validated create payload with trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl NewBook {
    pub(crate) fn with_id(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            available: self.available,
            extra: Map::new(),
        }
    }
}

/// A validated update payload with trimmed text. Absent fields stay unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub available: Option<bool>,
}

impl BookFields {
    /// Full mode: reports the first failure in the order title, author, available.
    pub fn into_new_book(self) -> Result<NewBook, FieldError> {
        let errors = self.validate().err();

        let title = TITLE.required(self.title)?;
        TITLE.check(errors.as_ref())?;

        let author = AUTHOR.required(self.author)?;
        AUTHOR.check(errors.as_ref())?;

        let available = AVAILABLE.required(self.available)?;
        AVAILABLE.check(errors.as_ref())?;

        Ok(NewBook {
            title: TITLE.text(title)?,
            author: AUTHOR.text(author)?,
            available: AVAILABLE.flag(available)?,
        })
    }

    /// Partial mode: only the fields present are checked.
    pub fn into_patch(self) -> Result<BookPatch, FieldError> {
        let errors = self.validate().err();

        TITLE.check(errors.as_ref())?;
        AUTHOR.check(errors.as_ref())?;
        AVAILABLE.check(errors.as_ref())?;

        Ok(BookPatch {
            title: self.title.map(|value| TITLE.text(value)).transpose()?,
            author: self.author.map(|value| AUTHOR.text(value)).transpose()?,
            available: self.available.map(|value| AVAILABLE.flag(value)).transpose()?,
        })
    }
}

pub fn find_by_id(books: &[Book], id: u64) -> Option<&Book> {
    books.iter().find(|book| book.id == id)
}

pub fn filter_by_author(books: &[Book], author: &str) -> Vec<Book> {
    books
        .iter()
        .filter(|book| book.author == author)
        .cloned()
        .collect()
}

pub fn filter_available(books: &[Book]) -> Vec<Book> {
    books.iter().filter(|book| book.available).cloned().collect()
}

/// Applies `patch` to the book with `id` and returns the updated record.
pub(crate) fn update_in(books: &mut [Book], id: u64, patch: BookPatch) -> Option<Book> {
    let book = books.iter_mut().find(|book| book.id == id)?;
    book.apply(patch);

    Some(book.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn fields(title: Option<&str>, author: Option<&str>, available: Option<bool>) -> BookFields {
        BookFields {
            title: title.map(Value::from),
            author: author.map(Value::from),
            available: available.map(Value::Bool),
        }
    }

    fn payload(value: Value) -> BookFields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_mode_trims_text() {
        let book = fields(Some("  Dune "), Some(" Frank Herbert"), Some(true))
            .into_new_book()
            .unwrap();

        assert_eq!(
            book,
            NewBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                available: true,
            }
        );
    }

    #[test]
    fn full_mode_reports_title_before_author_and_available() {
        let err = fields(Some("  "), None, None).into_new_book().unwrap_err();
        assert_eq!(err.field(), "title");

        let err = fields(None, Some(""), Some(true)).into_new_book().unwrap_err();
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn full_mode_reports_author_before_available() {
        let err = fields(Some("Dune"), Some(" "), None)
            .into_new_book()
            .unwrap_err();

        assert_eq!(err.field(), "author");
        assert_eq!(err.message(), "author must be a non-empty string");
    }

    #[test]
    fn full_mode_requires_available() {
        let err = fields(Some("Dune"), Some("Frank Herbert"), None)
            .into_new_book()
            .unwrap_err();

        assert_eq!(err.field(), "available");
    }

    #[test]
    fn partial_mode_skips_absent_fields() {
        let patch = fields(None, None, Some(false)).into_patch().unwrap();

        assert_eq!(
            patch,
            BookPatch {
                available: Some(false),
                ..Default::default()
            }
        );
    }

    #[test]
    fn partial_mode_checks_present_fields() {
        let err = fields(None, Some("   "), Some(true))
            .into_patch()
            .unwrap_err();

        assert_eq!(err.field(), "author");
    }

    #[test]
    fn reads_filter_by_exact_match() {
        let mut books = seed_books();
        books[0].available = false;
        books.push(Book::new(3, "Slow Productivity", "Cal Newport", true));

        let by_newport = filter_by_author(&books, "Cal Newport");
        assert_eq!(by_newport.len(), 2);
        assert!(filter_by_author(&books, "cal newport").is_empty());

        let available: Vec<u64> = filter_available(&books).iter().map(|b| b.id).collect();
        assert_eq!(available, vec![2, 3]);

        assert_eq!(find_by_id(&books, 3).map(|b| b.title.as_str()), Some("Slow Productivity"));
        assert!(find_by_id(&books, 4).is_none());
    }

    #[test]
    fn wrong_types_fail_their_own_field() {
        let err = payload(json!({"title": "Dune", "author": "Frank Herbert", "available": "yes"}))
            .into_new_book()
            .unwrap_err();
        assert_eq!(err.field(), "available");
        assert_eq!(err.message(), "available must be a boolean");

        let err = payload(json!({"title": "", "available": "yes"}))
            .into_new_book()
            .unwrap_err();
        assert_eq!(err.field(), "title");

        let err = payload(json!({"title": 7, "author": "Frank Herbert", "available": true}))
            .into_new_book()
            .unwrap_err();
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn explicit_null_is_present_but_invalid() {
        let err = payload(json!({"title": null})).into_patch().unwrap_err();
        assert_eq!(err.field(), "title");

        let err = payload(json!({"available": null})).into_patch().unwrap_err();
        assert_eq!(err.field(), "available");

        let patch = payload(json!({})).into_patch().unwrap();
        assert_eq!(patch, BookPatch::default());
    }

    #[test]
    fn decoding_tolerates_sparse_records() {
        let books: Vec<Book> = serde_json::from_str(r#"[{"id": 4}]"#).unwrap();

        assert_eq!(books, vec![Book::new(4, "", "", false)]);
    }

    #[test]
    fn decoding_defaults_mistyped_fields_and_keeps_unknown_ones() {
        let books: Vec<Book> = serde_json::from_value(json!([
            {"id": 1, "title": null, "author": "A", "available": true},
            {"title": "No id", "author": "B", "available": false},
            {"id": 3, "title": "C", "author": "D", "available": "yes", "shelf": "B2"},
            {"id": "four", "title": "E"},
            7
        ]))
        .unwrap();

        assert_eq!(books[0], Book::new(1, "", "A", true));
        assert_eq!(books[1], Book::new(0, "No id", "B", false));
        assert!(!books[2].available);
        assert_eq!(books[2].extra.get("shelf"), Some(&json!("B2")));
        assert_eq!(books[3], Book::new(0, "E", "", false));
        assert_eq!(books[4], Book::default());

        let written = serde_json::to_value(&books[2]).unwrap();
        assert_eq!(
            written,
            json!({"id": 3, "title": "C", "author": "D", "available": false, "shelf": "B2"})
        );
    }
}
