use std::{
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::Mutex;

use super::{
    book::{self, Book, BookFields},
    IdPolicy, StoreError,
};

/// Book collection persisted as a JSON array in a single file.
///
/// Every load and mutation holds one async mutex for the whole
/// read-modify-write cycle, so a mutation always observes the previously
/// committed state. Commits write a sibling temporary file and rename it over
/// the backing file, so the file is never partially written.
#[derive(Clone)]
pub struct FileBookStore {
    inner: Arc<FileBookStoreInner>,
}

pub struct FileBookStoreInner {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Deref for FileBookStore {
    type Target = FileBookStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FileBookStore {
    /// Identifiers are always assigned by the store.
    pub const ID_POLICY: IdPolicy = IdPolicy::AssignNext;

    /// Does not touch the disk; the file is created on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(FileBookStoreInner {
                path: path.into(),
                lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored collection, creating or healing the file with seed data if needed.
    #[tracing::instrument(name = "load_books", skip_all, fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<Book>, StoreError> {
        let _guard = self.lock.lock().await;

        self.read_or_heal().await
    }

    /// Replaces the stored collection.
    #[tracing::instrument(name = "save_books", skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        self.write(books).await
    }

    pub async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        self.load().await
    }

    pub async fn list_by_author(&self, author: &str) -> Result<Vec<Book>, StoreError> {
        let books = self.load().await?;

        Ok(book::filter_by_author(&books, author))
    }

    pub async fn list_available(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.load().await?;

        Ok(book::filter_available(&books))
    }

    pub async fn get(&self, id: u64) -> Result<Book, StoreError> {
        let books = self.load().await?;

        book::find_by_id(&books, id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(name = "create_book", skip_all, fields(path = %self.path.display()))]
    pub async fn create(&self, payload: BookFields) -> Result<Book, StoreError> {
        let new_book = payload.into_new_book()?;

        let _guard = self.lock.lock().await;
        let mut books = self.read_or_heal().await?;

        let id = Self::ID_POLICY.assign(&books, None)?;
        let book = new_book.with_id(id);
        books.push(book.clone());

        self.write(&books).await?;

        tracing::debug!(id, "Created");

        Ok(book)
    }

    #[tracing::instrument(
        name = "update_book",
        skip(self, payload),
        fields(path = %self.path.display())
    )]
    pub async fn update(&self, id: u64, payload: BookFields) -> Result<Book, StoreError> {
        let _guard = self.lock.lock().await;
        let mut books = self.read_or_heal().await?;

        if book::find_by_id(&books, id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        let patch = payload.into_patch()?;
        let book = book::update_in(&mut books, id, patch).ok_or(StoreError::NotFound(id))?;

        self.write(&books).await?;

        tracing::debug!("Updated");

        Ok(book)
    }

    #[tracing::instrument(name = "delete_book", skip(self), fields(path = %self.path.display()))]
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut books = self.read_or_heal().await?;

        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or(StoreError::NotFound(id))?;
        books.remove(index);

        self.write(&books).await?;

        tracing::debug!("Deleted");

        Ok(())
    }

    /// Must be called with the lock held.
    async fn read_or_heal(&self) -> Result<Vec<Book>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!("Backing file missing, writing seed data");

                return self.write_seed().await;
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                tracing::warn!(%err, "Backing file is not UTF-8, writing seed data");

                return self.write_seed().await;
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        // Any array decodes, element by element, see `Book`.
        match serde_json::from_str::<Vec<Book>>(&content) {
            Ok(books) => Ok(books),
            Err(err) => {
                tracing::warn!(%err, "Backing file is not a JSON array, writing seed data");

                self.write_seed().await
            }
        }
    }

    async fn write_seed(&self) -> Result<Vec<Book>, StoreError> {
        let seed = book::seed_books();
        self.write(&seed).await?;

        Ok(seed)
    }

    /// Must be called with the lock held.
    async fn write(&self, books: &[Book]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(books)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io(parent, err))?;
        }

        let tmp = self.tmp_path();

        if let Err(err) = tokio::fs::write(&tmp, &bytes).await {
            Self::discard(&tmp).await;

            return Err(StoreError::io(&tmp, err));
        }

        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            Self::discard(&tmp).await;

            return Err(StoreError::io(&self.path, err));
        }

        tracing::trace!(count = books.len(), "Written");

        Ok(())
    }

    /// Removes a temporary file left behind by a failed commit.
    async fn discard(tmp: &Path) {
        if let Err(err) = tokio::fs::remove_file(tmp).await {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!(%err, tmp = %tmp.display(), "Failed to remove temporary file");
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().unwrap_or_default().to_os_string();
        file_name.push(".tmp");

        self.path.with_file_name(file_name)
    }
}
