use std::{ops::Deref, sync::Arc};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use validator::Validate;

use super::{
    validation::{not_blank, trimmed, Field},
    IdPolicy, Identified, StoreError,
};

const NAME: Field = Field::new("name", "name must be a non-empty string");
const AUTHOR: Field = Field::new("author", "author must be a non-empty string");

/// A record of the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
    pub author: String,
}

impl CatalogEntry {
    fn new(id: u64, name: &str, author: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            author: author.to_string(),
        }
    }
}

impl Identified for CatalogEntry {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Create payload of the in-memory catalog. Unlike the file-backed store, a
/// caller-supplied `id` is honored.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct NewCatalogEntry {
    pub id: Option<u64>,
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub author: Option<String>,
}

pub fn seed_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(1, "Harry Potter", "J.K Rawling"),
        CatalogEntry::new(2, "Rich Dad Poor Dad", "Robert Kiyosaki"),
        CatalogEntry::new(3, "Physcilogy of Money", "N/A"),
        CatalogEntry::new(4, "October Junction", "Prakash"),
        CatalogEntry::new(5, "Musafir Cafe", "Prakash"),
    ]
}

/// Process-local catalog, lost on restart.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<MemoryCatalogInner>,
}

pub struct MemoryCatalogInner {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl Deref for MemoryCatalog {
    type Target = MemoryCatalogInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new(seed_entries())
    }
}

impl MemoryCatalog {
    /// A caller-supplied id already present is rejected.
    pub const ID_POLICY: IdPolicy = IdPolicy::RejectDuplicate;

    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            inner: Arc::new(MemoryCatalogInner {
                entries: RwLock::new(entries),
            }),
        }
    }

    pub async fn load(&self) -> Vec<CatalogEntry> {
        self.entries.read().await.clone()
    }

    pub async fn list_by_author(&self, author: &str) -> Vec<CatalogEntry> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|entry| entry.author == author)
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: u64) -> Result<CatalogEntry, StoreError> {
        self.entries
            .read()
            .await
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// The duplicate check and the append happen under one write lock.
    #[tracing::instrument(name = "create_entry", skip_all)]
    pub async fn create(&self, payload: NewCatalogEntry) -> Result<CatalogEntry, StoreError> {
        let errors = payload.validate().err();

        let name = NAME.required(payload.name)?;
        NAME.check(errors.as_ref())?;

        let author = AUTHOR.required(payload.author)?;
        AUTHOR.check(errors.as_ref())?;

        let mut entries = self.entries.write().await;

        let id = Self::ID_POLICY.assign(&entries, payload.id)?;
        let entry = CatalogEntry {
            id,
            name: trimmed(name),
            author: trimmed(author),
        };
        entries.push(entry.clone());

        tracing::debug!(id, "Created");

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: Option<u64>, name: &str, author: &str) -> NewCatalogEntry {
        NewCatalogEntry {
            id,
            name: Some(name.to_string()),
            author: Some(author.to_string()),
        }
    }

    #[tokio::test]
    async fn starts_with_the_seed() {
        let catalog = MemoryCatalog::default();

        assert_eq!(catalog.load().await.len(), 5);
        assert_eq!(catalog.get(4).await.unwrap().name, "October Junction");
        assert!(matches!(catalog.get(6).await, Err(StoreError::NotFound(6))));
    }

    #[tokio::test]
    async fn filters_by_author() {
        let catalog = MemoryCatalog::default();

        let ids: Vec<u64> = catalog
            .list_by_author("Prakash")
            .await
            .iter()
            .map(|entry| entry.id)
            .collect();

        assert_eq!(ids, vec![4, 5]);
        assert!(catalog.list_by_author("prakash").await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let catalog = MemoryCatalog::default();

        let err = catalog
            .create(payload(Some(2), "Dune", "Frank Herbert"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(2)));
        assert_eq!(catalog.load().await, seed_entries());
    }

    #[tokio::test]
    async fn supplied_id_is_honored() {
        let catalog = MemoryCatalog::default();

        let entry = catalog
            .create(payload(Some(10), "Dune", "Frank Herbert"))
            .await
            .unwrap();

        assert_eq!(entry.id, 10);
        assert_eq!(catalog.get(10).await.unwrap(), entry);
    }

    #[tokio::test]
    async fn id_zero_is_rejected() {
        let catalog = MemoryCatalog::default();

        let err = catalog
            .create(payload(Some(0), "Dune", "Frank Herbert"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(ref e) if e.field() == "id"));
        assert_eq!(catalog.load().await, seed_entries());
    }

    #[tokio::test]
    async fn no_id_is_assigned_after_the_largest_one() {
        let catalog = MemoryCatalog::default();
        catalog
            .create(payload(Some(u64::MAX), "Dune", "Frank Herbert"))
            .await
            .unwrap();

        let err = catalog
            .create(payload(None, "Emma", "Jane Austen"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::IdsExhausted));
        assert_eq!(catalog.load().await.len(), 6);
    }

    #[tokio::test]
    async fn missing_id_is_assigned() {
        let catalog = MemoryCatalog::default();

        let entry = catalog
            .create(payload(None, " Dune ", "Frank Herbert"))
            .await
            .unwrap();

        assert_eq!(entry.id, 6);
        assert_eq!(entry.name, "Dune");
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_author() {
        let catalog = MemoryCatalog::default();

        let err = catalog.create(payload(None, " ", "")).await.unwrap_err();

        assert!(matches!(err, StoreError::Validation(ref e) if e.field() == "name"));
    }
}
