//! Book collections: an in-memory catalog and a JSON file-backed store.

pub mod book;
mod error;
pub mod file;
pub mod memory;
pub mod validation;

pub use error::StoreError;

use validation::FieldError;

/// A record with a unique positive identifier.
pub trait Identified {
    fn id(&self) -> u64;
}

/// One more than the largest id present, or 1 for an empty collection.
///
/// Ids are never reused after deletions, so once `u64::MAX` is taken no
/// further id can be assigned.
pub fn next_id<T: Identified>(records: &[T]) -> Result<u64, StoreError> {
    records
        .iter()
        .map(Identified::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted)
}

/// How a create operation picks the identifier of the new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Always [`next_id`]. A caller-supplied id is ignored.
    AssignNext,
    /// A caller-supplied id is kept unless a record already has it.
    /// Without one, [`next_id`] is used.
    RejectDuplicate,
}

impl IdPolicy {
    pub fn assign<T: Identified>(
        self,
        records: &[T],
        requested: Option<u64>,
    ) -> Result<u64, StoreError> {
        match (self, requested) {
            (IdPolicy::RejectDuplicate, Some(0)) => {
                Err(FieldError::new("id", "id must be a positive integer").into())
            }
            (IdPolicy::RejectDuplicate, Some(id)) => {
                if records.iter().any(|record| record.id() == id) {
                    return Err(StoreError::AlreadyExists(id));
                }

                Ok(id)
            }
            _ => next_id(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record(u64);

    impl Identified for Record {
        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn next_id_follows_the_maximum() {
        assert_eq!(next_id::<Record>(&[]).unwrap(), 1);
        assert_eq!(next_id(&[Record(2), Record(7), Record(3)]).unwrap(), 8);
    }

    #[test]
    fn next_id_after_the_largest_id_is_exhausted() {
        let records = [Record(3), Record(u64::MAX)];

        assert!(matches!(next_id(&records), Err(StoreError::IdsExhausted)));
        assert!(matches!(
            IdPolicy::AssignNext.assign(&records, None),
            Err(StoreError::IdsExhausted)
        ));
        assert!(matches!(
            IdPolicy::RejectDuplicate.assign(&records, None),
            Err(StoreError::IdsExhausted)
        ));
    }

    #[test]
    fn reject_duplicate_refuses_id_zero() {
        let err = IdPolicy::RejectDuplicate
            .assign::<Record>(&[], Some(0))
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(ref e) if e.field() == "id"));
    }

    #[test]
    fn assign_next_ignores_requested_id() {
        let records = [Record(1), Record(2)];

        assert_eq!(IdPolicy::AssignNext.assign(&records, Some(2)).unwrap(), 3);
        assert_eq!(IdPolicy::AssignNext.assign(&records, Some(40)).unwrap(), 3);
    }

    #[test]
    fn reject_duplicate_keeps_free_ids() {
        let records = [Record(1), Record(2)];

        assert_eq!(IdPolicy::RejectDuplicate.assign(&records, Some(9)).unwrap(), 9);
        assert_eq!(IdPolicy::RejectDuplicate.assign(&records, None).unwrap(), 3);
        assert!(matches!(
            IdPolicy::RejectDuplicate.assign(&records, Some(1)),
            Err(StoreError::AlreadyExists(1))
        ));
    }
}
