//! Ordered, identity-keyed collections embedded inside a parent document.
//!
//! Likes, comments, experience and education entries all live in a `Vec`
//! owned by their post or profile. New entries go to the front; removal is by
//! identity and never touches the sequence when nothing matches.

use thiserror::Error;

/// An entry that can be located by an identity key within its collection.
pub trait Keyed {
    type Key: PartialEq;

    fn key(&self) -> &Self::Key;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("no entry with that identity")]
    NotFound,
    #[error("an entry with that identity already exists")]
    AlreadyPresent,
}

pub trait EmbeddedCollection<E: Keyed> {
    /// Insert at index 0, leaving the existing order untouched.
    fn prepend(&mut self, entry: E);

    /// Insert at index 0 unless an entry with the same key is present.
    fn prepend_unique(&mut self, entry: E) -> Result<(), CollectionError>;

    fn find_by_key(&self, key: &E::Key) -> Option<&E>;

    fn contains_key(&self, key: &E::Key) -> bool {
        self.find_by_key(key).is_some()
    }

    /// Remove exactly the matching entry, preserving the order of the rest.
    fn remove_by_key(&mut self, key: &E::Key) -> Result<E, CollectionError>;
}

impl<E: Keyed> EmbeddedCollection<E> for Vec<E> {
    fn prepend(&mut self, entry: E) {
        self.insert(0, entry);
    }

    fn prepend_unique(&mut self, entry: E) -> Result<(), CollectionError> {
        if self.contains_key(entry.key()) {
            return Err(CollectionError::AlreadyPresent);
        }
        self.prepend(entry);
        Ok(())
    }

    fn find_by_key(&self, key: &E::Key) -> Option<&E> {
        self.iter().find(|entry| entry.key() == key)
    }

    fn remove_by_key(&mut self, key: &E::Key) -> Result<E, CollectionError> {
        let index = self
            .iter()
            .position(|entry| entry.key() == key)
            .ok_or(CollectionError::NotFound)?;
        Ok(self.remove(index))
    }
}
