//! Insertion-ordered, deduplicated collection of validation errors.

use std::collections::BTreeSet;
use std::fmt;

use super::ValidationError;

/// Errors produced by a validation run.
///
/// Each distinct error appears once, at the position of its first insertion.
#[derive(Clone)]
pub struct ErrorSet<E> {
    items: Vec<E>,
    seen: BTreeSet<E>,
}

impl<E: ValidationError> ErrorSet<E> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    /// Insert an error. Returns `false` if it was already present.
    pub fn insert(&mut self, error: E) -> bool {
        if self.seen.contains(&error) {
            return false;
        }
        self.seen.insert(error.clone());
        self.items.push(error);
        true
    }

    pub fn contains(&self, error: &E) -> bool {
        self.seen.contains(error)
    }

    /// Whether any error in this set is also in `other`.
    pub fn intersects(&self, other: &BTreeSet<E>) -> bool {
        if self.seen.len() <= other.len() {
            self.seen.iter().any(|e| other.contains(e))
        } else {
            other.iter().any(|e| self.seen.contains(e))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<E> {
        self.items
    }
}

impl<E: ValidationError> Default for ErrorSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ValidationError> PartialEq for ErrorSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<E: ValidationError> Eq for ErrorSet<E> {}

impl<E: ValidationError> fmt::Debug for ErrorSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<E: ValidationError> Extend<E> for ErrorSet<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for error in iter {
            self.insert(error);
        }
    }
}

impl<E: ValidationError> FromIterator<E> for ErrorSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<E: ValidationError> IntoIterator for ErrorSet<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E: ValidationError> IntoIterator for &'a ErrorSet<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
