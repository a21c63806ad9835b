//! Lazily loaded entity references.
//!
//! A [`LazyEntity`] wraps a value that is loaded on first access and cached
//! afterwards. [`LazyEntities`] is the collection counterpart. Both expose
//! whether they have loaded yet, which lets not-null rules inspect them
//! without forcing a load.

use std::fmt;
use std::sync::OnceLock;

type Loader<T> = Box<dyn Fn() -> Option<T> + Send + Sync>;

/// A reference whose value is produced on first access.
pub trait LazyReference {
    type Target;

    /// Whether the value has been loaded.
    fn is_loaded(&self) -> bool;

    /// The value, loading it first if needed. `None` if the loaded value is absent.
    fn value(&self) -> Option<&Self::Target>;

    /// The value if already loaded, without loading it.
    ///
    /// `None` means not yet loaded; `Some(None)` means loaded but absent.
    fn peek(&self) -> Option<Option<&Self::Target>>;
}

/// A single lazily loaded entity.
pub struct LazyEntity<T> {
    cell: OnceLock<Option<T>>,
    loader: Option<Loader<T>>,
}

impl<T> LazyEntity<T> {
    /// Create a reference that loads via `loader` on first access.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Option<T> + Send + Sync + 'static,
    {
        Self {
            cell: OnceLock::new(),
            loader: Some(Box::new(loader)),
        }
    }

    /// Create a reference that is already loaded.
    pub fn loaded(value: Option<T>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(value);
        Self { cell, loader: None }
    }

    fn load(&self) -> &Option<T> {
        self.cell.get_or_init(|| match &self.loader {
            Some(loader) => loader(),
            None => None,
        })
    }
}

impl<T> LazyReference for LazyEntity<T> {
    type Target = T;

    fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    fn value(&self) -> Option<&T> {
        self.load().as_ref()
    }

    fn peek(&self) -> Option<Option<&T>> {
        self.cell.get().map(Option::as_ref)
    }
}

impl<T> From<T> for LazyEntity<T> {
    fn from(entity: T) -> Self {
        Self::loaded(Some(entity))
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyEntity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("LazyEntity").field(value).finish(),
            None => f.write_str("LazyEntity(<not loaded>)"),
        }
    }
}

/// A lazily loaded collection of entities.
pub struct LazyEntities<T> {
    inner: LazyEntity<Vec<T>>,
}

impl<T> LazyEntities<T> {
    /// Create a collection that loads via `loader` on first access.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Option<Vec<T>> + Send + Sync + 'static,
    {
        Self {
            inner: LazyEntity::new(loader),
        }
    }

    /// Create a collection that is already loaded.
    pub fn loaded(entities: Option<Vec<T>>) -> Self {
        Self {
            inner: LazyEntity::loaded(entities),
        }
    }

    /// An already loaded, empty collection.
    pub fn empty() -> Self {
        Self::loaded(Some(Vec::new()))
    }

    /// Iterate the entities, loading them first if needed.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.value().map(Vec::as_slice).unwrap_or(&[]).iter()
    }
}

impl<T> LazyReference for LazyEntities<T> {
    type Target = Vec<T>;

    fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    fn value(&self) -> Option<&Vec<T>> {
        self.inner.value()
    }

    fn peek(&self) -> Option<Option<&Vec<T>>> {
        self.inner.peek()
    }
}

impl<T> From<Vec<T>> for LazyEntities<T> {
    fn from(entities: Vec<T>) -> Self {
        Self::loaded(Some(entities))
    }
}

impl<'a, T> IntoIterator for &'a LazyEntities<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyEntities<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.peek() {
            Some(value) => f.debug_tuple("LazyEntities").field(&value).finish(),
            None => f.write_str("LazyEntities(<not loaded>)"),
        }
    }
}
