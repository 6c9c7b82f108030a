//! Type-erased data providers.

use std::fmt;
use std::sync::Arc;

use super::coordinate::Coordinate;
use super::emitter::ChangeEmitter;
use super::traits::{DataProvider, SectionedSource};
use crate::error::Result;

/// A cloneable handle to any provider of `T`.
///
/// Clones share the underlying provider, so they also share its emitter.
pub struct AnyDataProvider<T> {
    inner: Arc<dyn DataProvider<Element = T>>,
}

impl<T: Clone + 'static> AnyDataProvider<T> {
    /// Wraps a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: DataProvider<Element = T> + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Wraps an already shared provider.
    pub fn from_arc<P>(provider: Arc<P>) -> Self
    where
        P: DataProvider<Element = T> + 'static,
    {
        Self { inner: provider }
    }

    /// Returns `true` if both handles refer to the same provider.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for AnyDataProvider<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> SectionedSource for AnyDataProvider<T> {
    fn section_count(&self) -> usize {
        self.inner.section_count()
    }

    fn item_count(&self, section: usize) -> Result<usize> {
        self.inner.item_count(section)
    }

    fn observable(&self) -> &ChangeEmitter {
        self.inner.observable()
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        self.inner.section_index_titles()
    }
}

impl<T: Clone + 'static> DataProvider for AnyDataProvider<T> {
    type Element = T;

    fn element_at(&self, coordinate: Coordinate) -> Result<T> {
        self.inner.element_at(coordinate)
    }
}

impl<T> fmt::Debug for AnyDataProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyDataProvider")
            .field("sections", &self.inner.section_count())
            .field("observers", &self.inner.observable().observer_count())
            .finish()
    }
}
