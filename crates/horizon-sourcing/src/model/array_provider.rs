//! Array-backed data provider.
//!
//! `ArrayDataProvider<T>` owns a [`SectionedCollection`] and is the only
//! thing allowed to mutate it. Every mutation goes through the same three
//! steps under the write lock: validate the coordinates, build the matching
//! [`ChangeSet`], commit the edit. The change-set is published after the
//! lock is released, so observers can read the provider's new state from
//! inside their callbacks.

use std::fmt;

use horizon_sourcing_core::logging::targets;
use parking_lot::RwLock;

use super::change::{ChangeSet, Edit};
use super::collection::SectionedCollection;
use super::coordinate::Coordinate;
use super::emitter::ChangeEmitter;
use super::traits::{DataProvider, SectionedSource};
use crate::error::{Error, Result};

/// A data provider backed by nested vectors.
///
/// # Example
///
/// ```
/// use horizon_sourcing::model::{ArrayDataProvider, ChangeSet, Coordinate, Edit, SectionedSource};
///
/// let provider = ArrayDataProvider::from_rows(vec!["a", "b", "c"]);
/// provider.observable().add_observer(|change| {
///     assert_eq!(*change, ChangeSet::Edits(vec![Edit::DeleteItem(Coordinate::new(0, 1))]));
/// });
///
/// provider.delete_item(Coordinate::new(0, 1), false).unwrap();
/// assert_eq!(provider.content().sections(), &[vec!["a", "c"]]);
/// ```
pub struct ArrayDataProvider<T> {
    content: RwLock<SectionedCollection<T>>,
    section_index_titles: RwLock<Option<Vec<String>>>,
    emitter: ChangeEmitter,
}

impl<T: Clone + Send + Sync + 'static> ArrayDataProvider<T> {
    /// Creates a provider from its sections.
    pub fn from_sections(sections: Vec<Vec<T>>) -> Self {
        Self {
            content: RwLock::new(SectionedCollection::new(sections)),
            section_index_titles: RwLock::new(None),
            emitter: ChangeEmitter::new(),
        }
    }

    /// Creates a provider with a single section.
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self::from_sections(vec![rows])
    }

    /// Creates a provider without sections.
    pub fn empty() -> Self {
        Self::from_sections(Vec::new())
    }

    /// Sets the titles of the section index.
    pub fn with_section_index_titles(self, titles: Vec<String>) -> Self {
        *self.section_index_titles.write() = Some(titles);
        self
    }

    /// Replaces the titles of the section index.
    ///
    /// Titles are not part of the content, so no change-set is published.
    pub fn set_section_index_titles(&self, titles: Option<Vec<String>>) {
        *self.section_index_titles.write() = titles;
    }

    /// A snapshot of the current content.
    pub fn content(&self) -> SectionedCollection<T> {
        self.content.read().clone()
    }

    /// Reads the current content without cloning it.
    pub fn with_content<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SectionedCollection<T>) -> R,
    {
        f(&self.content.read())
    }

    /// Installs new content and publishes `change` to describe it.
    ///
    /// The caller is responsible for `change` matching the difference
    /// between the old and new content; use [`set_content`](Self::set_content)
    /// when it cannot be described incrementally.
    pub fn reconfigure(&self, sections: Vec<Vec<T>>, change: ChangeSet) {
        let _old = self.content.write().replace(sections);
        self.emitter.publish(change);
    }

    /// Installs new content and publishes [`ChangeSet::FullReload`].
    pub fn set_content(&self, sections: Vec<Vec<T>>) {
        self.reconfigure(sections, ChangeSet::FullReload);
    }

    // -------------------------------------------------------------------------
    // Item mutations
    // -------------------------------------------------------------------------

    /// Relocates the element at `from` to `to` in one pass.
    ///
    /// `to` is interpreted in the post-move state: it may equal the
    /// destination section's count when moving across sections.
    /// Publishes a single [`Edit::MoveItem`].
    pub fn move_item(&self, from: Coordinate, to: Coordinate, silent: bool) -> Result<()> {
        self.mutate(|content| {
            content.check_coordinate(from)?;
            let destination_count = content.item_count(to.section)?;
            let remaining = if to.section == from.section {
                destination_count - 1
            } else {
                destination_count
            };
            if to.item > remaining {
                return Err(Error::item_out_of_range(to, remaining));
            }

            let change = ChangeSet::single(Edit::MoveItem { from, to }, silent);
            let sections = content.sections_mut();
            let element = sections[from.section].remove(from.item);
            sections[to.section].insert(to.item, element);
            Ok((change, ()))
        })
    }

    /// Removes and returns the element at `at`.
    pub fn delete_item(&self, at: Coordinate, silent: bool) -> Result<T> {
        self.mutate(|content| {
            content.check_coordinate(at)?;
            let change = ChangeSet::single(Edit::DeleteItem(at), silent);
            let removed = content.sections_mut()[at.section].remove(at.item);
            Ok((change, removed))
        })
    }

    /// Inserts `element` at `at`; `at.item` may equal the section's count.
    pub fn insert_item(&self, at: Coordinate, element: T, silent: bool) -> Result<()> {
        self.mutate(|content| {
            content.check_insertion(at)?;
            let change = ChangeSet::single(Edit::InsertItem(at), silent);
            content.sections_mut()[at.section].insert(at.item, element);
            Ok((change, ()))
        })
    }

    /// Replaces the element at `at`, returning the previous value.
    pub fn update_item(&self, at: Coordinate, element: T, silent: bool) -> Result<T> {
        self.mutate(|content| {
            content.check_coordinate(at)?;
            let change = ChangeSet::single(Edit::UpdateItem(at), silent);
            let previous = std::mem::replace(
                &mut content.sections_mut()[at.section][at.item],
                element,
            );
            Ok((change, previous))
        })
    }

    // -------------------------------------------------------------------------
    // Section mutations
    // -------------------------------------------------------------------------

    /// Inserts a new section at `index`; `index` may equal the section count.
    pub fn insert_section(&self, index: usize, items: Vec<T>, silent: bool) -> Result<()> {
        self.mutate(|content| {
            let count = content.section_count();
            if index > count {
                return Err(Error::section_out_of_range(index, count));
            }
            let change = ChangeSet::single(Edit::InsertSection(index), silent);
            content.sections_mut().insert(index, items);
            Ok((change, ()))
        })
    }

    /// Removes and returns the section at `index`.
    pub fn delete_section(&self, index: usize, silent: bool) -> Result<Vec<T>> {
        self.mutate(|content| {
            content.check_section(index)?;
            let change = ChangeSet::single(Edit::DeleteSection(index), silent);
            let removed = content.sections_mut().remove(index);
            Ok((change, removed))
        })
    }

    /// Relocates the section at `from` so that it ends up at `to`.
    pub fn move_section(&self, from: usize, to: usize, silent: bool) -> Result<()> {
        self.mutate(|content| {
            content.check_section(from)?;
            content.check_section(to)?;
            let change = ChangeSet::single(Edit::MoveSection { from, to }, silent);
            let sections = content.sections_mut();
            let section = sections.remove(from);
            sections.insert(to, section);
            Ok((change, ()))
        })
    }

    /// Replaces the items of the section at `index`, returning the previous items.
    pub fn update_section(&self, index: usize, items: Vec<T>, silent: bool) -> Result<Vec<T>> {
        self.mutate(|content| {
            content.check_section(index)?;
            let change = ChangeSet::single(Edit::UpdateSection(index), silent);
            let previous = std::mem::replace(&mut content.sections_mut()[index], items);
            Ok((change, previous))
        })
    }

    /// Runs a validate/build/commit step under the write lock, then publishes.
    ///
    /// `step` must not touch `content` before every check has passed, so an
    /// error leaves the collection exactly as it was.
    fn mutate<F, R>(&self, step: F) -> Result<R>
    where
        F: FnOnce(&mut SectionedCollection<T>) -> Result<(ChangeSet, R)>,
    {
        let (change, output) = {
            let mut content = self.content.write();
            step(&mut content).inspect_err(|err| {
                tracing::debug!(target: targets::PROVIDER, %err, "rejected mutation");
            })?
        };
        self.emitter.publish(change);
        Ok(output)
    }
}

impl<T: Clone + Send + Sync + 'static> SectionedSource for ArrayDataProvider<T> {
    fn section_count(&self) -> usize {
        self.content.read().section_count()
    }

    fn item_count(&self, section: usize) -> Result<usize> {
        self.content.read().item_count(section)
    }

    fn observable(&self) -> &ChangeEmitter {
        &self.emitter
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        self.section_index_titles.read().clone()
    }
}

impl<T: Clone + Send + Sync + 'static> DataProvider for ArrayDataProvider<T> {
    type Element = T;

    fn element_at(&self, coordinate: Coordinate) -> Result<T> {
        self.content.read().element_at(coordinate).cloned()
    }

    fn coordinate_of(&self, element: &T) -> Option<Coordinate>
    where
        T: PartialEq,
    {
        self.content.read().coordinate_of(element)
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ArrayDataProvider<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayDataProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayDataProvider")
            .field("content", &*self.content.read())
            .field("observers", &self.emitter.observer_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(ArrayDataProvider<String>: Send, Sync);
