//! Core traits for data providers.
//!
//! Views and their binding layers only ever talk to providers through these
//! traits: a read contract ([`SectionedSource`], [`DataProvider`]), a
//! subscription point ([`SectionedSource::observable`]) and a mutation
//! capability ([`DataModifying`]).

use super::coordinate::Coordinate;
use super::emitter::ChangeEmitter;
use crate::error::Result;

/// The element-independent part of a data provider.
///
/// Batch appliers only need counts and a subscription point, so they work
/// against `dyn SectionedSource` regardless of element type.
pub trait SectionedSource: Send + Sync {
    /// Number of sections.
    fn section_count(&self) -> usize;

    /// Number of items in `section`.
    ///
    /// Fails with an out-of-range error if `section` does not exist.
    fn item_count(&self, section: usize) -> Result<usize>;

    /// The emitter publishing this provider's change-sets.
    fn observable(&self) -> &ChangeEmitter;

    /// Titles for a section index, if the provider has them.
    fn section_index_titles(&self) -> Option<Vec<String>> {
        None
    }
}

/// A sectioned source of elements.
///
/// # Example
///
/// ```
/// use horizon_sourcing::model::{ArrayDataProvider, Coordinate, DataProvider, SectionedSource};
///
/// let provider = ArrayDataProvider::from_sections(vec![vec![1, 2], vec![3, 4]]);
/// assert_eq!(provider.section_count(), 2);
/// assert_eq!(provider.item_count(1).unwrap(), 2);
/// assert_eq!(provider.element_at(Coordinate::new(1, 1)).unwrap(), 4);
/// assert_eq!(provider.coordinate_of(&4), Some(Coordinate::new(1, 1)));
/// assert_eq!(provider.coordinate_of(&100), None);
/// ```
pub trait DataProvider: SectionedSource {
    /// The kind of element this provider holds.
    type Element: Clone;

    /// The element at `coordinate`.
    ///
    /// Fails with an out-of-range error if either component is invalid.
    fn element_at(&self, coordinate: Coordinate) -> Result<Self::Element>;

    /// Returns the coordinate of the first element equal to `element`,
    /// scanning in lexicographic order.
    fn coordinate_of(&self, element: &Self::Element) -> Option<Coordinate>
    where
        Self::Element: PartialEq,
    {
        for section in 0..self.section_count() {
            let count = self.item_count(section).ok()?;
            for item in 0..count {
                let coordinate = Coordinate::new(section, item);
                if self.element_at(coordinate).ok().as_ref() == Some(element) {
                    return Some(coordinate);
                }
            }
        }
        None
    }
}

/// Mutation capability exposed to the view binding layer.
///
/// This is element-independent: views can only relocate or remove what is
/// already there.
pub trait DataModifying: Send + Sync {
    /// Whether the element at `at` may be moved.
    fn can_move_item(&self, at: Coordinate) -> bool;

    /// Whether the element at `at` may be deleted.
    fn can_delete_item(&self, at: Coordinate) -> bool;

    /// Moves the element at `from` to `to`.
    ///
    /// Pass `update_view = false` when the view already shows the move
    /// (it originated the drag); the change is then published as
    /// [`ChangeSet::SilentEdits`](super::ChangeSet::SilentEdits).
    fn move_item(&self, from: Coordinate, to: Coordinate, update_view: bool) -> Result<()>;

    /// Deletes the element at `at`.
    fn delete_item(&self, at: Coordinate) -> Result<()>;
}
