//! The batch-update surface a view exposes to change animators.

use crate::model::Coordinate;

/// A view that can apply structural edits as one animated batch.
///
/// This mirrors the batch-update API of list and grid toolkits. Between
/// [`begin_updates`](BatchView::begin_updates) and
/// [`end_updates`](BatchView::end_updates), every coordinate passed to a
/// primitive refers to the view's state *before* the batch for deletions,
/// reloads and move sources, and to the state *after* the batch for
/// insertions and move destinations. The view renumbers and coalesces the
/// primitives itself when the batch closes.
///
/// Counts reported while a batch is open are the pre-batch counts.
pub trait BatchView: Send {
    /// Number of sections currently displayed.
    fn number_of_sections(&self) -> usize;

    /// Number of items currently displayed in `section`; `0` for a section
    /// the view does not know.
    fn number_of_items(&self, section: usize) -> usize;

    /// Discards every displayed item and re-queries the data.
    fn reload_data(&mut self);

    /// Opens a batch.
    fn begin_updates(&mut self);

    /// Closes the batch opened by the matching [`begin_updates`](BatchView::begin_updates).
    fn end_updates(&mut self);

    fn insert_item(&mut self, at: Coordinate);

    fn delete_item(&mut self, at: Coordinate);

    /// Relocates one item; never expressed as a delete plus an insert.
    fn move_item(&mut self, from: Coordinate, to: Coordinate);

    /// Re-queries and redraws one item.
    fn reload_item(&mut self, at: Coordinate);

    fn insert_section(&mut self, index: usize);

    fn delete_section(&mut self, index: usize);

    fn move_section(&mut self, from: usize, to: usize);

    /// Whether [`reload_section`](BatchView::reload_section) does anything.
    ///
    /// Views without section reload silently skip
    /// [`Edit::UpdateSection`](crate::model::Edit::UpdateSection).
    fn supports_section_reload(&self) -> bool {
        false
    }

    /// Re-queries and redraws a whole section.
    fn reload_section(&mut self, _index: usize) {}
}
