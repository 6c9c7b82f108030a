//! Change-sets published by data providers.
//!
//! A [`ChangeSet`] describes one mutation of a provider's content. It is
//! built by the operation that performs the mutation, so the edit list
//! always matches the caller's intent: a relocated element is reported as
//! one [`Edit::MoveItem`], never as a delete followed by an insert.
//!
//! All coordinates inside one `ChangeSet::Edits` list use standard batch
//! semantics: deletions, updates and move sources refer to the state
//! *before* the batch, insertions and move destinations to the state
//! *after* it.

use std::fmt;

use super::coordinate::Coordinate;

/// One atomic structural edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edit {
    /// An element was inserted.
    InsertItem(Coordinate),
    /// An element's value changed in place.
    UpdateItem(Coordinate),
    /// An element was relocated.
    MoveItem { from: Coordinate, to: Coordinate },
    /// An element was removed.
    DeleteItem(Coordinate),
    /// A section was inserted.
    InsertSection(usize),
    /// A section's content changed as a whole.
    UpdateSection(usize),
    /// A section was removed.
    DeleteSection(usize),
    /// A section was relocated.
    MoveSection { from: usize, to: usize },
}

impl Edit {
    /// Returns `true` for the section-granularity variants.
    pub fn is_section_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertSection(_)
                | Self::UpdateSection(_)
                | Self::DeleteSection(_)
                | Self::MoveSection { .. }
        )
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertItem(at) => write!(f, "insert item {at}"),
            Self::UpdateItem(at) => write!(f, "update item {at}"),
            Self::MoveItem { from, to } => write!(f, "move item {from} -> {to}"),
            Self::DeleteItem(at) => write!(f, "delete item {at}"),
            Self::InsertSection(index) => write!(f, "insert section {index}"),
            Self::UpdateSection(index) => write!(f, "update section {index}"),
            Self::DeleteSection(index) => write!(f, "delete section {index}"),
            Self::MoveSection { from, to } => write!(f, "move section {from} -> {to}"),
        }
    }
}

/// The description of a mutation published to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSet {
    /// Discard every assumption about the content and re-render from scratch.
    FullReload,
    /// Apply these edits, in order, as one batch.
    Edits(Vec<Edit>),
    /// The edits are already visible (e.g. the user dragged a row), so views
    /// must not animate them. Bookkeeping that normally accompanies an edit
    /// still happens.
    SilentEdits(Vec<Edit>),
}

impl ChangeSet {
    /// Builds `Edits` or `SilentEdits` depending on `silent`.
    pub fn from_edits(edits: Vec<Edit>, silent: bool) -> Self {
        if silent {
            Self::SilentEdits(edits)
        } else {
            Self::Edits(edits)
        }
    }

    /// Builds a change-set holding one edit.
    pub fn single(edit: Edit, silent: bool) -> Self {
        Self::from_edits(vec![edit], silent)
    }

    /// The edits carried by this change-set; empty for `FullReload`.
    pub fn edits(&self) -> &[Edit] {
        match self {
            Self::FullReload => &[],
            Self::Edits(edits) | Self::SilentEdits(edits) => edits,
        }
    }

    /// Returns `true` for `FullReload`.
    pub fn is_full_reload(&self) -> bool {
        matches!(self, Self::FullReload)
    }

    /// Returns `true` for `SilentEdits`.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::SilentEdits(_))
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FullReload => "full_reload",
            Self::Edits(_) => "edits",
            Self::SilentEdits(_) => "silent_edits",
        }
    }

    /// Where the element at `at` before this batch sits once the batch has
    /// been applied.
    ///
    /// Returns `None` when the batch removes the element or its section, and
    /// for `FullReload`, which carries no positions at all.
    pub fn coordinate_after(&self, at: Coordinate) -> Option<Coordinate> {
        if self.is_full_reload() {
            return None;
        }
        let edits = self.edits();

        let mut removed = Vec::new();
        for edit in edits {
            match *edit {
                Edit::DeleteItem(deleted) if deleted == at => return None,
                Edit::MoveItem { from, to } if from == at => return Some(to),
                Edit::DeleteItem(gone) | Edit::MoveItem { from: gone, .. }
                    if gone.section == at.section =>
                {
                    removed.push(gone.item);
                }
                _ => {}
            }
        }

        let section = section_after(edits, at.section)?;
        let placed: Vec<usize> = edits
            .iter()
            .filter_map(|edit| match *edit {
                Edit::InsertItem(new) | Edit::MoveItem { to: new, .. } if new.section == section => {
                    Some(new.item)
                }
                _ => None,
            })
            .collect();

        Some(Coordinate::new(section, index_after(at.item, &removed, placed)))
    }
}

fn section_after(edits: &[Edit], section: usize) -> Option<usize> {
    let mut removed = Vec::new();
    let mut placed = Vec::new();
    for edit in edits {
        match *edit {
            Edit::DeleteSection(index) if index == section => return None,
            Edit::MoveSection { from, to } if from == section => return Some(to),
            Edit::DeleteSection(index) => removed.push(index),
            Edit::MoveSection { from, to } => {
                removed.push(from);
                placed.push(to);
            }
            Edit::InsertSection(index) => placed.push(index),
            _ => {}
        }
    }
    Some(index_after(section, &removed, placed))
}

/// Survivors keep their relative order and fill the slots left free by
/// insertions and move destinations.
fn index_after(index: usize, removed: &[usize], mut placed: Vec<usize>) -> usize {
    let mut slot = index - removed.iter().filter(|&&gone| gone < index).count();
    placed.sort_unstable();
    placed.dedup();
    for taken in placed {
        if taken > slot {
            break;
        }
        slot += 1;
    }
    slot
}

static_assertions::assert_impl_all!(ChangeSet: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edits_selects_variant() {
        let edit = Edit::DeleteItem(Coordinate::new(0, 1));
        assert_eq!(ChangeSet::single(edit, false), ChangeSet::Edits(vec![edit]));
        assert_eq!(
            ChangeSet::single(edit, true),
            ChangeSet::SilentEdits(vec![edit])
        );
    }

    #[test]
    fn test_edits_accessor() {
        let edit = Edit::InsertSection(2);
        assert!(ChangeSet::FullReload.edits().is_empty());
        assert_eq!(ChangeSet::single(edit, true).edits(), &[edit]);
        assert!(ChangeSet::single(edit, true).is_silent());
        assert!(ChangeSet::FullReload.is_full_reload());
    }

    #[test]
    fn test_section_edits() {
        assert!(Edit::MoveSection { from: 0, to: 1 }.is_section_edit());
        assert!(!Edit::UpdateItem(Coordinate::new(0, 0)).is_section_edit());
    }

    #[test]
    fn test_coordinate_after_deletion_shifts_up() {
        let change = ChangeSet::Edits(vec![
            Edit::DeleteItem(Coordinate::new(0, 0)),
            Edit::UpdateItem(Coordinate::new(0, 2)),
        ]);
        assert_eq!(
            change.coordinate_after(Coordinate::new(0, 2)),
            Some(Coordinate::new(0, 1))
        );
        assert_eq!(change.coordinate_after(Coordinate::new(0, 0)), None);
        assert_eq!(
            change.coordinate_after(Coordinate::new(1, 0)),
            Some(Coordinate::new(1, 0))
        );
    }

    #[test]
    fn test_coordinate_after_insertions_and_moves() {
        // [a b c d] -> delete b, insert x at 0, move d to 1 -> [x d a c]
        let change = ChangeSet::Edits(vec![
            Edit::DeleteItem(Coordinate::new(0, 1)),
            Edit::InsertItem(Coordinate::new(0, 0)),
            Edit::MoveItem {
                from: Coordinate::new(0, 3),
                to: Coordinate::new(0, 1),
            },
        ]);
        let after = |item| change.coordinate_after(Coordinate::new(0, item));
        assert_eq!(after(0), Some(Coordinate::new(0, 2)));
        assert_eq!(after(2), Some(Coordinate::new(0, 3)));
        assert_eq!(after(3), Some(Coordinate::new(0, 1)));
        assert_eq!(after(1), None);
    }

    #[test]
    fn test_coordinate_after_section_edits() {
        // [s0 s1 s2] -> delete s0, insert n at 1, move s2 to 0 -> [s2 n s1]
        let change = ChangeSet::Edits(vec![
            Edit::DeleteSection(0),
            Edit::InsertSection(1),
            Edit::MoveSection { from: 2, to: 0 },
        ]);
        assert_eq!(
            change.coordinate_after(Coordinate::new(1, 4)),
            Some(Coordinate::new(2, 4))
        );
        assert_eq!(
            change.coordinate_after(Coordinate::new(2, 0)),
            Some(Coordinate::new(0, 0))
        );
        assert_eq!(change.coordinate_after(Coordinate::new(0, 0)), None);
        assert_eq!(ChangeSet::FullReload.coordinate_after(Coordinate::new(0, 0)), None);
    }

    #[test]
    fn test_display() {
        let edit = Edit::MoveItem {
            from: Coordinate::new(0, 0),
            to: Coordinate::new(1, 1),
        };
        assert_eq!(edit.to_string(), "move item (0, 0) -> (1, 1)");
    }
}
