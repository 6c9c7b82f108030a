//! Coordinates for addressing elements in sectioned collections.
//!
//! A [`Coordinate`] is a `(section, item)` pair. Coordinates are plain
//! values: they are not tied to a collection and may become stale after a
//! mutation. Every consumer re-checks them against the state it is
//! interpreting them in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one element's position in a sectioned collection.
///
/// Ordering is lexicographic on `(section, item)`.
///
/// # Example
///
/// ```
/// use horizon_sourcing::model::Coordinate;
///
/// let first = Coordinate::new(0, 3);
/// let second = Coordinate::new(1, 0);
/// assert!(first < second);
/// assert_eq!(first.to_string(), "(0, 3)");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    /// The section index.
    pub section: usize,
    /// The item index within the section.
    pub item: usize,
}

impl Coordinate {
    /// Creates a coordinate.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Returns a coordinate in the same section at a different item.
    #[inline]
    pub const fn with_item(self, item: usize) -> Self {
        Self {
            section: self.section,
            item,
        }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}
