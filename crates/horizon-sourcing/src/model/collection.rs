//! The sectioned collection backing array data providers.

use std::ops::Index;

use super::coordinate::Coordinate;
use crate::error::{Error, Result};

/// An ordered sequence of sections, each an ordered sequence of elements.
///
/// The collection itself does not publish changes. Providers own it and
/// perform every mutation together with the matching change-set, so the
/// mutating methods here are crate-private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionedCollection<T> {
    sections: Vec<Vec<T>>,
}

impl<T> Default for SectionedCollection<T> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl<T> SectionedCollection<T> {
    /// Creates a collection from its sections.
    pub fn new(sections: Vec<Vec<T>>) -> Self {
        Self { sections }
    }

    /// Creates a collection with a single section.
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self {
            sections: vec![rows],
        }
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of items in `section`.
    pub fn item_count(&self, section: usize) -> Result<usize> {
        self.section(section).map(<[T]>::len)
    }

    /// Total number of items across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no section holds an element.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// The items of one section.
    pub fn section(&self, section: usize) -> Result<&[T]> {
        self.sections
            .get(section)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::section_out_of_range(section, self.sections.len()))
    }

    /// The element at `coordinate`.
    pub fn element_at(&self, coordinate: Coordinate) -> Result<&T> {
        let items = self.section(coordinate.section)?;
        items
            .get(coordinate.item)
            .ok_or_else(|| Error::item_out_of_range(coordinate, items.len()))
    }

    /// All sections, in order.
    pub fn sections(&self) -> &[Vec<T>] {
        &self.sections
    }

    /// Iterates over every element with its coordinate, in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> + '_ {
        self.sections.iter().enumerate().flat_map(|(section, items)| {
            items
                .iter()
                .enumerate()
                .map(move |(item, element)| (Coordinate::new(section, item), element))
        })
    }

    /// Checks that `coordinate` addresses an existing element.
    pub fn check_coordinate(&self, coordinate: Coordinate) -> Result<()> {
        self.element_at(coordinate).map(|_| ())
    }

    /// Checks that an element could be inserted at `coordinate`
    /// (`item` may equal the section's current count).
    pub fn check_insertion(&self, coordinate: Coordinate) -> Result<()> {
        let count = self.item_count(coordinate.section)?;
        if coordinate.item > count {
            return Err(Error::item_out_of_range(coordinate, count));
        }
        Ok(())
    }

    /// Checks that `section` addresses an existing section.
    pub fn check_section(&self, section: usize) -> Result<()> {
        self.section(section).map(|_| ())
    }

    /// Consumes the collection, returning its sections.
    pub fn into_sections(self) -> Vec<Vec<T>> {
        self.sections
    }

    // -------------------------------------------------------------------------
    // Unchecked mutation, used by providers after validation
    // -------------------------------------------------------------------------

    /// Installs new content, returning the old content.
    pub(crate) fn replace(&mut self, sections: Vec<Vec<T>>) -> Vec<Vec<T>> {
        std::mem::replace(&mut self.sections, sections)
    }

    pub(crate) fn sections_mut(&mut self) -> &mut Vec<Vec<T>> {
        &mut self.sections
    }
}

impl<T: PartialEq> SectionedCollection<T> {
    /// Returns the coordinate of the first element equal to `element`.
    pub fn coordinate_of(&self, element: &T) -> Option<Coordinate> {
        self.iter()
            .find(|(_, candidate)| *candidate == element)
            .map(|(coordinate, _)| coordinate)
    }
}

impl<T> From<Vec<Vec<T>>> for SectionedCollection<T> {
    fn from(sections: Vec<Vec<T>>) -> Self {
        Self::new(sections)
    }
}

impl<T> Index<Coordinate> for SectionedCollection<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `coordinate` is out of range; use
    /// [`element_at`](SectionedCollection::element_at) for a checked read.
    fn index(&self, coordinate: Coordinate) -> &T {
        &self.sections[coordinate.section][coordinate.item]
    }
}
