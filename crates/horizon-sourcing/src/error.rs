//! Error types for Horizon Sourcing.

use std::path::PathBuf;

use crate::model::Coordinate;

/// Result type alias for data-provider operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, mutating or observing a data provider.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A section index is outside the current bounds.
    #[error("section {section} is out of range (section count: {section_count})")]
    SectionOutOfRange { section: usize, section_count: usize },

    /// An item index is outside the current bounds of its section.
    #[error("item {coordinate} is out of range (items in section: {item_count})")]
    ItemOutOfRange {
        coordinate: Coordinate,
        item_count: usize,
    },

    /// An observer was configured without a capability it requires.
    #[error("misconfigured observer: {reason}")]
    MisconfiguredObserver { reason: String },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a section range error.
    pub fn section_out_of_range(section: usize, section_count: usize) -> Self {
        Self::SectionOutOfRange {
            section,
            section_count,
        }
    }

    /// Create an item range error.
    pub fn item_out_of_range(coordinate: Coordinate, item_count: usize) -> Self {
        Self::ItemOutOfRange {
            coordinate,
            item_count,
        }
    }

    /// Create a misconfiguration error.
    pub fn misconfigured(reason: impl Into<String>) -> Self {
        Self::MisconfiguredObserver {
            reason: reason.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for the out-of-range category (section or item).
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::SectionOutOfRange { .. } | Self::ItemOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_category() {
        assert!(Error::section_out_of_range(3, 1).is_out_of_range());
        assert!(Error::item_out_of_range(Coordinate::new(0, 4), 2).is_out_of_range());
        assert!(!Error::misconfigured("no reconfigure function").is_out_of_range());
    }

    #[test]
    fn test_messages_name_the_coordinate() {
        let err = Error::item_out_of_range(Coordinate::new(1, 4), 2);
        assert_eq!(
            err.to_string(),
            "item (1, 4) is out of range (items in section: 2)"
        );
    }
}
