//! The data-source side of a view binding.

use std::fmt;
use std::sync::Arc;

use horizon_sourcing_core::logging::targets;

use super::renderer::RendererRegistry;
use crate::error::Result;
use crate::model::{AnyDataProvider, Coordinate, DataModifying, DataProvider, SectionedSource};

/// Answers a view's data queries from a provider.
///
/// Counts come from the provider, visuals are configured through the
/// renderer registry, and user edits (drag to reorder, swipe to delete) are
/// routed through an optional [`DataModifying`] capability.
pub struct ViewDataSource<V, T> {
    provider: AnyDataProvider<T>,
    renderers: Arc<RendererRegistry<V, T>>,
    modifier: Option<Arc<dyn DataModifying>>,
}

impl<V, T: Clone + 'static> ViewDataSource<V, T> {
    pub fn new(provider: AnyDataProvider<T>, renderers: Arc<RendererRegistry<V, T>>) -> Self {
        Self {
            provider,
            renderers,
            modifier: None,
        }
    }

    /// Enables user moves and deletions through `modifier`.
    pub fn with_modifier(mut self, modifier: Arc<dyn DataModifying>) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn provider(&self) -> &AnyDataProvider<T> {
        &self.provider
    }

    pub fn renderers(&self) -> &Arc<RendererRegistry<V, T>> {
        &self.renderers
    }

    pub fn number_of_sections(&self) -> usize {
        self.provider.section_count()
    }

    pub fn number_of_items(&self, section: usize) -> Result<usize> {
        self.provider.item_count(section)
    }

    /// Configures the visual at `at` and returns the reuse key it was
    /// configured under.
    pub fn configure_item(&self, view: &mut V, at: Coordinate) -> Result<String> {
        let element = self.provider.element_at(at)?;
        self.renderers.configure(view, at, &element)
    }

    pub fn section_index_titles(&self) -> Option<Vec<String>> {
        self.provider.section_index_titles()
    }

    /// The coordinate a section index entry jumps to.
    ///
    /// `title` is looked up among the provider's titles; if it is not
    /// there, `index` (the entry's position in the index) is used. Returns
    /// `None` when the provider has no titles or the section does not exist.
    pub fn coordinate_for_section_index_title(
        &self,
        title: &str,
        index: usize,
    ) -> Option<Coordinate> {
        let titles = self.provider.section_index_titles()?;
        let section = titles
            .iter()
            .position(|candidate| candidate == title)
            .unwrap_or(index);
        (section < self.provider.section_count()).then(|| Coordinate::new(section, 0))
    }

    pub fn can_move_item(&self, at: Coordinate) -> bool {
        self.modifier
            .as_ref()
            .is_some_and(|modifier| modifier.can_move_item(at))
    }

    pub fn can_delete_item(&self, at: Coordinate) -> bool {
        self.modifier
            .as_ref()
            .is_some_and(|modifier| modifier.can_delete_item(at))
    }

    /// Commits a move the user already performed on screen.
    ///
    /// The change is published silently. Without a modifier the move is
    /// ignored.
    pub fn move_item(&self, from: Coordinate, to: Coordinate) -> Result<()> {
        match &self.modifier {
            Some(modifier) => modifier.move_item(from, to, false),
            None => {
                tracing::warn!(target: targets::PROVIDER, %from, %to, "move without a data modifier");
                Ok(())
            }
        }
    }

    /// Deletes the element at `at` on the user's request; the deletion is
    /// animated like any other edit.
    ///
    /// # Panics
    ///
    /// If an animator is bound to the view and the view's lock is held
    /// during this call.
    pub fn delete_item(&self, at: Coordinate) -> Result<()> {
        match &self.modifier {
            Some(modifier) => modifier.delete_item(at),
            None => {
                tracing::warn!(target: targets::PROVIDER, %at, "delete without a data modifier");
                Ok(())
            }
        }
    }
}

impl<V, T> fmt::Debug for ViewDataSource<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDataSource")
            .field("provider", &self.provider)
            .field("renderers", &self.renderers)
            .field("modifier", &self.modifier.is_some())
            .finish()
    }
}
