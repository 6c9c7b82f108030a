//! Renderers that configure a view's visual for one element.
//!
//! A view may display heterogeneous elements. Each [`ItemRenderer`] declares
//! which elements it accepts and under which reuse key its visuals are
//! recycled; the [`RendererRegistry`] picks the first renderer accepting an
//! element whenever an item is inserted or updated.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Coordinate;

/// Configures the visual of one kind of element inside a view `V`.
///
/// # Example
///
/// ```
/// use horizon_sourcing::model::Coordinate;
/// use horizon_sourcing::view::ItemRenderer;
///
/// struct Labels(Vec<String>);
///
/// struct NumberRenderer;
///
/// impl ItemRenderer<Labels, i64> for NumberRenderer {
///     fn reuse_key(&self, _element: &i64) -> String {
///         "number".into()
///     }
///
///     fn configure(&self, view: &mut Labels, _at: Coordinate, element: &i64) {
///         view.0.push(element.to_string());
///     }
/// }
/// ```
pub trait ItemRenderer<V, T>: Send + Sync {
    /// Identifier under which visuals produced by this renderer are recycled.
    fn reuse_key(&self, element: &T) -> String;

    /// Whether this renderer can display `element`.
    fn can_render(&self, _element: &T) -> bool {
        true
    }

    /// Configures the visual at `at` to show `element`.
    fn configure(&self, view: &mut V, at: Coordinate, element: &T);
}

/// An ordered list of renderers, resolved first-match.
pub struct RendererRegistry<V, T> {
    renderers: Vec<Arc<dyn ItemRenderer<V, T>>>,
}

impl<V, T> RendererRegistry<V, T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Appends a renderer; earlier registrations take precedence.
    pub fn register<R>(&mut self, renderer: R) -> &mut Self
    where
        R: ItemRenderer<V, T> + 'static,
    {
        self.renderers.push(Arc::new(renderer));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<R>(mut self, renderer: R) -> Self
    where
        R: ItemRenderer<V, T> + 'static,
    {
        self.register(renderer);
        self
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// The first renderer accepting `element`.
    pub fn resolve(&self, element: &T) -> Result<&dyn ItemRenderer<V, T>> {
        self.renderers
            .iter()
            .find(|renderer| renderer.can_render(element))
            .map(|renderer| renderer.as_ref())
            .ok_or_else(|| {
                Error::misconfigured(format!(
                    "none of {} registered renderers accepts the element",
                    self.renderers.len()
                ))
            })
    }

    /// The first renderer accepting `element` that uses `key` for reuse.
    pub fn renderer_for_key(&self, key: &str, element: &T) -> Option<&dyn ItemRenderer<V, T>> {
        self.renderers
            .iter()
            .find(|renderer| renderer.can_render(element) && renderer.reuse_key(element) == key)
            .map(|renderer| renderer.as_ref())
    }

    /// Configures `at` through the resolved renderer and returns its reuse key.
    pub fn configure(&self, view: &mut V, at: Coordinate, element: &T) -> Result<String> {
        let renderer = self.resolve(element)?;
        renderer.configure(view, at, element);
        Ok(renderer.reuse_key(element))
    }
}

impl<V, T> Default for RendererRegistry<V, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, T> fmt::Debug for RendererRegistry<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.renderers.len())
            .finish()
    }
}
