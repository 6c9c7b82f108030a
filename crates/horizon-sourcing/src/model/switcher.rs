//! Switching between data providers based on a state value.
//!
//! A [`DataProviderSwitcher`] lets a view bind once while the data behind it
//! changes wholesale, e.g. when a segmented control picks a different list.
//! Change-sets of the current provider are forwarded through the switcher's
//! own emitter; switching publishes a full reload.

use std::fmt;
use std::sync::Arc;

use horizon_sourcing_core::Signal;
use horizon_sourcing_core::logging::targets;
use parking_lot::{Mutex, RwLock};

use super::any_provider::AnyDataProvider;
use super::change::ChangeSet;
use super::coordinate::Coordinate;
use super::emitter::{ChangeEmitter, ObserverGuard};
use super::traits::{DataProvider, SectionedSource};
use crate::error::Result;

type Resolver<S, T> = Box<dyn Fn(&S) -> AnyDataProvider<T> + Send + Sync>;

/// A provider that delegates to one of several providers chosen by a state.
///
/// # Example
///
/// ```
/// use horizon_sourcing::model::{
///     AnyDataProvider, ArrayDataProvider, DataProvider, DataProviderSwitcher, SectionedSource,
/// };
///
/// #[derive(Clone, Copy, PartialEq)]
/// enum Tab { Fruit, Vegetables }
///
/// let fruit = AnyDataProvider::new(ArrayDataProvider::from_rows(vec!["apple", "pear"]));
/// let vegetables = AnyDataProvider::new(ArrayDataProvider::from_rows(vec!["leek"]));
///
/// let switcher = DataProviderSwitcher::new(Tab::Fruit, move |tab| match tab {
///     Tab::Fruit => fruit.clone(),
///     Tab::Vegetables => vegetables.clone(),
/// });
/// assert_eq!(switcher.item_count(0).unwrap(), 2);
///
/// switcher.set_state(Tab::Vegetables);
/// assert_eq!(switcher.item_count(0).unwrap(), 1);
/// ```
pub struct DataProviderSwitcher<S, T> {
    state: RwLock<S>,
    resolver: Resolver<S, T>,
    current: RwLock<AnyDataProvider<T>>,
    emitter: Arc<ChangeEmitter>,
    forwarding: Mutex<Option<ObserverGuard>>,
    /// Emitted after the current provider was replaced, before the
    /// accompanying full reload is published.
    pub provider_changed: Signal<()>,
}

impl<S, T> DataProviderSwitcher<S, T>
where
    S: Send + Sync + 'static,
    T: Clone + 'static,
{
    /// Creates a switcher in `state`, resolving providers with `resolver`.
    pub fn new<F>(state: S, resolver: F) -> Self
    where
        F: Fn(&S) -> AnyDataProvider<T> + Send + Sync + 'static,
    {
        let current = resolver(&state);
        let emitter = Arc::new(ChangeEmitter::new());
        let forwarding = forward(&current, &emitter);
        Self {
            state: RwLock::new(state),
            resolver: Box::new(resolver),
            current: RwLock::new(current),
            emitter,
            forwarding: Mutex::new(Some(forwarding)),
            provider_changed: Signal::new(),
        }
    }

    /// Switches to `state`.
    ///
    /// The provider resolved for `state` becomes current even if it is the
    /// same provider as before; observers always receive
    /// [`ChangeSet::FullReload`].
    pub fn set_state(&self, state: S) {
        let provider = (self.resolver)(&state);
        *self.state.write() = state;

        let guard = forward(&provider, &self.emitter);
        let previous = self.forwarding.lock().replace(guard);
        drop(previous);
        *self.current.write() = provider;

        tracing::debug!(target: targets::SWITCHER, "data provider switched");
        self.provider_changed.emit(());
        self.emitter.publish(ChangeSet::FullReload);
    }

    /// Reads the current state.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        f(&self.state.read())
    }

    /// The provider currently delegated to.
    pub fn current_provider(&self) -> AnyDataProvider<T> {
        self.current.read().clone()
    }
}

impl<S, T> DataProviderSwitcher<S, T>
where
    S: Clone + Send + Sync + 'static,
    T: Clone + 'static,
{
    /// A copy of the current state.
    pub fn state(&self) -> S {
        self.state.read().clone()
    }
}

fn forward<T: Clone + 'static>(
    provider: &AnyDataProvider<T>,
    emitter: &Arc<ChangeEmitter>,
) -> ObserverGuard {
    let target = Arc::downgrade(emitter);
    provider.observable().add_scoped_observer(move |change| {
        if let Some(emitter) = target.upgrade() {
            emitter.publish(change.clone());
        }
    })
}

impl<S, T> SectionedSource for DataProviderSwitcher<S, T>
where
    S: Send + Sync + 'static,
    T: Clone + 'static,
{
    fn section_count(&self) -> usize {
        self.current.read().section_count()
    }

    fn item_count(&self, section: usize) -> Result<usize> {
        self.current.read().item_count(section)
    }

    fn observable(&self) -> &ChangeEmitter {
        &self.emitter
    }

    fn section_index_titles(&self) -> Option<Vec<String>> {
        self.current.read().section_index_titles()
    }
}

impl<S, T> DataProvider for DataProviderSwitcher<S, T>
where
    S: Send + Sync + 'static,
    T: Clone + 'static,
{
    type Element = T;

    fn element_at(&self, coordinate: Coordinate) -> Result<T> {
        self.current.read().element_at(coordinate)
    }
}

impl<S: fmt::Debug, T> fmt::Debug for DataProviderSwitcher<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProviderSwitcher")
            .field("state", &*self.state.read())
            .field("current", &*self.current.read())
            .field("observers", &self.emitter.observer_count())
            .finish_non_exhaustive()
    }
}
