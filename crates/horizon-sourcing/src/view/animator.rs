//! Applying published change-sets to a view.
//!
//! A [`ChangeAnimator`] observes one data provider and turns each published
//! [`ChangeSet`] into primitive calls on one [`BatchView`]:
//!
//! - `FullReload` reloads the view.
//! - `SilentEdits` issues no view call at all.
//! - `Edits` opens one batch transaction, issues one primitive per edit in
//!   the published order, and closes the transaction on every exit path.
//!
//! Edits are passed through unmodified; renumbering is left to the view's
//! batch semantics. A coordinate that does not fit the view or the model
//! means the two have desynchronized. That is an integration bug, so the
//! observer path panics instead of reloading.
//!
//! The view's mutex must be free when a change-set is published. A view that
//! edits the provider while holding its own lock (say, from a swipe handler)
//! gets a panic rather than a deadlock.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Weak};

use horizon_sourcing_core::PerfSpan;
use horizon_sourcing_core::logging::{span_names, targets};
use parking_lot::{Mutex, MutexGuard};

use super::renderer::RendererRegistry;
use super::traits::BatchView;
use crate::error::{Error, Result};
use crate::model::{ChangeSet, Coordinate, DataProvider, Edit, ObserverGuard, SectionedSource};
use crate::settings::{AnimatorConfig, UpdateStrategy};

const TARGET: &str = targets::ANIMATOR;

type Reconfigure<V> = Box<dyn Fn(&mut V, Coordinate, Coordinate) -> Result<()> + Send + Sync>;

/// Whether an animator is between batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
    #[default]
    Idle,
    ApplyingBatch,
}

/// Binds a provider's change-sets to a view.
///
/// The animator holds neither the view nor the provider alive. Its
/// registration on the provider is removed when the animator is dropped.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use parking_lot::Mutex;
/// use horizon_sourcing::model::{ArrayDataProvider, Coordinate};
/// use horizon_sourcing::view::{BatchView, ChangeAnimator};
///
/// #[derive(Default)]
/// struct Log(Vec<String>);
///
/// impl BatchView for Log {
///     fn number_of_sections(&self) -> usize { 1 }
///     fn number_of_items(&self, _section: usize) -> usize { 3 }
///     fn reload_data(&mut self) { self.0.push("reload".into()) }
///     fn begin_updates(&mut self) { self.0.push("begin".into()) }
///     fn end_updates(&mut self) { self.0.push("end".into()) }
///     fn insert_item(&mut self, at: Coordinate) { self.0.push(format!("insert {at}")) }
///     fn delete_item(&mut self, at: Coordinate) { self.0.push(format!("delete {at}")) }
///     fn move_item(&mut self, from: Coordinate, to: Coordinate) {
///         self.0.push(format!("move {from} {to}"))
///     }
///     fn reload_item(&mut self, at: Coordinate) { self.0.push(format!("reload {at}")) }
///     fn insert_section(&mut self, _index: usize) {}
///     fn delete_section(&mut self, _index: usize) {}
///     fn move_section(&mut self, _from: usize, _to: usize) {}
/// }
///
/// let provider = Arc::new(ArrayDataProvider::from_rows(vec!["a", "b", "c"]));
/// let view = Arc::new(Mutex::new(Log::default()));
/// let _animator = ChangeAnimator::new(&view, &provider);
///
/// provider.delete_item(Coordinate::new(0, 1), false).unwrap();
/// assert_eq!(view.lock().0, vec!["reload", "begin", "delete (0, 1)", "end"]);
/// ```
pub struct ChangeAnimator<V: BatchView + 'static> {
    inner: Arc<AnimatorInner<V>>,
    _observer: ObserverGuard,
}

struct AnimatorInner<V> {
    view: Weak<Mutex<V>>,
    provider: Weak<dyn SectionedSource>,
    config: AnimatorConfig,
    reconfigure: Option<Reconfigure<V>>,
    state: Mutex<BatchState>,
}

impl<V: BatchView + 'static> ChangeAnimator<V> {
    /// Binds `provider` to `view` with the default configuration.
    pub fn new<P>(view: &Arc<Mutex<V>>, provider: &Arc<P>) -> Self
    where
        P: SectionedSource + 'static,
    {
        let inner = AnimatorInner {
            view: Arc::downgrade(view),
            provider: Arc::downgrade(provider) as Weak<dyn SectionedSource>,
            config: AnimatorConfig::default(),
            reconfigure: None,
            state: Mutex::new(BatchState::Idle),
        };
        Self::attach(inner, provider.as_ref())
    }

    /// Starts configuring an animator binding `provider` to `view`.
    pub fn builder<P>(view: &Arc<Mutex<V>>, provider: &Arc<P>) -> ChangeAnimatorBuilder<V>
    where
        P: SectionedSource + 'static,
    {
        ChangeAnimatorBuilder {
            view: Arc::downgrade(view),
            provider: Arc::downgrade(provider) as Weak<dyn SectionedSource>,
            observable: Arc::clone(provider) as Arc<dyn SectionedSource>,
            config: AnimatorConfig::default(),
            reconfigure: None,
        }
    }

    fn attach(inner: AnimatorInner<V>, provider: &dyn SectionedSource) -> Self {
        let inner = Arc::new(inner);
        if let Some(view) = inner.view.upgrade() {
            lock_view(&view).reload_data();
        }

        let weak = Arc::downgrade(&inner);
        let observer = provider.observable().add_scoped_observer(move |change| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Err(err) = inner.apply(change) {
                tracing::error!(target: TARGET, %err, kind = change.kind(), "view and model desynchronized");
                panic!("view and model desynchronized: {err}");
            }
        });

        tracing::debug!(target: TARGET, strategy = ?inner.config.update_strategy, "animator attached");
        Self {
            inner,
            _observer: observer,
        }
    }

    /// Applies `change` to the view, returning the desync error instead of
    /// panicking.
    ///
    /// The view must not have seen `change` already; this is meant for
    /// integrators that feed change-sets to a view themselves.
    pub fn try_apply(&self, change: &ChangeSet) -> Result<()> {
        self.inner.apply(change)
    }

    /// Current batch state.
    pub fn state(&self) -> BatchState {
        *self.inner.state.lock()
    }

    /// The configuration in use.
    pub fn config(&self) -> AnimatorConfig {
        self.inner.config
    }
}

impl<V: BatchView + 'static> fmt::Debug for ChangeAnimator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeAnimator")
            .field("config", &self.inner.config)
            .field("state", &self.state())
            .field("reconfigure", &self.inner.reconfigure.is_some())
            .finish_non_exhaustive()
    }
}

impl<V: BatchView> AnimatorInner<V> {
    fn apply(&self, change: &ChangeSet) -> Result<()> {
        let Some(view) = self.view.upgrade() else {
            tracing::debug!(target: TARGET, "view dropped; ignoring change set");
            return Ok(());
        };
        let _batch_state = BatchStateGuard::enter(&self.state);

        match change {
            ChangeSet::FullReload => {
                tracing::trace!(target: TARGET, "reloading view");
                lock_view(&view).reload_data();
            }
            ChangeSet::SilentEdits(edits) => {
                tracing::trace!(target: TARGET, edits = edits.len(), "edits already visible");
            }
            ChangeSet::Edits(edits) => {
                let _span = PerfSpan::new(span_names::APPLY_BATCH);
                let mut view = lock_view(&view);
                if self.config.verify_coordinates {
                    self.verify(&*view, edits)?;
                }

                let mut transaction = BatchTransaction::begin(&mut *view);
                for edit in edits {
                    self.apply_edit(&mut transaction, *edit, change)?;
                }
            }
        }
        Ok(())
    }

    fn apply_edit(&self, view: &mut V, edit: Edit, change: &ChangeSet) -> Result<()> {
        match edit {
            Edit::InsertItem(at) => view.insert_item(at),
            Edit::DeleteItem(at) => view.delete_item(at),
            Edit::MoveItem { from, to } => view.move_item(from, to),
            Edit::UpdateItem(at) => match (&self.reconfigure, self.config.update_strategy) {
                (Some(reconfigure), UpdateStrategy::Reconfigure) => {
                    // The model already holds the post-batch state.
                    let current = change
                        .coordinate_after(at)
                        .ok_or_else(|| Error::item_out_of_range(at, view.number_of_items(at.section)))?;
                    reconfigure(view, at, current)?
                }
                _ => view.reload_item(at),
            },
            Edit::InsertSection(index) => view.insert_section(index),
            Edit::DeleteSection(index) => view.delete_section(index),
            Edit::MoveSection { from, to } => view.move_section(from, to),
            Edit::UpdateSection(index) => {
                if view.supports_section_reload() {
                    view.reload_section(index);
                } else {
                    tracing::trace!(target: TARGET, index, "view cannot reload sections; dropping section update");
                }
            }
        }
        Ok(())
    }

    /// Checks every coordinate of `edits` before the transaction opens.
    ///
    /// Deletions, updates and move sources must exist in the view as it is
    /// now. Insertions and move destinations must exist in the model, which
    /// already holds the post-batch state.
    fn verify(&self, view: &V, edits: &[Edit]) -> Result<()> {
        let provider = self.provider.upgrade();
        if provider.is_none() {
            tracing::warn!(target: TARGET, "provider dropped; verifying against the view only");
        }
        let provider = provider.as_deref();

        for edit in edits {
            match *edit {
                Edit::DeleteItem(at) | Edit::UpdateItem(at) => check_view_item(view, at)?,
                Edit::InsertItem(at) => check_model_item(provider, at)?,
                Edit::MoveItem { from, to } => {
                    check_view_item(view, from)?;
                    check_model_item(provider, to)?;
                }
                Edit::DeleteSection(index) | Edit::UpdateSection(index) => {
                    check_view_section(view, index)?
                }
                Edit::InsertSection(index) => check_model_section(provider, index)?,
                Edit::MoveSection { from, to } => {
                    check_view_section(view, from)?;
                    check_model_section(provider, to)?;
                }
            }
        }
        Ok(())
    }
}

fn check_view_section<V: BatchView>(view: &V, section: usize) -> Result<()> {
    let count = view.number_of_sections();
    if section >= count {
        return Err(Error::section_out_of_range(section, count));
    }
    Ok(())
}

fn check_view_item<V: BatchView>(view: &V, at: Coordinate) -> Result<()> {
    check_view_section(view, at.section)?;
    let count = view.number_of_items(at.section);
    if at.item >= count {
        return Err(Error::item_out_of_range(at, count));
    }
    Ok(())
}

fn check_model_section(provider: Option<&dyn SectionedSource>, section: usize) -> Result<()> {
    let Some(provider) = provider else {
        return Ok(());
    };
    let count = provider.section_count();
    if section >= count {
        return Err(Error::section_out_of_range(section, count));
    }
    Ok(())
}

fn check_model_item(provider: Option<&dyn SectionedSource>, at: Coordinate) -> Result<()> {
    let Some(provider) = provider else {
        return Ok(());
    };
    let count = provider.item_count(at.section)?;
    if at.item >= count {
        return Err(Error::item_out_of_range(at, count));
    }
    Ok(())
}

fn lock_view<V>(view: &Mutex<V>) -> MutexGuard<'_, V> {
    match view.try_lock() {
        Some(guard) => guard,
        None => {
            tracing::error!(target: TARGET, "view is locked while a change set is applied");
            panic!("view is locked during publish: the view's own lock was held while the provider changed");
        }
    }
}

/// Marks the animator busy for the duration of one application.
struct BatchStateGuard<'a> {
    state: &'a Mutex<BatchState>,
}

impl<'a> BatchStateGuard<'a> {
    fn enter(state: &'a Mutex<BatchState>) -> Self {
        let mut current = state.lock();
        if *current == BatchState::ApplyingBatch {
            drop(current);
            tracing::error!(target: TARGET, "change set published while a batch is being applied");
            panic!("re-entrant publish: a change set arrived while a batch was being applied");
        }
        *current = BatchState::ApplyingBatch;
        Self { state }
    }
}

impl Drop for BatchStateGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = BatchState::Idle;
    }
}

/// An open batch on a view; closes it when dropped, including on unwind.
struct BatchTransaction<'a, V: BatchView> {
    view: &'a mut V,
}

impl<'a, V: BatchView> BatchTransaction<'a, V> {
    fn begin(view: &'a mut V) -> Self {
        view.begin_updates();
        Self { view }
    }
}

impl<V: BatchView> Deref for BatchTransaction<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: BatchView> DerefMut for BatchTransaction<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: BatchView> Drop for BatchTransaction<'_, V> {
    fn drop(&mut self) {
        self.view.end_updates();
    }
}

/// Builder for [`ChangeAnimator`].
pub struct ChangeAnimatorBuilder<V: BatchView + 'static> {
    view: Weak<Mutex<V>>,
    provider: Weak<dyn SectionedSource>,
    observable: Arc<dyn SectionedSource>,
    config: AnimatorConfig,
    reconfigure: Option<Reconfigure<V>>,
}

impl<V: BatchView + 'static> ChangeAnimatorBuilder<V> {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: AnimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Turns coordinate verification on or off.
    pub fn verify_coordinates(mut self, verify: bool) -> Self {
        self.config.verify_coordinates = verify;
        self
    }

    /// Reconfigures updated items in place with `reconfigure` instead of
    /// reloading them, and selects [`UpdateStrategy::Reconfigure`].
    ///
    /// `reconfigure` runs inside the batch and receives the item's
    /// coordinate in the view (pre-batch) followed by its coordinate in the
    /// provider, which already holds the post-batch content.
    pub fn reconfigure<F>(mut self, reconfigure: F) -> Self
    where
        F: Fn(&mut V, Coordinate, Coordinate) -> Result<()> + Send + Sync + 'static,
    {
        self.reconfigure = Some(Box::new(reconfigure));
        self.config.update_strategy = UpdateStrategy::Reconfigure;
        self
    }

    /// Reconfigures updated items through `renderers`, reading the element
    /// from `provider`.
    pub fn reconfigure_with_renderers<P, T>(
        self,
        provider: &Arc<P>,
        renderers: Arc<RendererRegistry<V, T>>,
    ) -> Self
    where
        P: DataProvider<Element = T> + 'static,
        T: 'static,
    {
        let provider = Arc::downgrade(provider);
        self.reconfigure(move |view, at, current| {
            let Some(provider) = provider.upgrade() else {
                return Ok(());
            };
            let element = provider.element_at(current)?;
            renderers.configure(view, at, &element).map(|_| ())
        })
    }

    /// Attaches the animator and reloads the view.
    ///
    /// Fails with [`Error::MisconfiguredObserver`] if the configuration asks
    /// for in-place reconfiguration but no reconfiguration function was given.
    pub fn build(self) -> Result<ChangeAnimator<V>> {
        if self.config.update_strategy == UpdateStrategy::Reconfigure && self.reconfigure.is_none()
        {
            return Err(Error::misconfigured(
                "update strategy is `reconfigure` but no reconfiguration function was supplied",
            ));
        }

        let inner = AnimatorInner {
            view: self.view,
            provider: self.provider,
            config: self.config,
            reconfigure: self.reconfigure,
            state: Mutex::new(BatchState::Idle),
        };
        Ok(ChangeAnimator::attach(inner, self.observable.as_ref()))
    }
}

impl<V: BatchView + 'static> fmt::Debug for ChangeAnimatorBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeAnimatorBuilder")
            .field("config", &self.config)
            .field("reconfigure", &self.reconfigure.is_some())
            .finish_non_exhaustive()
    }
}
