//! Publication of change-sets to observers.

use horizon_sourcing_core::logging::{span_names, targets};
use horizon_sourcing_core::{ConnectionGuard, ConnectionId, PerfSpan, Signal};

use super::change::ChangeSet;

/// Opaque token identifying one registered observer.
pub type ObserverToken = ConnectionId;

/// RAII registration that removes its observer when dropped.
pub type ObserverGuard = ConnectionGuard<ChangeSet>;

/// Publishes every [`ChangeSet`] of one data provider to its observers.
///
/// Delivery is synchronous, on the publishing thread, in registration order.
/// Each observer receives change-sets in exactly the order they were
/// published. The emitter never owns its observers' targets: whoever
/// registers is responsible for removing the registration, typically by
/// holding an [`ObserverGuard`].
///
/// Publishing is not re-entrant: an observer must not mutate the provider
/// it is observing from inside its callback.
///
/// # Example
///
/// ```
/// use horizon_sourcing::model::{ChangeEmitter, ChangeSet};
///
/// let emitter = ChangeEmitter::new();
/// let token = emitter.add_observer(|change| println!("{:?}", change));
/// emitter.publish(ChangeSet::FullReload);
/// assert!(emitter.remove_observer(token));
/// assert!(!emitter.remove_observer(token));
/// ```
#[derive(Debug, Default)]
pub struct ChangeEmitter {
    signal: Signal<ChangeSet>,
}

impl ChangeEmitter {
    /// Creates an emitter without observers.
    pub fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Registers `observer` for every change-set published after this call.
    pub fn add_observer<F>(&self, observer: F) -> ObserverToken
    where
        F: Fn(&ChangeSet) + Send + Sync + 'static,
    {
        self.signal.connect(observer)
    }

    /// Registers `observer` and returns a guard that removes it on drop.
    pub fn add_scoped_observer<F>(&self, observer: F) -> ObserverGuard
    where
        F: Fn(&ChangeSet) + Send + Sync + 'static,
    {
        self.signal.connect_scoped(observer)
    }

    /// Removes a registration.
    ///
    /// Unknown or already-removed tokens are ignored and return `false`;
    /// teardown order commonly makes this happen.
    pub fn remove_observer(&self, token: ObserverToken) -> bool {
        let removed = self.signal.disconnect(token);
        if !removed {
            tracing::debug!(target: targets::PROVIDER, ?token, "removing unknown observer token");
        }
        removed
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.signal.connection_count()
    }

    /// Delivers `change` to every registered observer.
    ///
    /// An observer that panics does not prevent later observers from
    /// receiving the change-set; the first panic is resumed afterwards.
    pub fn publish(&self, change: ChangeSet) {
        tracing::debug!(
            target: targets::PROVIDER,
            kind = change.kind(),
            edits = change.edits().len(),
            observers = self.observer_count(),
            "publishing change set"
        );
        let _span = PerfSpan::new(span_names::PUBLISH);
        self.signal.emit(change);
    }
}
