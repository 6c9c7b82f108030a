//! Synchronous signal/slot primitive for Horizon Sourcing.
//!
//! A [`Signal<Args>`] holds zero or more connected slots (callbacks) and
//! invokes every one of them, synchronously and in registration order,
//! whenever [`Signal::emit`] is called. There is no queueing and no event
//! loop: the slot runs on the emitting thread before `emit` returns.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type that slots connect to
//! - [`ConnectionId`] - Opaque token returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Ownership
//!
//! A signal never keeps its subscribers alive beyond the slot closure it was
//! handed, and a [`ConnectionGuard`] never keeps the signal alive. Whoever
//! connects is responsible for disconnecting, either explicitly through
//! [`Signal::disconnect`] or by dropping the guard.
//!
//! # Panics in slots
//!
//! A slot that panics does not stop delivery: the remaining slots are still
//! invoked with the same arguments. Once every slot has run, the first panic
//! is resumed on the emitting thread so that the failure stays visible.
//!
//! # Example
//!
//! ```
//! use horizon_sourcing_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//!
//! text_changed.disconnect(conn_id);
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped. Disconnecting an ID a second time is harmless.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    /// Monotonic registration number; slotmap iteration order follows slot
    /// reuse, not insertion, so emission sorts on this.
    seq: u64,
}

struct Connections<Args> {
    map: SlotMap<ConnectionId, Connection<Args>>,
    next_seq: u64,
}

impl<Args> Connections<Args> {
    fn new() -> Self {
        Self {
            map: SlotMap::with_key(),
            next_seq: 0,
        }
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync`. Emission is always direct: slots run on
/// whichever thread calls [`emit`](Self::emit).
pub struct Signal<Args> {
    connections: Arc<Mutex<Connections<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connection_count", &self.connections.lock().map.len())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(Connections::new())),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_sourcing_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// assert!(signal.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let seq = connections.next_seq;
        connections.next_seq += 1;
        connections.map.insert(Connection {
            slot: Arc::new(slot),
            seq,
        })
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard only holds a weak reference to the signal's connection table,
    /// so it is fine for the signal to be dropped first.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id,
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` if the
    /// ID was unknown or had already been disconnected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().map.remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().map.clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().map.len()
    }

    /// Returns `true` if the given connection is still registered.
    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.lock().map.contains_key(id)
    }

    /// Emit the signal, invoking all connected slots in registration order.
    ///
    /// The connection lock is not held while slots run, so a slot may
    /// connect or disconnect (including itself). A slot disconnected during
    /// this emission is skipped if it has not been reached yet; a slot
    /// connected during this emission first receives the next one.
    ///
    /// # Panics
    ///
    /// Resumes the first slot panic after every other slot has been invoked.
    #[tracing::instrument(skip_all, target = "horizon_sourcing_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots = self.snapshot();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        let mut first_panic = None;
        for (id, slot) in slots {
            if !self.is_connected(id) {
                continue;
            }
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| slot(&args))) {
                tracing::error!(
                    target: targets::SIGNAL,
                    "slot panicked, continuing with remaining slots"
                );
                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
    }

    fn snapshot(&self) -> Vec<(ConnectionId, Slot<Args>)> {
        let connections = self.connections.lock();
        let mut slots: Vec<_> = connections
            .map
            .iter()
            .map(|(id, conn)| (conn.seq, id, conn.slot.clone()))
            .collect();
        drop(connections);
        slots.sort_unstable_by_key(|(seq, _, _)| *seq);
        slots.into_iter().map(|(_, id, slot)| (id, slot)).collect()
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. Holding the guard does not keep
/// the signal alive; if the signal is gone, dropping the guard does nothing.
///
/// # Example
///
/// ```
/// use horizon_sourcing_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);  // counter = 42
/// }
/// signal.emit(43);  // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args> {
    connections: Weak<Mutex<Connections<Args>>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The connection this guard owns.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Disconnect now instead of at drop time.
    ///
    /// Returns `true` if the connection was still registered.
    pub fn disconnect(self) -> bool {
        self.remove()
    }

    fn remove(&self) -> bool {
        match self.connections.upgrade() {
            Some(connections) => connections.lock().map.remove(self.id).is_some(),
            None => false,
        }
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        let _ = self.remove();
    }
}
