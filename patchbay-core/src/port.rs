//! Port Implementation
//!
//! A [`Port`] is a typed socket: the wiring layer plus a cached value and
//! the two value-movement protocols.
//!
//! # Push
//!
//! `update` stores the value on producing ports and forwards it, eagerly and
//! synchronously, to every connected strictly-Input peer before returning.
//! An Input port is a push terminus: it raises its `Updated` callbacks but
//! forwards nothing and records nothing, so a multi-peer consumer can still
//! collect its upstream values individually on the pull side.
//!
//! # Pull
//!
//! `get_value` answers from the cache when the port is authoritative
//! (Output) or already satisfied by a push (Bidirectional), and otherwise
//! derives the value from upstream on demand, without mutating the cache.
//! Multiple-cardinality derivation is fail-closed: one unusable upstream
//! slot makes the whole result Empty rather than a partial collection.
//!
//! # Callbacks
//!
//! Handlers are keyed by event kind plus a caller-chosen name, so one can be
//! removed without disturbing the rest. `Updated` handlers run in
//! registration order on every update call, after caching and propagation.
//! Handler lists and peer lists are snapshotted before iteration, so a
//! handler may rewire the graph or edit the registry mid-push.
//!
//! # Hazards guarded
//!
//! Propagation carries a visited set keyed on socket identity. A wiring loop
//! or a duplicate edge therefore delivers one update per port per push
//! instead of recursing without bound.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::socket::{
    AsSocket, CallbackError, Cardinality, Direction, Event, PeerRef, Peers, SocketId, SocketNode,
    SocketRef,
};
use crate::value::TypedValue;

/// Handler invoked with the port raising the event and the pushed value.
pub type Callback<T> = Rc<dyn Fn(&Port<T>, &T)>;

/// A typed connection endpoint with push/pull value movement.
///
/// `Port<T>` is a cheap-clone handle over shared state: clones refer to the
/// same socket and share its identity, wiring, cache, and callbacks. The
/// host owns every port's lifetime; dropping the last handle leaves former
/// peers with detectable dead slots, never dangling references.
///
/// # Example
///
/// ```rust
/// use patchbay_core::port::Port;
/// use patchbay_core::socket::Cardinality;
///
/// let source = Port::output(Cardinality::Multiple);
/// let sink = Port::input(Cardinality::Single);
///
/// assert!(source.connect(&sink));
/// source.update(8);
///
/// assert_eq!(sink.get_value().single(), Ok(8));
/// ```
pub struct Port<T: 'static> {
    inner: Rc<PortInner<T>>,
}

pub(crate) struct PortInner<T: 'static> {
    id: SocketId,
    direction: Direction,
    cardinality: Cardinality,
    peers: RefCell<Peers>,
    cached: RefCell<TypedValue<T>>,
    callbacks: RefCell<BTreeMap<Event, IndexMap<String, Callback<T>>>>,
}

impl<T: Clone + 'static> Port<T> {
    /// Create a new unconnected port.
    pub fn new(direction: Direction, cardinality: Cardinality) -> Self {
        Self {
            inner: Rc::new(PortInner {
                id: SocketId::new(),
                direction,
                cardinality,
                peers: RefCell::new(Peers::new()),
                cached: RefCell::new(TypedValue::Empty),
                callbacks: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    /// Create a consuming port.
    pub fn input(cardinality: Cardinality) -> Self {
        Self::new(Direction::Input, cardinality)
    }

    /// Create a producing port.
    pub fn output(cardinality: Cardinality) -> Self {
        Self::new(Direction::Output, cardinality)
    }

    /// Create a port that accepts either end of a wire.
    pub fn bidirectional(cardinality: Cardinality) -> Self {
        Self::new(Direction::Bidirectional, cardinality)
    }

    /// The port's unique socket id.
    pub fn id(&self) -> SocketId {
        self.inner.id
    }

    pub fn direction(&self) -> Direction {
        self.inner.direction
    }

    pub fn cardinality(&self) -> Cardinality {
        self.inner.cardinality
    }

    /// Number of peer slots currently held, dead or alive.
    pub fn peer_count(&self) -> usize {
        self.inner.peers.borrow().len()
    }

    pub fn is_connected_to(&self, other: &dyn AsSocket) -> bool {
        self.inner.peers.borrow().contains(other.as_socket().id())
    }

    /// See [`SocketRef::can_connect`].
    pub fn can_connect(&self, other: &dyn AsSocket) -> bool {
        self.as_socket().can_connect(other)
    }

    /// See [`SocketRef::connect`].
    pub fn connect(&self, other: &dyn AsSocket) -> bool {
        self.as_socket().connect(other)
    }

    /// See [`SocketRef::disconnect`].
    pub fn disconnect(&self, other: &dyn AsSocket) {
        self.as_socket().disconnect(other)
    }

    /// Push a value through this port.
    ///
    /// Producing ports (Output/Bidirectional) record the value as their
    /// cache and forward it to every live, strictly-Input peer, recursively
    /// and synchronously. Strictly-Input ports are termini: they forward and
    /// record nothing. Every port an update call reaches fires its `Updated`
    /// handlers with the pushed value, in registration order.
    pub fn update(&self, value: T) {
        trace!(socket = self.inner.id.raw(), "update");
        let mut visited = HashSet::new();
        visited.insert(self.inner.id);
        self.inner.apply(&value, &mut visited);
    }

    /// Read this port's value.
    ///
    /// Output ports answer from the cache verbatim (Empty if never pushed).
    /// Other ports answer from the cache once a push has satisfied them, and
    /// otherwise derive from upstream without mutating the cache: a Single
    /// side wraps its sole live, strictly-Output peer's value; a Multiple
    /// side collects every peer's value in connection order, failing closed
    /// to Empty when any slot is dead, not strictly Output, or valueless.
    pub fn get_value(&self) -> TypedValue<T> {
        self.inner.pull()
    }

    /// Register a handler under `(event, name)`.
    ///
    /// A name already registered for that event kind keeps its original
    /// handler.
    pub fn add_callback<F>(&self, event: Event, name: impl Into<String>, handler: F)
    where
        F: Fn(&Port<T>, &T) + 'static,
    {
        self.inner
            .callbacks
            .borrow_mut()
            .entry(event)
            .or_default()
            .entry(name.into())
            .or_insert_with(|| Rc::new(handler));
    }

    /// Remove the handler registered under `(event, name)`.
    ///
    /// Errs when `event` never had any registrations; removing an absent
    /// name under a known kind is a no-op.
    pub fn remove_callback(&self, event: Event, name: &str) -> Result<(), CallbackError> {
        let mut callbacks = self.inner.callbacks.borrow_mut();
        let named = callbacks
            .get_mut(&event)
            .ok_or(CallbackError::UnknownEvent(event))?;
        named.shift_remove(name);
        Ok(())
    }

    /// Number of handlers registered under `event`.
    pub fn callback_count(&self, event: Event) -> usize {
        self.inner
            .callbacks
            .borrow()
            .get(&event)
            .map_or(0, |named| named.len())
    }
}

impl<T: Clone + 'static> PortInner<T> {
    /// One step of push propagation.
    ///
    /// `visited` holds every socket this push has already reached, the
    /// origin included, so loops and duplicate edges deliver once.
    fn apply(self: &Rc<Self>, value: &T, visited: &mut HashSet<SocketId>) {
        if self.direction.can_produce() {
            *self.cached.borrow_mut() = TypedValue::Single(value.clone());

            let slots = self.peers.borrow().snapshot();
            for slot in slots {
                let Some(node) = slot.upgrade() else { continue };
                if node.direction() != Direction::Input {
                    continue;
                }
                if !visited.insert(node.id()) {
                    continue;
                }
                let Ok(peer) = node.into_any().downcast::<PortInner<T>>() else {
                    continue;
                };
                trace!(socket = self.id.raw(), peer = peer.id.raw(), "push");
                peer.apply(value, visited);
            }
        }

        self.fire_updated(value);
    }

    fn fire_updated(self: &Rc<Self>, value: &T) {
        let handlers: Vec<Callback<T>> = match self.callbacks.borrow().get(&Event::Updated) {
            Some(named) => named.values().cloned().collect(),
            None => return,
        };

        let port = Port {
            inner: Rc::clone(self),
        };
        for handler in handlers {
            handler(&port, value);
        }
    }

    fn pull(&self) -> TypedValue<T> {
        if self.direction == Direction::Output {
            return self.cached.borrow().clone();
        }

        {
            let cached = self.cached.borrow();
            if !cached.is_empty() {
                return cached.clone();
            }
        }

        match self.cardinality {
            Cardinality::Single => {
                let slot = {
                    let peers = self.peers.borrow();
                    match peers.sole() {
                        Some(slot) => slot.clone(),
                        None => return TypedValue::Empty,
                    }
                };
                match Self::pull_peer(&slot) {
                    Some(value) => TypedValue::Single(value),
                    None => TypedValue::Empty,
                }
            }
            Cardinality::Multiple => {
                let slots = self.peers.borrow().snapshot();
                if slots.is_empty() {
                    return TypedValue::Empty;
                }
                let mut values = Vec::with_capacity(slots.len());
                for slot in &slots {
                    match Self::pull_peer(slot) {
                        Some(value) => values.push(value),
                        None => return TypedValue::Empty,
                    }
                }
                TypedValue::Multiple(values)
            }
        }
    }

    /// Pull one upstream slot: it must be live, strictly Output, and hold a
    /// single value.
    fn pull_peer(slot: &PeerRef) -> Option<T> {
        let node = slot.upgrade()?;
        if node.direction() != Direction::Output {
            return None;
        }
        let peer = node.into_any().downcast::<PortInner<T>>().ok()?;
        match peer.pull() {
            TypedValue::Single(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: 'static> SocketNode for PortInner<T> {
    fn id(&self) -> SocketId {
        self.id
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn link(&self, peer: PeerRef) {
        let evicted = self.peers.borrow_mut().attach(self.cardinality, peer);
        if let Some(old) = evicted {
            if let Some(node) = old.upgrade() {
                node.unlink(self.id);
            }
        }
    }

    fn unlink(&self, id: SocketId) {
        self.peers.borrow_mut().detach(id);
    }

    fn peer_count(&self) -> usize {
        self.peers.borrow().len()
    }

    fn has_peer(&self, id: SocketId) -> bool {
        self.peers.borrow().contains(id)
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

impl<T: 'static> AsSocket for Port<T> {
    fn as_socket(&self) -> SocketRef {
        SocketRef {
            node: Rc::clone(&self.inner) as Rc<dyn SocketNode>,
        }
    }
}

impl<T: 'static> Clone for Port<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> fmt::Debug for Port<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Port")
            .field("id", &self.inner.id.raw())
            .field("direction", &self.inner.direction)
            .field("cardinality", &self.inner.cardinality)
            .field("peer_count", &self.inner.peers.borrow().len())
            .field("has_value", &!self.inner.cached.borrow().is_empty())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
