//! Type-erased socket handles and the wiring operations.
//!
//! Connection legality and topology live here, below the typed port layer.
//! A [`SocketRef`] is the erased face of a port: hosts that hold ports of
//! mixed value types store these side by side and offer any two of them to
//! [`SocketRef::connect`]; the runtime type tag is what rejects cross-type
//! wires that the type system can no longer see.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::direction::{Cardinality, Direction};
use super::id::SocketId;
use super::peers::PeerRef;

/// Object-safe interface over a socket's shared state.
///
/// Implemented by the typed port internals. Erasure is what lets
/// heterogeneous ports share one wiring surface; `into_any` is the way back
/// down to the concrete type once a same-type wire is being traversed.
pub(crate) trait SocketNode: Any {
    fn id(&self) -> SocketId;

    fn direction(&self) -> Direction;

    fn cardinality(&self) -> Cardinality;

    /// Tag identifying the concrete carried-value type.
    fn value_type(&self) -> TypeId;

    /// Record `peer` on this side, per this side's cardinality policy. A
    /// replaced Single-side peer is detached from its own end as well, so the
    /// symmetry of the relation survives the eviction.
    fn link(&self, peer: PeerRef);

    /// Remove `id` from this side only.
    fn unlink(&self, id: SocketId);

    fn peer_count(&self) -> usize;

    fn has_peer(&self, id: SocketId) -> bool;

    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// Conversion into the type-erased wiring surface.
///
/// Implemented by `Port<T>` and by [`SocketRef`] itself, so wiring calls
/// accept either without ceremony.
pub trait AsSocket {
    fn as_socket(&self) -> SocketRef;
}

/// Strong, cheap-clone, type-erased handle to a socket.
#[derive(Clone)]
pub struct SocketRef {
    pub(crate) node: Rc<dyn SocketNode>,
}

impl SocketRef {
    /// The socket's unique id.
    pub fn id(&self) -> SocketId {
        self.node.id()
    }

    pub fn direction(&self) -> Direction {
        self.node.direction()
    }

    pub fn cardinality(&self) -> Cardinality {
        self.node.cardinality()
    }

    /// Number of peer slots currently held, dead or alive.
    pub fn peer_count(&self) -> usize {
        self.node.peer_count()
    }

    pub fn is_connected_to(&self, other: &dyn AsSocket) -> bool {
        self.node.has_peer(other.as_socket().id())
    }

    /// Pure compatibility predicate, no side effects.
    ///
    /// True iff both sockets carry the same concrete value type and at least
    /// one side can produce while the other can consume, in either
    /// orientation.
    pub fn can_connect(&self, other: &dyn AsSocket) -> bool {
        let other = other.as_socket();
        self.node.value_type() == other.node.value_type()
            && self.direction().compatible_with(other.direction())
    }

    /// Wire this socket to `other`.
    ///
    /// Incompatible pairs are rejected silently; the return value reports
    /// whether the link was made. On success both sides are updated, and a
    /// peer evicted from a Single-cardinality side is detached from both
    /// ends before the new link lands.
    pub fn connect(&self, other: &dyn AsSocket) -> bool {
        let other = other.as_socket();
        if !self.can_connect(&other) {
            trace!(
                socket = self.id().raw(),
                peer = other.id().raw(),
                "connect rejected"
            );
            return false;
        }

        self.node.link(PeerRef::new(&other.node));
        other.node.link(PeerRef::new(&self.node));
        trace!(socket = self.id().raw(), peer = other.id().raw(), "connected");
        true
    }

    /// Unwire this socket from `other`, updating both ends.
    ///
    /// Ids that are not actually wired are left untouched.
    pub fn disconnect(&self, other: &dyn AsSocket) {
        let other = other.as_socket();
        self.node.unlink(other.id());
        other.node.unlink(self.id());
        trace!(
            socket = self.id().raw(),
            peer = other.id().raw(),
            "disconnected"
        );
    }
}

impl AsSocket for SocketRef {
    fn as_socket(&self) -> SocketRef {
        self.clone()
    }
}

impl PartialEq for SocketRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for SocketRef {}

impl fmt::Debug for SocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocketRef")
            .field("id", &self.id().raw())
            .field("direction", &self.direction())
            .field("cardinality", &self.cardinality())
            .field("peer_count", &self.peer_count())
            .finish()
    }
}
