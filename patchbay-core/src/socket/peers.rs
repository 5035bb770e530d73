//! Peer storage.
//!
//! One side of the peer relation. Sockets never own each other: a slot is a
//! weak, type-erased back-reference, and a slot whose referent has been
//! dropped (a *dead slot*) is detectable rather than dangling. The variant in
//! use is selected by the socket's cardinality.

use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use super::direction::Cardinality;
use super::handle::SocketNode;
use super::id::SocketId;

/// Weak, type-erased reference to another socket's shared state.
///
/// The peer's id is carried alongside the weak pointer so identity checks
/// keep working after the peer has been dropped.
#[derive(Clone)]
pub(crate) struct PeerRef {
    id: SocketId,
    node: Weak<dyn SocketNode>,
}

impl PeerRef {
    pub(crate) fn new(node: &Rc<dyn SocketNode>) -> Self {
        Self {
            id: node.id(),
            node: Rc::downgrade(node),
        }
    }

    pub(crate) fn id(&self) -> SocketId {
        self.id
    }

    /// Recover a strong reference, or `None` for a dead slot.
    pub(crate) fn upgrade(&self) -> Option<Rc<dyn SocketNode>> {
        self.node.upgrade()
    }
}

/// Peer slots for one side of the relation.
pub(crate) enum Peers {
    None,
    One(PeerRef),
    Many(SmallVec<[PeerRef; 4]>),
}

impl Peers {
    pub(crate) fn new() -> Self {
        Self::None
    }

    /// Record a peer on this side.
    ///
    /// A `Single` side replaces its slot and hands back the evicted peer so
    /// the caller can tear down the back-reference; a `Multiple` side appends
    /// without deduplication.
    pub(crate) fn attach(&mut self, cardinality: Cardinality, peer: PeerRef) -> Option<PeerRef> {
        match cardinality {
            Cardinality::Single => match std::mem::replace(self, Peers::One(peer)) {
                Peers::One(evicted) => Some(evicted),
                _ => None,
            },
            Cardinality::Multiple => {
                match self {
                    Peers::Many(slots) => slots.push(peer),
                    _ => {
                        let mut slots = SmallVec::new();
                        slots.push(peer);
                        *self = Peers::Many(slots);
                    }
                }
                None
            }
        }
    }

    /// Remove `id` from this side.
    ///
    /// A `Single` side resets to empty when its slot matches; a `Multiple`
    /// side removes the first matching slot. Unmatched ids are a no-op.
    /// Returns whether a slot was removed.
    pub(crate) fn detach(&mut self, id: SocketId) -> bool {
        match self {
            Peers::None => false,
            Peers::One(slot) => {
                if slot.id() == id {
                    *self = Peers::None;
                    true
                } else {
                    false
                }
            }
            Peers::Many(slots) => match slots.iter().position(|slot| slot.id() == id) {
                Some(index) => {
                    slots.remove(index);
                    true
                }
                None => false,
            },
        }
    }

    /// Number of slots, dead or alive.
    pub(crate) fn len(&self) -> usize {
        match self {
            Peers::None => 0,
            Peers::One(_) => 1,
            Peers::Many(slots) => slots.len(),
        }
    }

    pub(crate) fn contains(&self, id: SocketId) -> bool {
        match self {
            Peers::None => false,
            Peers::One(slot) => slot.id() == id,
            Peers::Many(slots) => slots.iter().any(|slot| slot.id() == id),
        }
    }

    /// The sole slot of a `Single` side, if present.
    pub(crate) fn sole(&self) -> Option<&PeerRef> {
        match self {
            Peers::One(slot) => Some(slot),
            _ => None,
        }
    }

    /// Copy of the current slots, in connection order.
    ///
    /// Traversal iterates a snapshot so a callback that rewires the socket
    /// mid-propagation cannot invalidate the walk.
    pub(crate) fn snapshot(&self) -> SmallVec<[PeerRef; 4]> {
        match self {
            Peers::None => SmallVec::new(),
            Peers::One(slot) => {
                let mut slots = SmallVec::new();
                slots.push(slot.clone());
                slots
            }
            Peers::Many(slots) => slots.clone(),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
