//! Socket Wiring Layer
//!
//! This module implements the untyped half of a port: identity, direction
//! and cardinality policies, the peer relation, and the event vocabulary for
//! the callback registry.
//!
//! # Concepts
//!
//! ## Direction and compatibility
//!
//! A wire is legal when one end can produce and the other can consume.
//! `Bidirectional` sockets qualify for both roles, so they connect to
//! anything carrying the same value type.
//!
//! ## Cardinality
//!
//! Each side of the relation is either `Single` (one slot, replace on
//! reconnect) or `Multiple` (ordered slots, append on connect). The policy
//! belongs to the side, not the wire: a Single output can feed a Multiple
//! input, and each side applies its own rule.
//!
//! ## Symmetry
//!
//! The peer relation is symmetric: if A holds B, B holds A. `connect` and
//! `disconnect` update both ends in one operation, and the eviction a
//! Single side performs on reconnect removes the evicted peer's
//! back-reference too.
//!
//! ## Ownership
//!
//! Sockets never own their peers. Slots are weak references; a host may drop
//! a port at any time, and the ports that referenced it observe a dead slot
//! instead of dangling.

mod direction;
mod events;
mod handle;
mod id;
mod peers;

pub use direction::{Cardinality, Direction};
pub use events::{CallbackError, Event};
pub use handle::{AsSocket, SocketRef};
pub use id::SocketId;

pub(crate) use handle::SocketNode;
pub(crate) use peers::{PeerRef, Peers};
