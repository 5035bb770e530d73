//! Socket identity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a socket.
///
/// Every socket is minted one id at construction. Identity is what peer
/// matching, visited-set traversal, and log fields key on, so an id stays
/// meaningful even after the socket it named has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketId(u64);

impl SocketId {
    /// Generate a new unique socket ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for SocketId {
    fn default() -> Self {
        Self::new()
    }
}
