//! Event kinds for the callback registry.

use thiserror::Error;

/// Discriminator for socket event callbacks.
///
/// `Connected` and `Disconnected` are declared so hosts can key registrations
/// on them, but wiring operations do not raise them; only [`Event::Updated`]
/// is ever fired, by `Port::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Event {
    /// A peer was wired to this socket. Declared, never raised.
    Connected,

    /// A peer was unwired from this socket. Declared, never raised.
    Disconnected,

    /// A value was pushed through this socket. Raised on every update call,
    /// direct or forwarded, after caching and propagation.
    Updated,
}

/// Error raised by callback-registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CallbackError {
    /// `remove_callback` was called for an event kind that never had any
    /// registrations. Caller misuse, not a recoverable condition.
    #[error("no callbacks registered for event kind {0:?}")]
    UnknownEvent(Event),
}
