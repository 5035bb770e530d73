//! Direction and cardinality policies.
//!
//! These two enums are the whole connection-legality vocabulary: direction
//! decides which way values may move across a wire, cardinality decides how
//! many peers one side may hold.

/// Transfer role of a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Consumes values. A push terminus: forwarded values stop here.
    Input,

    /// Produces values. Its cache is the authoritative value of the wire.
    Output,

    /// Plays both roles, accepting either end of a wire.
    Bidirectional,
}

impl Direction {
    /// Whether this socket can act as the producing end of a wire.
    pub fn can_produce(&self) -> bool {
        matches!(self, Self::Output | Self::Bidirectional)
    }

    /// Whether this socket can act as the consuming end of a wire.
    pub fn can_consume(&self) -> bool {
        matches!(self, Self::Input | Self::Bidirectional)
    }

    /// True when a wire between sockets of these directions could carry a
    /// value in at least one orientation.
    pub fn compatible_with(&self, other: Direction) -> bool {
        (self.can_consume() && other.can_produce())
            || (self.can_produce() && other.can_consume())
    }
}

/// How many peers one side of the relation may hold.
///
/// Fixed at construction; it selects the peer-storage representation and the
/// linking policy (replace vs append) for that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// At most one peer. Connecting a new peer replaces the old one.
    Single,

    /// Any number of peers, kept in connection order, duplicates allowed.
    Multiple,
}
