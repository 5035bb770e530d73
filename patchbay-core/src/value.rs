//! Socket Value Container
//!
//! A [`TypedValue`] is the unit of exchange on the pull side of a port. It
//! distinguishes "no value yet" from "one value" and "an ordered sequence of
//! values" so that emptiness and arity never get conflated.
//!
//! # States
//!
//! - `Empty`: the port has never been pushed and nothing upstream could
//!   supply a value.
//! - `Single(T)`: one value, produced by a push or by pulling a
//!   single-cardinality upstream peer.
//! - `Multiple(Vec<T>)`: one value per upstream peer, in connection order.
//!
//! A value is constructed directly into its state and never mutated; the
//! accessors consume it. Reading with the wrong accessor is a programming
//! error surfaced as a typed [`AccessError`], not a silent coercion.

use thiserror::Error;

/// Error raised by [`TypedValue`] accessors.
///
/// `Empty` means "no data yet" (never connected, or nothing pushed);
/// `ArityMismatch` means the wrong accessor was used for the stored state.
/// Callers can tell the two apart to distinguish wiring problems from
/// programming errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The value holds nothing.
    #[error("socket value is empty")]
    Empty,

    /// The accessor does not match the arity of the stored value.
    #[error("accessor arity does not match the stored value")]
    ArityMismatch,
}

/// A one-shot container for the contents of a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue<T> {
    /// No value present.
    Empty,

    /// Exactly one value.
    Single(T),

    /// An ordered sequence of values, one per upstream peer.
    Multiple(Vec<T>),
}

impl<T> TypedValue<T> {
    /// Check whether the container holds nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Take the single value.
    ///
    /// Errs with [`AccessError::Empty`] when nothing is stored and with
    /// [`AccessError::ArityMismatch`] when a sequence is stored.
    pub fn single(self) -> Result<T, AccessError> {
        match self {
            Self::Empty => Err(AccessError::Empty),
            Self::Single(value) => Ok(value),
            Self::Multiple(_) => Err(AccessError::ArityMismatch),
        }
    }

    /// Take the sequence of values.
    ///
    /// Errs with [`AccessError::Empty`] when nothing is stored and with
    /// [`AccessError::ArityMismatch`] when a single value is stored.
    pub fn multiple(self) -> Result<Vec<T>, AccessError> {
        match self {
            Self::Empty => Err(AccessError::Empty),
            Self::Single(_) => Err(AccessError::ArityMismatch),
            Self::Multiple(values) => Ok(values),
        }
    }
}

impl<T> Default for TypedValue<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> From<T> for TypedValue<T> {
    fn from(value: T) -> Self {
        Self::Single(value)
    }
}

impl<T> From<Vec<T>> for TypedValue<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Multiple(values)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_reads_back() {
        let value = TypedValue::Single(42);
        assert!(!value.is_empty());
        assert_eq!(value.single(), Ok(42));
    }

    #[test]
    fn multiple_reads_back() {
        let value = TypedValue::Multiple(vec![1, 2, 3]);
        assert!(!value.is_empty());
        assert_eq!(value.multiple(), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn empty_access_is_an_error() {
        assert_eq!(TypedValue::<i32>::Empty.single(), Err(AccessError::Empty));
        assert_eq!(TypedValue::<i32>::Empty.multiple(), Err(AccessError::Empty));
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        assert_eq!(
            TypedValue::Single(1).multiple(),
            Err(AccessError::ArityMismatch)
        );
        assert_eq!(
            TypedValue::Multiple(vec![1]).single(),
            Err(AccessError::ArityMismatch)
        );
    }

    #[test]
    fn default_is_empty() {
        assert!(TypedValue::<String>::default().is_empty());
    }

    #[test]
    fn from_constructors() {
        assert_eq!(TypedValue::from(7), TypedValue::Single(7));
        assert_eq!(TypedValue::from(vec![7, 8]), TypedValue::Multiple(vec![7, 8]));
    }
}
