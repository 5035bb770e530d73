//! Patchbay Core
//!
//! This crate provides the socket wiring primitives underneath the Patchbay
//! dataflow framework. It implements:
//!
//! - Typed ports with push (`update`) and pull (`get_value`) value movement
//! - Connection topology: direction and cardinality rules, symmetric wiring
//! - An event-callback registry keyed by event kind and name
//!
//! The crate is a library surface only: a node-graph host creates ports,
//! wires them, and drives the graph. There is no node abstraction, no
//! editor, no persistence, and no scheduler here.
//!
//! # Architecture
//!
//! The crate is organized into three modules, leaves first:
//!
//! - `value`: the [`value::TypedValue`] container distinguishing no value,
//!   one value, and an ordered sequence of values
//! - `socket`: the untyped wiring layer: identity, direction, cardinality,
//!   the symmetric peer relation, and the event vocabulary
//! - `port`: the typed layer: cached values, push propagation, pull
//!   derivation, and callbacks
//!
//! # Example
//!
//! ```rust
//! use patchbay_core::port::Port;
//! use patchbay_core::socket::{Cardinality, Event};
//!
//! // An output fanning out to two inputs.
//! let source = Port::output(Cardinality::Multiple);
//! let left = Port::input(Cardinality::Single);
//! let right = Port::input(Cardinality::Single);
//!
//! source.connect(&left);
//! source.connect(&right);
//!
//! left.add_callback(Event::Updated, "log", |port, value: &i32| {
//!     println!("port {:?} saw {value}", port.id());
//! });
//!
//! source.update(8);
//!
//! assert_eq!(left.get_value().single(), Ok(8));
//! assert_eq!(right.get_value().single(), Ok(8));
//! ```

pub mod port;
pub mod socket;
pub mod value;
