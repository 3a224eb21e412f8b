//! Chordless circuits of valued digraphs.
//!
//! Odd chordless circuits of an outranking digraph are the source of
//! Condorcet-like paradoxes in choice and ranking recommendations. The
//! [`CircuitEnumerator`] lists every chordless circuit of the strict
//! `r > med` digraph, optionally restricted to odd lengths.
//!
//! # Key Types
//!
//! - [`CircuitConfig`]: length-3 and odd-only filters, order limit
//! - [`CircuitEnumerator`]: enumeration and early-exit detection
//! - [`Circuit`]: members in arc order with the circuit credibility

mod config;
mod enumerator;

pub use config::CircuitConfig;
pub use enumerator::{degree_labels, Circuit, CircuitEnumerator};
