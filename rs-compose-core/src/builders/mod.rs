//! Reference builder strategies.
//!
//! Concrete implementations of the strategy contract, one per output
//! domain:
//! - `TextBuilder`: sentence composition by separator concatenation
//! - `NumberBuilder`: positional-digit composition in a configurable base
//!
//! Both use the multiplicative weight convention: a leaf weighs its
//! alternative count, an internal node weighs its alternative count times
//! the sum of its child weights. Under that convention every composite
//! output reachable from a node is selected with equal probability.

/// Text composition: random phrase pools joined by a separator.
pub mod text_builder;

/// Number composition: random digit pools combined positionally.
pub mod number_builder;
