//! Top-level module for the weighted-selection tree.
//!
//! This module groups the pieces of the core system:
//! - Arena node storage and handles (`node`)
//! - The pluggable combination/weight contract (`strategy`)
//! - The closed error taxonomy (`error`)
//! - The tree itself with weight maintenance and weighted random
//!   selection (`selection_tree`)

/// Arena node handle (`NodeId`) and internal node storage.
///
/// Nodes are held in an indexable arena owned by the tree; parent and
/// child links are indices, never owning references.
pub mod node;

/// The strategy contract every concrete node kind implements.
///
/// Defines how a node's weight is derived from its alternative pool and
/// how a child's result is merged with a freshly chosen own alternative.
pub mod strategy;

/// Closed set of fatal invariant violations.
///
/// Every error is propagated immediately to the caller; none is retried,
/// logged or recovered internally.
pub mod error;

/// The weighted-selection tree.
///
/// Owns the arena and the strategy, maintains per-node cumulative weight
/// caches, and performs the weighted random descent.
pub mod selection_tree;
