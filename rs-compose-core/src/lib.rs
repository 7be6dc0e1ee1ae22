//! Weighted-selection-tree composition library.
//!
//! This crate builds composite outputs (sentences, numbers, any
//! sequentially assembled value) by randomly walking a tree whose nodes
//! each hold a pool of interchangeable alternatives. The walk is weighted
//! by how many distinct outputs are reachable from each subtree, so every
//! reachable output is (under the reference weight convention) equally
//! likely.
//!
//! The crate provides:
//! - The generic selection tree with its weight bookkeeping
//! - A small strategy contract for per-domain combination policies
//! - Reference strategies for text and positional-number composition
//!
//! Only the high-level API is exposed publicly. Internal node storage is
//! kept private to ensure consistency and prevent misuse.

/// Core selection tree: arena, weight cache, weighted random descent,
/// strategy contract and error taxonomy.
pub mod tree;

/// Reference builder strategies (text and number composition).
///
/// These implement the strategy contract the way a consuming application
/// would; the core never depends on them.
pub mod builders;
