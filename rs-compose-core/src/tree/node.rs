use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a node inside a `SelectionTree` arena.
///
/// A `NodeId` is a plain index, cheap to copy and pass around. It is only
/// meaningful for the tree that issued it; presenting it to another tree
/// yields an `UnknownNode` error (or addresses an unrelated node of the
/// same index, which the tree cannot distinguish).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Returns the raw arena index of this handle.
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A single node of the selection tree.
///
/// Holds the node's own pool of alternatives (opaque to the core), its
/// child links, the cumulative child weight cache and the lazily computed
/// total weight.
///
/// # Invariants
/// - `cumulative_weights` is either empty (not yet built) or exactly as
///   long as `children`, with `cumulative_weights[i]` holding the sum of
///   the weights of `children[0..=i]`.
/// - `total_weight`, once `Some`, matches the strategy's `compute_weight`
///   applied to the current data and child weights.
/// - `parent` is a non-owning back-link, used only for upward weight
///   propagation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Node<T> {
	/// This node's own pool of alternatives.
	pub(crate) data: T,

	/// Child handles, in insertion order. The order defines the index
	/// correspondence with `cumulative_weights`.
	pub(crate) children: Vec<NodeId>,

	/// Prefix sums of the child weights. Non-decreasing; strictly
	/// increasing when every child weight is positive.
	pub(crate) cumulative_weights: Vec<u64>,

	/// Lazily computed, memoized total weight of this subtree.
	pub(crate) total_weight: Option<u64>,

	/// Back-link to the parent, set when this node is attached.
	pub(crate) parent: Option<NodeId>,
}

impl<T> Node<T> {
	/// Creates a detached node holding `data`, with no children and no
	/// cached weight.
	pub(crate) fn new(data: T) -> Self {
		Self {
			data,
			children: Vec::new(),
			cumulative_weights: Vec::new(),
			total_weight: None,
			parent: None,
		}
	}
}
