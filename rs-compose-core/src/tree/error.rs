use thiserror::Error;

use super::node::NodeId;

/// Fatal invariant violations raised by the selection tree.
///
/// Every variant is unrecoverable from the tree's point of view: it is
/// propagated immediately to the caller and never retried, logged or
/// defaulted. None of these occurs during normal control flow over a
/// well-formed tree.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionError {
	/// The given handle does not belong to this tree.
	#[error("node {0} does not belong to this tree")]
	UnknownNode(NodeId),

	/// Attaching the node would give it a second parent, or would make
	/// it an ancestor of itself.
	#[error("node {0} already has a parent or would become its own ancestor")]
	ChildAlreadyAttached(NodeId),

	/// `children` or `cumulative_weights` was unexpectedly empty, or
	/// their lengths differed, while selecting through a non-leaf.
	#[error("children and cumulative weights are inconsistent at node {0}")]
	CorruptState(NodeId),

	/// No selectable output exists: the subtree's total weight is zero,
	/// a leaf's alternative pool is empty, or the binary search found no
	/// interval containing the sampled value.
	#[error("no selectable output is reachable")]
	SelectionExhausted,

	/// An internal node's `combine` was invoked without the child result
	/// the contract requires. Guards against a broken caller; cannot
	/// occur through the tree's own descent.
	#[error("combine was called without a required child result")]
	MissingChildResult,
}
