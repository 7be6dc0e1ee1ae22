use super::error::SelectionError;

/// Per-domain combination policy the selection tree is parameterized by.
///
/// The core walks the tree and keeps the weight bookkeeping consistent;
/// everything domain specific — what a node's alternatives mean, how a
/// weight is derived from them, how a child's result is merged with an
/// own alternative — lives behind this contract.
///
/// # Responsibilities
/// - Derive a node's weight from its alternative pool and the sum of its
///   child weights (`compute_weight`)
/// - Select a terminal value at a leaf, and merge a child result with a
///   freshly chosen own alternative at an internal node (`combine`)
///
/// # Notes
/// - The weight convention is strategy-defined. The reference builders
///   use the multiplicative convention (own alternative count times the
///   child weight sum), under which every reachable composite output is
///   equally likely; an additive reachable-leaves convention is equally
///   valid for a strategy that wants it.
/// - `combine` draws its own alternative independently of the tree's
///   weighted child draw.
pub trait BuilderStrategy {
	/// The composed value this strategy produces.
	type Output;

	/// The per-node alternative pool. Opaque to the core.
	type Storage;

	/// Per-call arguments threaded through the descent into every
	/// `combine` call. Use `()` when no per-call knobs are needed.
	type Args;

	/// Derives a node's weight: a measure of the count of distinct
	/// outputs reachable from it.
	///
	/// For a leaf (`is_leaf` true, `sum_of_child_weights` 0) this is
	/// typically the alternative count; for an internal node, a function
	/// of the own count and `sum_of_child_weights`.
	fn compute_weight(&self, data: &Self::Storage, sum_of_child_weights: u64, is_leaf: bool) -> u64;

	/// Produces the composed value for one node of the walk.
	///
	/// At a leaf, `child` and `child_index` are both `None`: select one
	/// of the node's own alternatives uniformly at random and return it
	/// as a terminal value. At an internal node, both are `Some`: merge
	/// a freshly chosen own alternative with `child` per the domain rule.
	///
	/// # Errors
	/// - `SelectionExhausted` if `data` holds no alternative to choose.
	/// - `MissingChildResult` if `child_index` is given without `child`.
	fn combine(
		&self,
		data: &Self::Storage,
		child: Option<Self::Output>,
		child_index: Option<usize>,
		args: &Self::Args,
	) -> Result<Self::Output, SelectionError>;
}
