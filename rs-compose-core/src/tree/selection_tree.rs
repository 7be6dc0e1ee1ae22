use std::fmt;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::error::SelectionError;
use super::node::{Node, NodeId};
use super::strategy::BuilderStrategy;

/// A tree of alternative pools with weighted random selection.
///
/// Nodes live in an arena owned by the tree and are addressed through
/// `NodeId` handles; parent and child links are indices, so the parent
/// back-reference introduces no ownership cycle.
///
/// # Responsibilities
/// - Own the nodes and the strategy
/// - Keep each node's cumulative child weight cache and memoized total
///   weight consistent, propagating changes up the ancestor chain
/// - Perform the weighted random descent that composes an output
///
/// # Invariants
/// - A node's `cumulative_weights`, once built, is index-aligned with its
///   children and its last element equals the sum of all child weights
/// - A node's cached total weight, once computed, matches the strategy's
///   `compute_weight` over the current children
///
/// # Notes
/// - The tree is mutated through ordinary `&mut` borrows; concurrent
///   mutation is ruled out by the borrow checker rather than left
///   undefined.
/// - Mutating a node's data through `data_mut` does **not** refresh any
///   weight; call `recompute_weights` on that node afterwards.
#[derive(Serialize, Deserialize)]
#[serde(bound(
	serialize = "S: Serialize, S::Storage: Serialize",
	deserialize = "S: Deserialize<'de>, S::Storage: Deserialize<'de>"
))]
pub struct SelectionTree<S: BuilderStrategy> {
	strategy: S,
	nodes: Vec<Node<S::Storage>>,
}

impl<S: BuilderStrategy> SelectionTree<S> {
	/// Creates an empty tree driven by `strategy`.
	pub fn new(strategy: S) -> Self {
		Self {
			strategy,
			nodes: Vec::new(),
		}
	}

	/// Creates a detached node holding `data` and returns its handle.
	///
	/// The node starts as a leaf with no cached weight; it becomes an
	/// internal node the first time a child is attached to it.
	pub fn insert(&mut self, data: S::Storage) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node::new(data));
		id
	}

	/// Number of nodes in the arena.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True if the tree holds no node.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Read access to a node's alternative pool.
	pub fn data(&self, id: NodeId) -> Result<&S::Storage, SelectionError> {
		Ok(&self.node(id)?.data)
	}

	/// Mutable access to a node's alternative pool.
	///
	/// # Notes
	/// Changing the pool does not refresh any cached weight. Callers must
	/// invoke `recompute_weights` on the mutated node to make the change
	/// visible, up to the root.
	pub fn data_mut(&mut self, id: NodeId) -> Result<&mut S::Storage, SelectionError> {
		self.check(id)?;
		Ok(&mut self.nodes[id.0].data)
	}

	/// The node's parent handle, if it has been attached.
	pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SelectionError> {
		Ok(self.node(id)?.parent)
	}

	/// The node's child handles, in insertion order.
	pub fn children(&self, id: NodeId) -> Result<&[NodeId], SelectionError> {
		Ok(&self.node(id)?.children)
	}

	/// The node's cumulative child weight cache.
	///
	/// Empty both for a leaf and for an internal node whose cache has not
	/// been built yet; `sum_of_child_weights` builds it on demand.
	pub fn cumulative_weights(&self, id: NodeId) -> Result<&[u64], SelectionError> {
		Ok(&self.node(id)?.cumulative_weights)
	}

	/// True iff the node has no children.
	pub fn is_leaf(&self, id: NodeId) -> Result<bool, SelectionError> {
		Ok(self.node(id)?.children.is_empty())
	}

	/// Attaches `child` as the last child of `parent`.
	///
	/// Appends the child and its cumulative weight entry, sets the child's
	/// parent back-link, recomputes the parent's total weight through the
	/// strategy and propagates the recomputation up the ancestor chain to
	/// the root.
	///
	/// # Errors
	/// - `UnknownNode` if either handle is foreign to this tree.
	/// - `ChildAlreadyAttached` if `child` already has a parent, equals
	///   `parent`, or is an ancestor of `parent` (the attachment would
	///   close a cycle).
	pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SelectionError> {
		self.check(parent)?;
		self.check(child)?;

		if child == parent || self.nodes[child.0].parent.is_some() {
			return Err(SelectionError::ChildAlreadyAttached(child));
		}

		// The child must not be an ancestor of the parent.
		let mut cursor = self.nodes[parent.0].parent;
		while let Some(ancestor) = cursor {
			if ancestor == child {
				return Err(SelectionError::ChildAlreadyAttached(child));
			}
			cursor = self.nodes[ancestor.0].parent;
		}

		let child_weight = self.weight(child)?;
		let base = self.sum_of_child_weights(parent)?;

		let node = &mut self.nodes[parent.0];
		node.children.push(child);
		node.cumulative_weights.push(base + child_weight);
		self.nodes[child.0].parent = Some(parent);

		self.recompute_total(parent);
		self.propagate_from(self.nodes[parent.0].parent)
	}

	/// Returns the node's total weight, computing and memoizing it on
	/// first access.
	///
	/// The weight is whatever the strategy's `compute_weight` defines: a
	/// measure of the count of distinct outputs reachable from the node.
	/// Computing it may in turn compute and cache the weights of
	/// not-yet-visited descendants.
	pub fn weight(&mut self, id: NodeId) -> Result<u64, SelectionError> {
		self.check(id)?;
		if let Some(weight) = self.nodes[id.0].total_weight {
			return Ok(weight);
		}
		let sum = self.sum_of_child_weights(id)?;
		let node = &self.nodes[id.0];
		let weight = self.strategy.compute_weight(&node.data, sum, node.children.is_empty());
		self.nodes[id.0].total_weight = Some(weight);
		Ok(weight)
	}

	/// Sum of the weights of the node's children.
	///
	/// 0 for a leaf; otherwise the last element of the cumulative weight
	/// cache, building the whole cache first if it is empty.
	pub fn sum_of_child_weights(&mut self, id: NodeId) -> Result<u64, SelectionError> {
		self.check(id)?;
		if self.nodes[id.0].children.is_empty() {
			return Ok(0);
		}
		if self.nodes[id.0].cumulative_weights.is_empty() {
			self.rebuild_cumulative(id)?;
		}
		Ok(self.nodes[id.0].cumulative_weights.last().copied().unwrap_or(0))
	}

	/// Explicit recomputation entry point.
	///
	/// Rebuilds the node's cumulative weight cache from its children's
	/// (cached) weights, recomputes its total weight through the strategy,
	/// then repeats the same on every ancestor up to the root. This is the
	/// only path by which a data or structural change becomes visible in
	/// ancestor weights.
	///
	/// Idempotent: calling it twice with no intervening mutation leaves
	/// identical caches. Cost is O(branching factor) per node touched.
	pub fn recompute_weights(&mut self, id: NodeId) -> Result<(), SelectionError> {
		self.check(id)?;
		self.nodes[id.0].total_weight = None;
		self.rebuild_cumulative(id)?;
		self.recompute_total(id);
		self.propagate_from(self.nodes[id.0].parent)
	}

	/// Composes one output by weighted random descent from `id`.
	///
	/// Descends the tree choosing at each internal node a child with
	/// probability proportional to its weight (uniform draw over
	/// `[0, sum_of_child_weights)`, binary search over the cumulative
	/// weights), then assembles the result bottom-up through the
	/// strategy's `combine`. `args` is handed unchanged to every
	/// `combine` call.
	///
	/// A child of weight zero occupies an empty interval of the draw and
	/// is never chosen; a draw landing exactly on a cumulative boundary
	/// belongs to the next child.
	///
	/// # Errors
	/// - `UnknownNode` if `id` is foreign to this tree.
	/// - `CorruptState` if an internal node's children and cumulative
	///   weights are missing or length-mismatched.
	/// - `SelectionExhausted` if a visited subtree has total child weight
	///   zero, or a reached leaf has no alternative to offer.
	pub fn select(&mut self, id: NodeId, args: &S::Args) -> Result<S::Output, SelectionError> {
		self.check(id)?;

		// Descend, remembering the child index chosen at each step.
		let mut path: Vec<(NodeId, usize)> = Vec::new();
		let mut current = id;
		while !self.nodes[current.0].children.is_empty() {
			let sum = self.sum_of_child_weights(current)?;
			let node = &self.nodes[current.0];
			if node.cumulative_weights.is_empty()
				|| node.cumulative_weights.len() != node.children.len()
			{
				return Err(SelectionError::CorruptState(current));
			}
			if sum == 0 {
				return Err(SelectionError::SelectionExhausted);
			}

			let weighted_index = rand::rng().random_range(0..sum);
			// First cumulative boundary strictly above the draw.
			let chosen = node
				.cumulative_weights
				.partition_point(|&bound| bound <= weighted_index);
			if chosen >= node.children.len() {
				return Err(SelectionError::SelectionExhausted);
			}

			path.push((current, chosen));
			current = node.children[chosen];
		}

		// Base case: the leaf picks one of its own alternatives.
		let mut output = self
			.strategy
			.combine(&self.nodes[current.0].data, None, None, args)?;

		// Combine back up along the chosen path.
		for (node_id, child_index) in path.into_iter().rev() {
			output = self.strategy.combine(
				&self.nodes[node_id.0].data,
				Some(output),
				Some(child_index),
				args,
			)?;
		}

		Ok(output)
	}

	fn node(&self, id: NodeId) -> Result<&Node<S::Storage>, SelectionError> {
		self.nodes.get(id.0).ok_or(SelectionError::UnknownNode(id))
	}

	fn check(&self, id: NodeId) -> Result<(), SelectionError> {
		if id.0 < self.nodes.len() {
			Ok(())
		} else {
			Err(SelectionError::UnknownNode(id))
		}
	}

	/// Rebuilds the cumulative weight cache of one node from its
	/// children's weights, computing any child weight not yet cached.
	fn rebuild_cumulative(&mut self, id: NodeId) -> Result<(), SelectionError> {
		let children = self.nodes[id.0].children.clone();
		let mut cumulative = Vec::with_capacity(children.len());
		let mut running = 0u64;
		for child in children {
			running += self.weight(child)?;
			cumulative.push(running);
		}
		self.nodes[id.0].cumulative_weights = cumulative;
		Ok(())
	}

	/// Recomputes one node's total weight from its (already rebuilt)
	/// cumulative cache.
	fn recompute_total(&mut self, id: NodeId) {
		let node = &self.nodes[id.0];
		let sum = node.cumulative_weights.last().copied().unwrap_or(0);
		let weight = self.strategy.compute_weight(&node.data, sum, node.children.is_empty());
		self.nodes[id.0].total_weight = Some(weight);
	}

	/// Walks the ancestor chain starting at `from`, rebuilding each
	/// ancestor's caches in turn. Iterative, so arbitrarily deep trees
	/// cannot exhaust the call stack on propagation.
	fn propagate_from(&mut self, from: Option<NodeId>) -> Result<(), SelectionError> {
		let mut cursor = from;
		while let Some(id) = cursor {
			self.rebuild_cumulative(id)?;
			self.recompute_total(id);
			cursor = self.nodes[id.0].parent;
		}
		Ok(())
	}
}

impl<S> fmt::Debug for SelectionTree<S>
where
	S: BuilderStrategy + fmt::Debug,
	S::Storage: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SelectionTree")
			.field("strategy", &self.strategy)
			.field("nodes", &self.nodes)
			.finish()
	}
}
