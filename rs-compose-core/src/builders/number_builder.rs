use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::tree::error::SelectionError;
use crate::tree::strategy::BuilderStrategy;

/// Positional number composition strategy.
///
/// Each node's pool holds the digits (or digit groups) admissible at its
/// position; a selection picks one per node along the walked path and
/// composes them positionally, outermost node in the most significant
/// place: `base * own + child`.
///
/// # Notes
/// - Weight convention: a leaf weighs `pool.len()`, an internal node
///   weighs `pool.len()` times the sum of its child weights — the number
///   of distinct values reachable from the node.
/// - The digit pick is uniform and independent of the tree's weighted
///   child draw.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct NumberBuilder {
	/// Positional base used to shift the own digit past the child value.
	pub base: u64,
}

impl Default for NumberBuilder {
	/// Decimal composition.
	fn default() -> Self {
		Self { base: 10 }
	}
}

impl BuilderStrategy for NumberBuilder {
	type Output = u64;
	type Storage = Vec<u64>;
	type Args = ();

	fn compute_weight(&self, data: &Self::Storage, sum_of_child_weights: u64, is_leaf: bool) -> u64 {
		let own = data.len() as u64;
		if is_leaf {
			own
		} else {
			own * sum_of_child_weights
		}
	}

	/// Picks a random digit from the pool; at an internal node, shifts it
	/// one position past the child value.
	///
	/// # Errors
	/// - `SelectionExhausted` if the pool is empty.
	/// - `MissingChildResult` if a child index is given without a child
	///   value.
	fn combine(
		&self,
		data: &Self::Storage,
		child: Option<u64>,
		child_index: Option<usize>,
		_args: &(),
	) -> Result<u64, SelectionError> {
		if data.is_empty() {
			return Err(SelectionError::SelectionExhausted);
		}
		let digit = data[rand::rng().random_range(0..data.len())];

		match (child, child_index) {
			(None, None) => Ok(digit),
			(Some(value), _) => Ok(self.base * digit + value),
			(None, Some(_)) => Err(SelectionError::MissingChildResult),
		}
	}
}
