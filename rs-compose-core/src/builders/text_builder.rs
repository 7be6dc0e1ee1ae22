use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::tree::error::SelectionError;
use crate::tree::strategy::BuilderStrategy;

/// Sentence composition strategy.
///
/// Each node's pool is a list of interchangeable phrases. A selection
/// picks one phrase per node along the walked path and joins them with
/// the configured separator, outermost node first.
///
/// # Notes
/// - Weight convention: a leaf weighs `pool.len()`, an internal node
///   weighs `pool.len()` times the sum of its child weights — the number
///   of distinct sentences reachable from the node.
/// - The phrase pick is uniform and independent of the tree's weighted
///   child draw.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TextBuilder {
	/// Inserted between a node's own phrase and the child result.
	pub separator: String,
}

impl Default for TextBuilder {
	/// Separates phrases with a single space.
	fn default() -> Self {
		Self {
			separator: " ".to_owned(),
		}
	}
}

impl BuilderStrategy for TextBuilder {
	type Output = String;
	type Storage = Vec<String>;
	type Args = ();

	fn compute_weight(&self, data: &Self::Storage, sum_of_child_weights: u64, is_leaf: bool) -> u64 {
		let own = data.len() as u64;
		if is_leaf {
			own
		} else {
			own * sum_of_child_weights
		}
	}

	/// Picks a random phrase from the pool; at an internal node, prepends
	/// it (plus the separator) to the child's sentence.
	///
	/// # Errors
	/// - `SelectionExhausted` if the pool is empty.
	/// - `MissingChildResult` if a child index is given without a child
	///   sentence.
	fn combine(
		&self,
		data: &Self::Storage,
		child: Option<String>,
		child_index: Option<usize>,
		_args: &(),
	) -> Result<String, SelectionError> {
		if data.is_empty() {
			return Err(SelectionError::SelectionExhausted);
		}
		let phrase = &data[rand::rng().random_range(0..data.len())];

		match (child, child_index) {
			(None, None) => Ok(phrase.clone()),
			(Some(snippet), _) => Ok(format!("{}{}{}", phrase, self.separator, snippet)),
			(None, Some(_)) => Err(SelectionError::MissingChildResult),
		}
	}
}
