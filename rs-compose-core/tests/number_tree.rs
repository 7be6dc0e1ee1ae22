use rs_compose_core::builders::number_builder::NumberBuilder;
use rs_compose_core::tree::error::SelectionError;
use rs_compose_core::tree::node::NodeId;
use rs_compose_core::tree::selection_tree::SelectionTree;
use rs_compose_core::tree::strategy::BuilderStrategy;

const ODD_NUMBERS: [u64; 5] = [1, 3, 5, 7, 9];
const EVEN_NUMBERS: [u64; 5] = [0, 2, 4, 6, 8];

fn decimal_tree() -> SelectionTree<NumberBuilder> {
	SelectionTree::new(NumberBuilder::default())
}

/// Root pool of all ten digits with an odd-digit leaf and an even-digit
/// leaf attached, the shared fixture of this suite.
fn odd_even_fixture() -> (SelectionTree<NumberBuilder>, NodeId, NodeId, NodeId) {
	let mut tree = decimal_tree();
	let all: Vec<u64> = ODD_NUMBERS.iter().chain(EVEN_NUMBERS.iter()).copied().collect();
	let parent = tree.insert(all);
	let odds = tree.insert(ODD_NUMBERS.to_vec());
	let evens = tree.insert(EVEN_NUMBERS.to_vec());
	tree.attach(parent, odds).unwrap();
	tree.attach(parent, evens).unwrap();
	(tree, parent, odds, evens)
}

#[test]
fn leaf_weights_match_their_pool_sizes() {
	let (mut tree, _, odds, evens) = odd_even_fixture();
	assert_eq!(tree.weight(odds).unwrap(), ODD_NUMBERS.len() as u64);
	assert_eq!(tree.weight(evens).unwrap(), EVEN_NUMBERS.len() as u64);
}

#[test]
fn parent_weight_is_pool_size_times_child_sum() {
	let (mut tree, parent, _, _) = odd_even_fixture();
	// 10 own digits, children weigh 5 + 5.
	assert_eq!(tree.weight(parent).unwrap(), 10 * (5 + 5));
}

#[test]
fn leafness_flips_once_on_first_attach() {
	let (tree, parent, odds, evens) = odd_even_fixture();
	assert!(tree.is_leaf(odds).unwrap());
	assert!(tree.is_leaf(evens).unwrap());
	assert!(!tree.is_leaf(parent).unwrap());
}

#[test]
fn selection_composes_a_two_digit_value() {
	let (mut tree, parent, _, _) = odd_even_fixture();
	for _ in 0..200 {
		let value = tree.select(parent, &()).unwrap();
		// Tens digit from the parent pool, ones digit from a child pool.
		assert!(value < 100);
		assert!(value / 10 <= 9);
		assert!(ODD_NUMBERS.contains(&(value % 10)) || EVEN_NUMBERS.contains(&(value % 10)));
	}
}

#[test]
fn combine_shifts_the_child_value_down_one_position() {
	let strategy = NumberBuilder::default();
	let pool: Vec<u64> = (0..10).collect();
	let snippet = 2;
	let value = strategy.combine(&pool, Some(snippet), Some(0), &()).unwrap();
	assert!(value >= snippet);
	assert_eq!(value % 10, snippet);
}

#[test]
fn combine_without_a_required_child_is_an_error() {
	let strategy = NumberBuilder::default();
	let pool = vec![1, 2, 3];
	assert_eq!(
		strategy.combine(&pool, None, Some(0), &()),
		Err(SelectionError::MissingChildResult)
	);
}

#[test]
fn recompute_refreshes_a_mutated_leaf() {
	let mut tree = decimal_tree();
	let leaf = tree.insert(ODD_NUMBERS.to_vec());
	assert_eq!(tree.weight(leaf).unwrap(), ODD_NUMBERS.len() as u64);

	tree.data_mut(leaf).unwrap().push(11);
	tree.recompute_weights(leaf).unwrap();
	assert_eq!(tree.weight(leaf).unwrap(), ODD_NUMBERS.len() as u64 + 1);
}

#[test]
fn recompute_propagates_to_the_parent() {
	let mut tree = decimal_tree();
	let last_digit = tree.insert(ODD_NUMBERS.to_vec());
	let second_to_last = tree.insert(EVEN_NUMBERS.to_vec());
	tree.attach(second_to_last, last_digit).unwrap();

	let old_weight = (EVEN_NUMBERS.len() * ODD_NUMBERS.len()) as u64;
	assert_eq!(tree.weight(second_to_last).unwrap(), old_weight);

	*tree.data_mut(last_digit).unwrap() =
		ODD_NUMBERS.iter().chain(EVEN_NUMBERS.iter()).copied().collect();
	tree.recompute_weights(last_digit).unwrap();

	assert_eq!(
		tree.weight(second_to_last).unwrap(),
		old_weight + (EVEN_NUMBERS.len() * EVEN_NUMBERS.len()) as u64
	);
}

#[test]
fn recompute_reaches_the_root_and_spares_siblings() {
	let mut tree = decimal_tree();
	let root = tree.insert(vec![1, 2]);
	let middle = tree.insert(vec![3, 4, 5]);
	let mutated = tree.insert(vec![6]);
	let sibling = tree.insert(vec![7, 8]);
	tree.attach(middle, mutated).unwrap();
	tree.attach(middle, sibling).unwrap();
	tree.attach(root, middle).unwrap();

	// middle = 3 * (1 + 2) = 9, root = 2 * 9 = 18.
	assert_eq!(tree.weight(root).unwrap(), 18);
	let sibling_weight = tree.weight(sibling).unwrap();

	tree.data_mut(mutated).unwrap().extend([9, 0]);
	tree.recompute_weights(mutated).unwrap();

	// mutated = 3, middle = 3 * (3 + 2) = 15, root = 2 * 15 = 30.
	assert_eq!(tree.weight(mutated).unwrap(), 3);
	assert_eq!(tree.weight(middle).unwrap(), 15);
	assert_eq!(tree.weight(root).unwrap(), 30);
	assert_eq!(tree.weight(sibling).unwrap(), sibling_weight);
}

#[test]
fn selection_frequency_follows_the_child_weights() {
	let mut tree = decimal_tree();
	let root = tree.insert(vec![0]);
	let light = tree.insert(vec![1]);
	let heavy = tree.insert(vec![2, 3, 4]);
	tree.attach(root, light).unwrap();
	tree.attach(root, heavy).unwrap();

	// Root digit is 0, so the output is exactly the chosen child digit.
	let rounds = 100_000;
	let mut light_hits = 0u32;
	for _ in 0..rounds {
		if tree.select(root, &()).unwrap() == 1 {
			light_hits += 1;
		}
	}

	// Expected frequency w1 / (w1 + w2) = 1 / 4, tolerance 1 %.
	let frequency = f64::from(light_hits) / f64::from(rounds);
	assert!(
		(frequency - 0.25).abs() < 0.01,
		"light child frequency {} outside 0.25 +/- 0.01",
		frequency
	);
}
