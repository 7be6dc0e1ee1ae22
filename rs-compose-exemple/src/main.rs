use rs_compose_core::builders::number_builder::NumberBuilder;
use rs_compose_core::builders::text_builder::TextBuilder;
use rs_compose_core::tree::selection_tree::SelectionTree;

fn pool(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a sentence tree: every node holds interchangeable phrases,
    // children hold the continuations
    let mut sentences = SelectionTree::new(TextBuilder::default());

    let start_phrases = sentences.insert(pool(&[
        "I like",
        "Marty enjoys",
        "Satoshi hates",
        "Almaz loves",
    ]));
    let fruits = sentences.insert(pool(&["apples.", "bananas.", "oranges.", "kiwis."]));
    let vehicle_actions = sentences.insert(pool(&["riding in", "driving"]));
    let vehicles = sentences.insert(pool(&["cars.", "boats.", "planes.", "trains."]));

    // Compose leaves first, then upward
    sentences.attach(vehicle_actions, vehicles)?;
    sentences.attach(start_phrases, fruits)?;
    sentences.attach(start_phrases, vehicle_actions)?;

    // Weight = number of distinct sentences reachable from each node;
    // the random walk is weighted by it, so every sentence is equally likely
    println!(
        "Distinct sentences reachable from the root: {}",
        sentences.weight(start_phrases)?
    );

    // Generate 10 sentences
    for i in 0..10 {
        println!("Sentence {}: {}", i + 1, sentences.select(start_phrases, &())?);
    }

    // Same machinery, different strategy: positional decimal composition
    let mut numbers = SelectionTree::new(NumberBuilder::default());
    let tens = numbers.insert((0..10).collect());
    let odd_ones = numbers.insert(vec![1, 3, 5, 7, 9]);
    let even_ones = numbers.insert(vec![0, 2, 4, 6, 8]);
    numbers.attach(tens, odd_ones)?;
    numbers.attach(tens, even_ones)?;

    // 10 own digits times (5 + 5) child alternatives = 100 values
    println!(
        "Distinct numbers reachable from the root: {}",
        numbers.weight(tens)?
    );

    for i in 0..10 {
        println!("Number {}: {}", i + 1, numbers.select(tens, &())?);
    }

    // Mutating a pool does not refresh weights on its own; an explicit
    // recomputation propagates the change up to the root
    numbers.data_mut(odd_ones)?.push(11);
    numbers.recompute_weights(odd_ones)?;
    println!(
        "After growing the odd pool: {}",
        numbers.weight(tens)?
    );

    // A node cannot be attached twice
    match numbers.attach(even_ones, odd_ones) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Re-attaching an already attached node is rejected"),
    }

    // A leaf without alternatives has weight 0 and nothing to select
    let empty = numbers.insert(Vec::new());
    match numbers.select(empty, &()) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Selecting from an empty pool is rejected"),
    }

    Ok(())
}
