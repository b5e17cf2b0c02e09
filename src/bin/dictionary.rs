//! Builds a small integer to string dictionary and prints it. Set `RUST_LOG=trace` to see each
//! structural change the tree makes.

use log::info;

use ordered_tree::display::{Entries, Indented};
use ordered_tree::OrderedTree;

fn main() {
    env_logger::init();

    let mut dictionary = OrderedTree::new();
    dictionary.insert(22, "test1".to_string());
    dictionary.insert(26, "test2".to_string());
    dictionary.insert(13, "test3".to_string());
    dictionary.insert(14, "test4".to_string());
    dictionary.insert(16, "test5".to_string());
    dictionary.insert(15, "test6".to_string());
    info!(
        "built dictionary with {} entries and height {}",
        dictionary.len(),
        dictionary.height()
    );

    print!("{}", Indented::new(&dictionary));
    println!();
    print!("{}", Entries::new(&dictionary));
}
