#![no_main]
use fake::{Fake, StringFaker};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use balanced_btree_index::BTree;

fuzz_target!(|seed: u64| {
    // Create an index with random entries
    let n_entries = 2000;
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    const ASCII: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let id_faker = StringFaker::with(Vec::from(ASCII), 8..16);

    let mut btree: BTree<String> = BTree::new(6).unwrap();

    // Insert the strings
    for _ in 0..n_entries {
        btree.insert(id_faker.fake_with_rng(&mut rng));
    }
    // Generate and insert a known key
    let search_key: String = id_faker.fake_with_rng(&mut rng);
    btree.insert(search_key.clone());

    let found = btree.get(&search_key).unwrap();
    assert_eq!(&search_key, found);
    if let Some(p) = btree.predecessor(&search_key) {
        assert!(p < &search_key);
    }
    if let Some(s) = btree.successor(&search_key) {
        assert!(s > &search_key);
    }
});
