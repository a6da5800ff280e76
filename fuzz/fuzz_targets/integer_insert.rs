#![no_main]
use libfuzzer_sys::fuzz_target;

use balanced_btree_index::BTree;

fuzz_target!(|data: (Vec<u32>, u8)| {
    let degree = data.1.max(2) as usize;
    let mut expected = data.0.clone();
    let mut fixture = BTree::new(degree).unwrap();

    for key in data.0 {
        fixture.insert(key);
    }

    // Check len() function
    assert_eq!(expected.len(), fixture.len());

    // search query for each entry
    for k in expected.iter() {
        assert!(fixture.contains(k));
    }

    // Duplicates are kept, so the tree must equal the sorted input
    expected.sort_unstable();
    let fixture_result: Vec<u32> = fixture.inorder().copied().collect();
    assert_eq!(expected, fixture_result);
});
