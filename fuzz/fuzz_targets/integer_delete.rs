#![no_main]
use libfuzzer_sys::fuzz_target;

use balanced_btree_index::BTree;
use std::collections::BTreeMap;

fuzz_target!(|data: (Vec<(bool, u16)>, u8)| {
    let degree = data.1.max(2) as usize;
    let mut m: BTreeMap<u16, usize> = BTreeMap::default();
    let mut fixture = BTree::new(degree).unwrap();

    for (is_insert, key) in data.0 {
        if is_insert {
            *m.entry(key).or_default() += 1;
            fixture.insert(key);
        } else {
            let count = m.get(&key).copied().unwrap_or(0);
            if count > 1 {
                m.insert(key, count - 1);
            } else {
                m.remove(&key);
            }
            assert_eq!(count > 0, fixture.delete(&key));
        }
    }

    // Check that the multisets are equal
    let m: Vec<u16> = m
        .into_iter()
        .flat_map(|(k, count)| std::iter::repeat(k).take(count))
        .collect();
    let fixture_result: Vec<u16> = fixture.inorder().copied().collect();
    assert_eq!(m, fixture_result);

    // Every node except the root respects the degree bounds
    for node in fixture.breadth_first_search().skip(1) {
        assert!(node.num_keys() >= fixture.min_keys());
        assert!(node.num_keys() <= fixture.max_keys());
    }
});
