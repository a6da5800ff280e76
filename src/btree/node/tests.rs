use super::*;

fn leaf(keys: &[u32]) -> Node<u32> {
    Node::with_keys(keys.to_vec(), Vec::new())
}

fn child_keys(node: &Node<u32>) -> Vec<Vec<u32>> {
    node.children().iter().map(|c| c.keys().to_vec()).collect()
}

#[test]
fn binary_and_linear_search_agree() {
    let n = leaf(&[1, 3, 3, 5, 7]);
    for k in 0..9 {
        assert_eq!(n.linear_search(&k), n.search(&k), "search for {}", k);
    }
    // Ties resolve to the leftmost occurrence
    assert_eq!(1, n.search(&3));
    assert_eq!(5, n.search(&8));

    let empty = leaf(&[]);
    assert_eq!(0, empty.search(&1));
    assert_eq!(0, empty.linear_search(&1));
}

#[test]
fn contains_key_at_checks_range() {
    let n = leaf(&[10, 20]);
    assert_eq!(true, n.contains_key_at(&10, 0));
    assert_eq!(false, n.contains_key_at(&10, 1));
    assert_eq!(false, n.contains_key_at(&30, 2));
}

#[test]
fn locate_neighbours() {
    let n = leaf(&[10, 20, 30]);

    assert_eq!(None, n.locate_predecessor(&10));
    assert_eq!(Some(0), n.locate_predecessor(&15));
    assert_eq!(Some(0), n.locate_predecessor(&20));
    assert_eq!(Some(2), n.locate_predecessor(&40));

    assert_eq!(0, n.locate_successor(&5));
    assert_eq!(2, n.locate_successor(&20));
    assert_eq!(3, n.locate_successor(&30));

    assert_eq!(None, n.predecessor(&10));
    assert_eq!(Some(&20), n.predecessor(&25));
    assert_eq!(Some(&30), n.successor(&25));
    assert_eq!(None, n.successor(&30));
}

#[test]
fn insert_and_delete_in_leaf() {
    let mut n = leaf(&[10, 30]);
    n.insert(20);
    n.insert(5);
    assert_eq!(&[5, 10, 20, 30], n.keys());

    assert_eq!(true, n.delete(&10));
    assert_eq!(false, n.delete(&10));
    assert_eq!(&[5, 20, 30], n.keys());
}

#[test]
fn deep_min_and_max() {
    let n = Node::with_keys(
        vec![10, 20],
        vec![leaf(&[1, 5]), leaf(&[15]), leaf(&[25, 27])],
    );
    assert_eq!(Some(&1), n.deep_min());
    assert_eq!(Some(&27), n.deep_max());
    assert_eq!(Some(&5), n.deep_predecessor(0));
    assert_eq!(Some(&15), n.deep_successor(0));
    assert_eq!(Some(&15), n.deep_predecessor(1));
    assert_eq!(Some(&25), n.deep_successor(1));

    let empty = leaf(&[]);
    assert_eq!(None, empty.deep_min());
    assert_eq!(None, empty.deep_max());
}

#[test]
fn split_leaf_child() {
    let mut n = Node::with_keys(Vec::new(), vec![leaf(&[1, 2, 3])]);
    n.split_child(0);

    assert_eq!(&[2], n.keys());
    assert_eq!(vec![vec![1], vec![3]], child_keys(&n));
    assert_eq!(true, n.children()[0].is_leaf());
    assert_eq!(true, n.children()[1].is_leaf());
}

#[test]
fn split_internal_child() {
    let full = Node::with_keys(
        vec![10, 20, 30],
        vec![leaf(&[1]), leaf(&[15]), leaf(&[25]), leaf(&[35])],
    );
    let mut n = Node::with_keys(vec![50], vec![full, leaf(&[60])]);
    n.split_child(0);

    assert_eq!(&[20, 50], n.keys());
    assert_eq!(vec![vec![10], vec![30], vec![60]], child_keys(&n));
    assert_eq!(vec![vec![1], vec![15]], child_keys(&n.children()[0]));
    assert_eq!(vec![vec![25], vec![35]], child_keys(&n.children()[1]));
}

#[test]
fn split_even_sized_child() {
    // The median is the upper middle key for an even number of keys
    let mut n = Node::with_keys(Vec::new(), vec![leaf(&[1, 2, 3, 4])]);
    n.split_child(0);
    assert_eq!(&[3], n.keys());
    assert_eq!(vec![vec![1, 2], vec![4]], child_keys(&n));
}

#[test]
fn merge_children_keeps_parent() {
    let mut n = Node::with_keys(vec![10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);
    let merged = n.merge_children(0);
    assert_eq!(&[5, 10, 15], merged.keys());

    assert_eq!(&[20], n.keys());
    assert_eq!(vec![vec![5, 10, 15], vec![25]], child_keys(&n));
}

#[test]
fn merge_children_collapses_root() {
    let left = Node::with_keys(vec![5], vec![leaf(&[1]), leaf(&[7])]);
    let right = Node::with_keys(vec![15], vec![leaf(&[12]), leaf(&[17])]);
    let mut n = Node::with_keys(vec![10], vec![left, right]);

    let merged = n.merge_children(0);
    assert_eq!(&[5, 10, 15], merged.keys());
    assert_eq!(4, merged.num_children());

    assert_eq!(&[5, 10, 15], n.keys());
    assert_eq!(vec![vec![1], vec![7], vec![12], vec![17]], child_keys(&n));
}

#[test]
fn transfer_key_clockwise_moves_child() {
    let left = Node::with_keys(vec![3, 6], vec![leaf(&[1]), leaf(&[4]), leaf(&[8])]);
    let right = Node::with_keys(vec![15], vec![leaf(&[12]), leaf(&[17])]);
    let mut n = Node::with_keys(vec![10], vec![left, right]);

    n.transfer_key_clockwise(0);

    assert_eq!(&[6], n.keys());
    assert_eq!(vec![vec![3], vec![10, 15]], child_keys(&n));
    assert_eq!(vec![vec![1], vec![4]], child_keys(&n.children()[0]));
    assert_eq!(vec![vec![8], vec![12], vec![17]], child_keys(&n.children()[1]));
}

#[test]
fn transfer_key_counter_clockwise_moves_child() {
    let left = Node::with_keys(vec![5], vec![leaf(&[1]), leaf(&[7])]);
    let right = Node::with_keys(vec![15, 20], vec![leaf(&[12]), leaf(&[17]), leaf(&[25])]);
    let mut n = Node::with_keys(vec![10], vec![left, right]);

    n.transfer_key_counter_clockwise(0);

    assert_eq!(&[15], n.keys());
    assert_eq!(vec![vec![5, 10], vec![20]], child_keys(&n));
    assert_eq!(vec![vec![1], vec![7], vec![12]], child_keys(&n.children()[0]));
    assert_eq!(vec![vec![17], vec![25]], child_keys(&n.children()[1]));
}

#[test]
fn grow_child_prefers_left_sibling() {
    let mut n = Node::with_keys(
        vec![10, 20],
        vec![leaf(&[1, 5]), leaf(&[15]), leaf(&[25, 30])],
    );
    let grown = n.grow_child(1, 1);
    assert_eq!(&[10, 15], grown.keys());

    assert_eq!(&[5, 20], n.keys());
    assert_eq!(vec![vec![1], vec![10, 15], vec![25, 30]], child_keys(&n));
}

#[test]
fn grow_child_borrows_from_right_sibling() {
    let mut n = Node::with_keys(vec![10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25, 30])]);
    let grown = n.grow_child(1, 1);
    assert_eq!(&[15, 20], grown.keys());

    assert_eq!(&[10, 25], n.keys());
    assert_eq!(vec![vec![5], vec![15, 20], vec![30]], child_keys(&n));
}

#[test]
fn grow_child_merges_with_left_sibling() {
    let mut n = Node::with_keys(vec![10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);
    let grown = n.grow_child(1, 1);
    assert_eq!(&[5, 10, 15], grown.keys());

    assert_eq!(&[20], n.keys());
    assert_eq!(vec![vec![5, 10, 15], vec![25]], child_keys(&n));
}

#[test]
fn grow_leftmost_child_merges_with_right_sibling() {
    let mut n = Node::with_keys(vec![10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);
    let grown = n.grow_child(0, 1);
    assert_eq!(&[5, 10, 15], grown.keys());

    assert_eq!(&[20], n.keys());
    assert_eq!(vec![vec![5, 10, 15], vec![25]], child_keys(&n));
}

#[test]
fn grow_child_of_single_key_root_collapses() {
    let mut n = Node::with_keys(vec![10], vec![leaf(&[5]), leaf(&[15])]);
    let grown = n.grow_child(1, 1);
    assert_eq!(&[5, 10, 15], grown.keys());
    assert_eq!(true, grown.is_leaf());

    assert_eq!(&[5, 10, 15], n.keys());
    assert_eq!(true, n.is_leaf());
}

#[test]
fn adopt_neighbours() {
    let mut n = Node::with_keys(vec![10], vec![leaf(&[1, 5]), leaf(&[15, 20])]);
    assert_eq!(Some(5), n.adopt_predecessor(0));
    assert_eq!(&[5], n.keys());
    assert_eq!(Some(15), n.adopt_successor(0));
    assert_eq!(&[15], n.keys());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "rotation from a sibling without keys")]
fn rotate_clockwise_from_empty_sibling() {
    let mut n = Node::with_keys(vec![10], vec![leaf(&[]), leaf(&[15])]);
    n.transfer_key_clockwise(0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "rotation from a sibling without keys")]
fn rotate_counter_clockwise_from_empty_sibling() {
    let mut n = Node::with_keys(vec![10], vec![leaf(&[5]), leaf(&[])]);
    n.transfer_key_counter_clockwise(0);
}
