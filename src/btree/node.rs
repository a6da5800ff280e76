use serde_derive::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A single node of the B-tree.
///
/// Leaves have no children, internal nodes always have exactly one child
/// more than they have keys. A node owns its children outright, the tree
/// owns the root.
///
/// Methods on a node only ever change the node itself and its direct
/// children. Keeping the number of keys within the degree bounds is up to
/// the [`BTree`](crate::BTree) that calls them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<K> {
    keys: Vec<K>,
    children: Vec<Node<K>>,
}

impl<K> Default for Node<K> {
    fn default() -> Self {
        Node::new()
    }
}

impl<K> Node<K> {
    /// Create an empty leaf.
    pub(crate) fn new() -> Node<K> {
        Node {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a node from already sorted keys and matching children.
    pub(crate) fn with_keys(keys: Vec<K>, children: Vec<Node<K>>) -> Node<K> {
        Node { keys, children }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn children(&self) -> &[Node<K>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node<K>> {
        &mut self.children
    }

    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Smallest key in the sub-tree of this node.
    ///
    /// Only an empty root has no keys, in which case `None` is returned.
    pub fn deep_min(&self) -> Option<&K> {
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
        }
        node.keys.first()
    }

    /// Largest key in the sub-tree of this node.
    pub fn deep_max(&self) -> Option<&K> {
        let mut node = self;
        while let Some(last) = node.children.last() {
            node = last;
        }
        node.keys.last()
    }

    /// In-order predecessor of the key at `index`, taken from the sub-tree left of it.
    ///
    /// Must only be called on internal nodes.
    pub fn deep_predecessor(&self, index: usize) -> Option<&K> {
        self.children[index].deep_max()
    }

    /// In-order successor of the key at `index`, taken from the sub-tree right of it.
    ///
    /// Must only be called on internal nodes.
    pub fn deep_successor(&self, index: usize) -> Option<&K> {
        self.children[index + 1].deep_min()
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    /// Index of the first key that is not smaller than `key`.
    ///
    /// This is the position of `key` if it is contained in this node and
    /// otherwise both the insertion position and the index of the child
    /// that has to be searched next. When the key occurs multiple times, the
    /// leftmost position is returned.
    pub fn search(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Same result as [`Node::search`], but scanning the keys from left to right.
    pub fn linear_search(&self, key: &K) -> usize {
        let mut index = 0;
        while index < self.keys.len() && self.keys[index] < *key {
            index += 1;
        }
        index
    }

    /// Checks whether `key` is stored at `index` of this node.
    pub fn contains_key_at(&self, key: &K, index: usize) -> bool {
        self.keys.get(index).map_or(false, |k| k == key)
    }

    /// Index of the largest key that is strictly smaller than `key`.
    pub fn locate_predecessor(&self, key: &K) -> Option<usize> {
        self.search(key).checked_sub(1)
    }

    /// Index of the smallest key that is strictly larger than `key`.
    ///
    /// If there is no such key, the number of keys is returned.
    pub fn locate_successor(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Largest key of this node that is strictly smaller than `key`.
    pub fn predecessor(&self, key: &K) -> Option<&K> {
        self.locate_predecessor(key).map(|i| &self.keys[i])
    }

    /// Smallest key of this node that is strictly larger than `key`.
    pub fn successor(&self, key: &K) -> Option<&K> {
        self.keys.get(self.locate_successor(key))
    }

    /// Insert the key at its sorted position.
    ///
    /// The caller must make sure this is a leaf with room left.
    pub(crate) fn insert(&mut self, key: K) {
        let index = self.search(&key);
        self.keys.insert(index, key);
    }

    /// Remove one occurrence of the key, returns whether it was present.
    pub(crate) fn delete(&mut self, key: &K) -> bool {
        let index = self.search(key);
        if self.contains_key_at(key, index) {
            self.keys.remove(index);
            true
        } else {
            false
        }
    }

    /// Split the child at `index` around its median key.
    ///
    /// The keys and children left of the median stay in the existing child,
    /// everything right of it moves to a new right sibling and the median key
    /// itself moves up into this node at `index`.
    pub(crate) fn split_child(&mut self, index: usize) {
        let child = &mut self.children[index];
        let median = child.num_keys() / 2;

        let right_keys = child.keys.split_off(median + 1);
        let right_children = if child.is_leaf() {
            Vec::new()
        } else {
            child.children.split_off(median + 1)
        };
        let median_key = child.keys.remove(median);

        trace!(index, median, "split child");

        self.keys.insert(index, median_key);
        self.children
            .insert(index + 1, Node::with_keys(right_keys, right_children));
    }

    /// Merge the key at `index` and both of its children into a single node.
    ///
    /// Returns the merged node. If this node has no keys left afterwards
    /// (only possible for a root with a single key) it takes over the keys
    /// and children of the merged node and is returned itself, which reduces
    /// the height of the tree by one.
    pub(crate) fn merge_children(&mut self, index: usize) -> &mut Node<K> {
        let median_key = self.keys.remove(index);
        let right = self.children.remove(index + 1);

        let left = &mut self.children[index];
        left.keys.push(median_key);
        left.keys.extend(right.keys);
        left.children.extend(right.children);

        trace!(index, merged_keys = left.num_keys(), "merged children");

        if self.keys.is_empty() {
            if let Some(merged) = self.children.pop() {
                *self = merged;
            }
            debug!(num_keys = self.num_keys(), "collapsed root into merged child");
            self
        } else {
            &mut self.children[index]
        }
    }

    /// Make sure the child at `index` has more than `min_keys` keys.
    ///
    /// A key is borrowed from the left sibling if it can spare one, otherwise
    /// from the right sibling. If neither can, the child is merged with a
    /// direct sibling, preferring the left one. Returns the node the caller
    /// should continue with, which is the merged node in the last case.
    pub(crate) fn grow_child(&mut self, index: usize, min_keys: usize) -> &mut Node<K> {
        let has_left = index > 0;
        let has_right = index < self.num_keys();

        if has_left && self.children[index - 1].num_keys() > min_keys {
            self.transfer_key_clockwise(index - 1);
            &mut self.children[index]
        } else if has_right && self.children[index + 1].num_keys() > min_keys {
            self.transfer_key_counter_clockwise(index);
            &mut self.children[index]
        } else if has_left {
            self.merge_children(index - 1)
        } else {
            self.merge_children(index)
        }
    }

    /// Rotate a key from the child at `index` to its right sibling.
    ///
    /// The largest key of the left child replaces the key at `index`, which in
    /// turn becomes the smallest key of the right child. The rightmost child
    /// of the left node moves along.
    pub(crate) fn transfer_key_clockwise(&mut self, index: usize) {
        let (left_part, right_part) = self.children.split_at_mut(index + 1);
        let left = &mut left_part[index];
        let right = &mut right_part[0];

        debug_assert!(!left.keys.is_empty(), "rotation from a sibling without keys");
        let Some(up) = left.keys.pop() else {
            return;
        };
        let down = std::mem::replace(&mut self.keys[index], up);
        right.keys.insert(0, down);

        if let Some(moved) = left.children.pop() {
            right.children.insert(0, moved);
        }
        trace!(index, "rotated key clockwise");
    }

    /// Rotate a key from the child at `index + 1` to its left sibling.
    ///
    /// The smallest key of the right child replaces the key at `index`, which
    /// in turn becomes the largest key of the left child. The leftmost child
    /// of the right node moves along.
    pub(crate) fn transfer_key_counter_clockwise(&mut self, index: usize) {
        let (left_part, right_part) = self.children.split_at_mut(index + 1);
        let left = &mut left_part[index];
        let right = &mut right_part[0];

        debug_assert!(!right.keys.is_empty(), "rotation from a sibling without keys");
        if right.keys.is_empty() {
            return;
        }
        let up = right.keys.remove(0);
        let down = std::mem::replace(&mut self.keys[index], up);
        left.keys.push(down);

        if !right.is_leaf() {
            left.children.push(right.children.remove(0));
        }
        trace!(index, "rotated key counter-clockwise");
    }
}

impl<K> Node<K>
where
    K: Clone,
{
    /// Replace the key at `index` with its in-order predecessor and return a copy of it.
    pub(crate) fn adopt_predecessor(&mut self, index: usize) -> Option<K> {
        let replacement = self.deep_predecessor(index)?.clone();
        self.keys[index] = replacement.clone();
        Some(replacement)
    }

    /// Replace the key at `index` with its in-order successor and return a copy of it.
    pub(crate) fn adopt_successor(&mut self, index: usize) -> Option<K> {
        let replacement = self.deep_successor(index)?.clone();
        self.keys[index] = replacement.clone();
        Some(replacement)
    }
}

#[cfg(test)]
mod tests;
