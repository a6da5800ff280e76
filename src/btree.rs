use std::borrow::Cow;

use serde_derive::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Result, BtreeConfig, Error};

use iter::{BreadthFirst, DepthFirst, InOrder, Levels};
use node::Node;

pub(crate) mod iter;
pub(crate) mod node;

/// In-memory B-tree of keys with a configurable minimum degree `t`.
///
/// Every node except the root holds between `t - 1` and `2t - 1` keys and all
/// leaves are at the same depth. Insertion splits full children before
/// descending into them and deletion grows children with the minimal number
/// of keys before descending into them, so no operation needs to walk back up.
///
/// Keys are not de-duplicated: inserting a key that is already present
/// stores a second occurrence, and deleting it removes one occurrence.
///
/// Only the root and the degree are serialized. Deserializing checks the
/// degree and the structure of all nodes and recomputes the derived bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "TreeSnapshot<K>",
    bound(deserialize = "K: serde::Deserialize<'de> + Ord")
)]
pub struct BTree<K> {
    root: Node<K>,
    degree: usize,
    #[serde(skip_serializing)]
    min_keys: usize,
    #[serde(skip_serializing)]
    max_keys: usize,
    #[serde(skip_serializing)]
    nr_elements: usize,
}

/// Serialized form of a [`BTree`], which has to be validated before use.
#[derive(Deserialize)]
struct TreeSnapshot<K> {
    root: Node<K>,
    degree: usize,
}

impl<K> TryFrom<TreeSnapshot<K>> for BTree<K>
where
    K: Ord,
{
    type Error = Error;

    fn try_from(snapshot: TreeSnapshot<K>) -> Result<BTree<K>> {
        let mut tree = BTree::new(snapshot.degree)?;
        if !snapshot.root.is_leaf() && snapshot.root.num_keys() == 0 {
            return Err(Error::InvalidSnapshot("internal root without keys"));
        }
        let mut leaf_depth = None;
        tree.nr_elements = tree.check_node(&snapshot.root, 0, None, None, &mut leaf_depth)?;
        tree.root = snapshot.root;
        Ok(tree)
    }
}

impl<K> BTree<K> {
    /// Create an empty tree with the given minimum degree.
    ///
    /// Fails if the degree is smaller than 2.
    pub fn new(degree: usize) -> Result<BTree<K>> {
        BTree::with_config(BtreeConfig::default().with_degree(degree))
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: BtreeConfig) -> Result<BTree<K>> {
        let degree = config.degree();
        if degree < 2 {
            return Err(Error::DegreeTooSmall(degree));
        }
        let max_keys = degree
            .checked_mul(2)
            .map(|d| d - 1)
            .ok_or(Error::DegreeTooLarge(degree))?;

        Ok(BTree {
            root: Node::new(),
            degree,
            min_keys: degree - 1,
            max_keys,
            nr_elements: 0,
        })
    }

    pub fn root(&self) -> &Node<K> {
        &self.root
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Minimum number of keys of every node except the root.
    pub fn min_keys(&self) -> usize {
        self.min_keys
    }

    /// Maximum number of keys of every node.
    pub fn max_keys(&self) -> usize {
        self.max_keys
    }

    /// Returns the number of keys in the tree, counting every occurrence.
    pub fn len(&self) -> usize {
        self.nr_elements
    }

    /// Returns true if the tree does not contain any keys.
    pub fn is_empty(&self) -> bool {
        self.nr_elements == 0
    }

    /// Number of levels, which is 1 for a tree that only consists of its root.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.root;
        while let Some(first) = node.children().first() {
            node = first;
            height += 1;
        }
        height
    }

    /// Smallest key of the tree.
    pub fn min(&self) -> Option<&K> {
        self.root.deep_min()
    }

    /// Largest key of the tree.
    pub fn max(&self) -> Option<&K> {
        self.root.deep_max()
    }

    /// Remove all keys.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.nr_elements = 0;
    }

    /// Iterate over all keys in non-decreasing order.
    pub fn inorder(&self) -> InOrder<'_, K> {
        InOrder::new(&self.root)
    }

    /// Iterate over all nodes using a single stack.
    ///
    /// Children of a node are pushed in order and popped in reverse, so the
    /// nodes of a level are visited from right to left. See [`BTree::levels`]
    /// for a strict left-to-right order.
    pub fn breadth_first_search(&self) -> BreadthFirst<'_, K> {
        BreadthFirst::new(&self.root)
    }

    /// Iterate over all nodes in the reverse order of [`BTree::breadth_first_search`].
    pub fn depth_first_search(&self) -> DepthFirst<'_, K> {
        DepthFirst::new(&self.root)
    }

    /// Iterate over the levels of the tree, each given as its nodes from left to right.
    pub fn levels(&self) -> Levels<'_, K> {
        Levels::new(&self.root)
    }
}

impl<K> BTree<K>
where
    K: Ord,
{
    /// Searches for a key in the tree.
    ///
    /// Returns the node containing the key and the position of the key
    /// inside this node.
    pub fn search(&self, key: &K) -> Option<(&Node<K>, usize)> {
        let mut node = &self.root;
        loop {
            let index = node.search(key);
            if node.contains_key_at(key, index) {
                return Some((node, index));
            }
            if node.is_leaf() {
                return None;
            }
            node = &node.children()[index];
        }
    }

    /// Returns the stored key that is equal to the given one.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.search(key).map(|(node, index)| &node.keys()[index])
    }

    /// Returns whether the tree contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Largest key of the tree that is strictly smaller than `key`.
    pub fn predecessor(&self, key: &K) -> Option<&K> {
        let mut node = &self.root;
        let mut predecessor = None;
        loop {
            let index = node.locate_predecessor(key);
            if let Some(i) = index {
                predecessor = Some(&node.keys()[i]);
            }
            if node.is_leaf() {
                return predecessor;
            }
            node = &node.children()[index.map_or(0, |i| i + 1)];
        }
    }

    /// Smallest key of the tree that is strictly larger than `key`.
    pub fn successor(&self, key: &K) -> Option<&K> {
        let mut node = &self.root;
        let mut successor = None;
        loop {
            let index = node.locate_successor(key);
            if index < node.num_keys() {
                successor = Some(&node.keys()[index]);
            }
            if node.is_leaf() {
                return successor;
            }
            node = &node.children()[index];
        }
    }

    /// Check the bounds and ordering of a deserialized sub-tree and count its keys.
    fn check_node(
        &self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        if node.num_keys() > self.max_keys {
            return Err(Error::InvalidSnapshot("node with too many keys"));
        }
        if depth > 0 && node.num_keys() < self.min_keys {
            return Err(Error::InvalidSnapshot("node with too few keys"));
        }
        if node.keys().windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidSnapshot("keys of a node are not sorted"));
        }
        let below_lower = matches!((lower, node.keys().first()), (Some(l), Some(k)) if k < l);
        let above_upper = matches!((upper, node.keys().last()), (Some(u), Some(k)) if k > u);
        if below_lower || above_upper {
            return Err(Error::InvalidSnapshot("key outside the range of its parent"));
        }

        if node.is_leaf() {
            if *leaf_depth.get_or_insert(depth) != depth {
                return Err(Error::InvalidSnapshot("leaves at different depths"));
            }
            return Ok(node.num_keys());
        }
        if node.num_children() != node.num_keys() + 1 {
            return Err(Error::InvalidSnapshot("wrong number of children"));
        }

        let mut count = node.num_keys();
        for (i, child) in node.children().iter().enumerate() {
            let child_lower = if i == 0 { lower } else { node.keys().get(i - 1) };
            let child_upper = node.keys().get(i).or(upper);
            count += self.check_node(child, depth + 1, child_lower, child_upper, leaf_depth)?;
        }
        Ok(count)
    }

    /// Insert a new key into the tree.
    ///
    /// Keys that are already present are not replaced, the new key is stored
    /// as an additional occurrence.
    pub fn insert(&mut self, key: K) {
        if self.root.num_keys() == self.max_keys {
            // The only place where the tree grows in height
            let old_root = std::mem::take(&mut self.root);
            self.root.children_mut().push(old_root);
            self.root.split_child(0);
            debug!(height = self.height(), "split full root");
        }

        let max_keys = self.max_keys;
        let mut node = &mut self.root;
        while !node.is_leaf() {
            let mut index = node.search(&key);
            if node.children()[index].num_keys() == max_keys {
                node.split_child(index);
                if node.keys()[index] < key {
                    index += 1;
                }
            }
            node = &mut node.children_mut()[index];
        }
        node.insert(key);
        self.nr_elements += 1;
    }
}

impl<K> BTree<K>
where
    K: Ord + Clone,
{
    /// Delete one occurrence of the key from the tree.
    ///
    /// Deleting a key that is not present leaves the tree unchanged.
    /// Returns whether a key has been removed.
    pub fn delete(&mut self, key: &K) -> bool {
        let min_keys = self.min_keys;
        let mut key = Cow::Borrowed(key);
        let mut node = &mut self.root;

        while !node.is_leaf() {
            let index = node.search(&key);

            if node.contains_key_at(&key, index) {
                // Replace the key with a neighbour from a child that can spare
                // one and continue by deleting that neighbour in the child
                let replacement = if node.children()[index].num_keys() > min_keys {
                    node.adopt_predecessor(index).map(|k| (k, index))
                } else if node.children()[index + 1].num_keys() > min_keys {
                    node.adopt_successor(index).map(|k| (k, index + 1))
                } else {
                    None
                };

                match replacement {
                    Some((replacement, child)) => {
                        key = Cow::Owned(replacement);
                        node = &mut node.children_mut()[child];
                    }
                    None => {
                        // The key is now part of the merged node
                        node = node.merge_children(index);
                    }
                }
            } else if node.children()[index].num_keys() <= min_keys {
                node = node.grow_child(index, min_keys);
            } else {
                node = &mut node.children_mut()[index];
            }
        }

        let removed = node.delete(&key);
        if removed {
            self.nr_elements -= 1;
        } else {
            debug!(len = self.nr_elements, "key to delete not found");
        }
        removed
    }
}

impl<K> Extend<K> for BTree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}
