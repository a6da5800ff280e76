use super::node::Node;

/// Iterator over all keys of a tree in non-decreasing order.
///
/// Created by [`BTree::inorder`](crate::BTree::inorder).
pub struct InOrder<'a, K> {
    // Internal nodes whose key at the given index has not been emitted yet
    stack: Vec<(&'a Node<K>, usize)>,
    leaf_keys: std::slice::Iter<'a, K>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: &'a Node<K>) -> InOrder<'a, K> {
        let mut result = InOrder {
            stack: Vec::new(),
            leaf_keys: <&[K]>::default().iter(),
        };
        result.descend(root, 0);
        result
    }

    /// Walk down to the leftmost leaf below the child at `index`,
    /// remembering every key that still has to be emitted on the way back.
    fn descend(&mut self, mut node: &'a Node<K>, mut index: usize) {
        while !node.is_leaf() {
            if index < node.num_keys() {
                self.stack.push((node, index));
            }
            node = &node.children()[index];
            index = 0;
        }
        self.leaf_keys = node.keys().iter();
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(key) = self.leaf_keys.next() {
            return Some(key);
        }
        let (node, index) = self.stack.pop()?;
        self.descend(node, index + 1);
        Some(&node.keys()[index])
    }
}

/// Iterator over all nodes of a tree, driven by a single stack.
///
/// Nodes are popped from the stack and their children pushed in order, so
/// siblings are visited from right to left and the rightmost branch is
/// exhausted first. Use [`Levels`] for a strict left-to-right level order.
pub struct BreadthFirst<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> BreadthFirst<'a, K> {
    pub(crate) fn new(root: &'a Node<K>) -> BreadthFirst<'a, K> {
        BreadthFirst { stack: vec![root] }
    }
}

impl<'a, K> Iterator for BreadthFirst<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children());
        Some(node)
    }
}

/// Iterator over all nodes of a tree where every child is emitted before its parent.
///
/// The nodes are collected with the same stack discipline as [`BreadthFirst`]
/// on the first call to `next()` and then emitted in reverse, so the leftmost
/// leaf comes first and the root comes last.
pub struct DepthFirst<'a, K> {
    root: Option<&'a Node<K>>,
    ordered: Vec<&'a Node<K>>,
}

impl<'a, K> DepthFirst<'a, K> {
    pub(crate) fn new(root: &'a Node<K>) -> DepthFirst<'a, K> {
        DepthFirst {
            root: Some(root),
            ordered: Vec::new(),
        }
    }
}

impl<'a, K> Iterator for DepthFirst<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.ordered.extend(BreadthFirst::new(root));
        }
        self.ordered.pop()
    }
}

/// Iterator over the levels of a tree, starting with the level of the root.
///
/// Each level lists its nodes from left to right.
pub struct Levels<'a, K> {
    level: Vec<&'a Node<K>>,
}

impl<'a, K> Levels<'a, K> {
    pub(crate) fn new(root: &'a Node<K>) -> Levels<'a, K> {
        Levels { level: vec![root] }
    }
}

impl<'a, K> Iterator for Levels<'a, K> {
    type Item = Vec<&'a Node<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.level.is_empty() {
            return None;
        }
        let next_level = self
            .level
            .iter()
            .flat_map(|&node| node.children())
            .collect();
        Some(std::mem::replace(&mut self.level, next_level))
    }
}
