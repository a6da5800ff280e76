//! In-memory B-tree index with a configurable minimum degree.
//!
//! The tree keeps every node between `t - 1` and `2t - 1` keys (the root may
//! hold fewer) by splitting full children on the way down during insertion and
//! by borrowing from or merging with siblings on the way down during deletion.
//! No operation ever has to walk back up the tree.
//!
//! ```rust
//! use balanced_btree_index::{BTree, Error};
//!
//! fn main() -> std::result::Result<(), Error> {
//!     let mut t = BTree::new(2)?;
//!     for k in [10, 20, 30, 40] {
//!         t.insert(k);
//!     }
//!     assert_eq!(Some(&20), t.predecessor(&25));
//!     assert_eq!(Some(&30), t.successor(&25));
//!
//!     t.delete(&10);
//!     let keys: Vec<_> = t.inorder().copied().collect();
//!     assert_eq!(vec![20, 30, 40], keys);
//!     Ok(())
//! }
//! ```

mod btree;
mod error;

pub use btree::iter::{BreadthFirst, DepthFirst, InOrder, Levels};
pub use btree::node::Node;
pub use btree::BTree;
pub use error::{Error, Result};

use serde_derive::{Deserialize, Serialize};

const DEFAULT_DEGREE: usize = 4;

/// Configuration for a [`BTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BtreeConfig {
    degree: usize,
}

impl Default for BtreeConfig {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
        }
    }
}

impl BtreeConfig {
    /// Set the minimum degree `t` of the tree.
    ///
    /// Every non-root node holds between `t - 1` and `2t - 1` keys.
    /// The degree must be at least 2, which is checked when the tree is created.
    pub fn with_degree(mut self, degree: usize) -> BtreeConfig {
        self.degree = degree;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}
