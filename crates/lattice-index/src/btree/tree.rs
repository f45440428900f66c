//! Arena-based B+ tree with preemptive top-down splitting.

use std::cmp::Ordering;

use lattice_common::{IndexConfig, LatticeError, Result};

use super::arena::NodeArena;
use super::node::{Node, NodeId};

/// In-memory B+ tree index.
///
/// Keys are opaque to the tree; every operation takes a comparator that
/// defines their order. The tree maintains three structural invariants:
///
/// - every node's keys are strictly ascending under the comparator;
/// - every node except the root holds between `order - 1` and
///   `2 * order - 1` keys, and internal nodes hold `keys + 1` children;
/// - the leaves form a singly-linked chain in ascending key order,
///   starting at the leftmost leaf.
///
/// Insertion splits full nodes on the way down, before descending into
/// them, so a parent always has room to absorb the promoted key and no
/// split ever propagates back up. The root is never full after a public
/// call returns.
pub struct BPlusTree<K> {
    /// Minimum degree `m`.
    order: usize,
    /// Node storage.
    arena: NodeArena<K>,
    /// Root node id.
    root: NodeId,
    /// Leftmost leaf (head of the leaf chain).
    first: NodeId,
    /// Tree height (1 = root is a leaf).
    height: u32,
}

impl<K> BPlusTree<K> {
    /// Creates an empty tree with the given minimum degree.
    pub fn new(order: usize) -> Result<Self> {
        Self::with_config(&IndexConfig {
            order,
            ..IndexConfig::default()
        })
    }

    /// Creates an empty tree from a configuration.
    ///
    /// The root starts out as an empty leaf, which is also the head of
    /// the leaf chain.
    pub fn with_config(config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        let mut arena = NodeArena::with_capacity(config.initial_capacity);
        let root = arena.insert(Node::new_leaf(config.max_keys()));
        Ok(Self {
            order: config.order,
            arena,
            root,
            first: root,
            height: 1,
        })
    }

    /// Builds a tree by inserting `keys` one at a time.
    ///
    /// No bulk-loading shortcut: each key goes through the regular insert
    /// path, so the result satisfies all tree invariants. A duplicate in
    /// the input surfaces as [`LatticeError::DuplicateKey`].
    pub fn from_keys<I, F>(keys: I, order: usize, compare: F) -> Result<Self>
    where
        K: Clone,
        I: IntoIterator<Item = K>,
        F: Fn(&K, &K) -> Ordering,
    {
        let mut tree = Self::new(order)?;
        for key in keys {
            tree.insert(key, &compare)?;
        }
        Ok(tree)
    }

    /// Minimum degree `m`.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Tree height (1 = root is a leaf).
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read-only access to the root node.
    #[inline]
    pub fn root(&self) -> &Node<K> {
        self.arena.get(self.root)
    }

    /// Id of the root node.
    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Read-only access to an arbitrary node, for traversal.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<K> {
        self.arena.get(id)
    }

    /// Number of keys, counted along the leaf chain.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut current = Some(self.first);
        while let Some(id) = current {
            let leaf = self.arena.get(id);
            count += leaf.keys().len();
            current = leaf.next_leaf();
        }
        count
    }

    /// True if no keys have been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root().keys().is_empty()
    }

    /// True if `key` is present under `compare`.
    ///
    /// An exact match at any level counts: internal keys are copies of
    /// keys that live at the leaf level.
    pub fn contains<F>(&self, key: &K, compare: F) -> bool
    where
        F: Fn(&K, &K) -> Ordering,
    {
        let mut id = self.root;
        loop {
            let node = self.arena.get(id);
            match node.search(key, &compare) {
                Ok(_) => return true,
                Err(position) => {
                    if node.is_leaf() {
                        return false;
                    }
                    id = node.children()[position];
                }
            }
        }
    }

    /// Iterates keys in ascending order along the leaf chain.
    pub fn iter(&self) -> Keys<'_, K> {
        Keys {
            tree: self,
            leaf: Some(self.first),
            position: 0,
        }
    }

    /// Iterates leaf nodes left to right along the chain.
    pub fn leaves(&self) -> Leaves<'_, K> {
        Leaves {
            tree: self,
            leaf: Some(self.first),
        }
    }

    /// Inserts `key`, splitting full nodes on the way down.
    ///
    /// If the root is full it is split first, growing the tree by one
    /// level; the rest of the descent then runs entirely within nodes
    /// that have spare room. Returns [`LatticeError::DuplicateKey`] if
    /// the key is already present; the key set is left unchanged, though
    /// preemptive splits along the descent may already have run.
    pub fn insert<F>(&mut self, key: K, compare: F) -> Result<()>
    where
        K: Clone,
        F: Fn(&K, &K) -> Ordering,
    {
        if self.is_full(self.root) {
            let old_root = self.root;
            let (promoted, right) = self.split_node(old_root);
            let new_root = Node::new_root(promoted, old_root, right, self.max_keys());
            self.root = self.arena.insert(new_root);
            self.height += 1;
        }
        self.insert_non_full(self.root, key, &compare)
    }

    /// Inserts into the subtree rooted at `id`, which must not be full.
    fn insert_non_full<F>(&mut self, mut id: NodeId, key: K, compare: &F) -> Result<()>
    where
        K: Clone,
        F: Fn(&K, &K) -> Ordering,
    {
        loop {
            let node = self.arena.get(id);
            let position = match node.search(&key, compare) {
                Ok(_) => return Err(LatticeError::DuplicateKey),
                Err(position) => position,
            };

            if node.is_leaf() {
                self.arena.get_mut(id).insert_key(position, key);
                return Ok(());
            }

            let child = node.children()[position];
            if self.is_full(child) {
                let (promoted, right) = self.split_node(child);
                self.arena
                    .get_mut(id)
                    .insert_separator(position, promoted, right);
                // Re-search this node rather than descending: the promoted
                // key decides which of the two halves the pending key now
                // belongs under.
                continue;
            }
            id = child;
        }
    }

    /// Splits the full node at `id` in place: `id` keeps the left half
    /// and the returned id holds the new right sibling. Leaf splits
    /// relink the chain (`left -> right -> left's old successor`), so
    /// predecessor links and the first-leaf pointer stay valid.
    fn split_node(&mut self, id: NodeId) -> (K, NodeId)
    where
        K: Clone,
    {
        let max_keys = self.max_keys();
        let node = self.arena.get_mut(id);
        assert!(
            node.keys().len() == max_keys,
            "split invoked on a non-full node"
        );

        let leaf = node.is_leaf();
        let (promoted, right) = if leaf {
            node.split_leaf()
        } else {
            node.split_internal()
        };
        let right_id = self.arena.insert(right);
        if leaf {
            self.arena.get_mut(id).set_next_leaf(Some(right_id));
        }
        (promoted, right_id)
    }

    /// Maximum keys per node (`2m - 1`).
    #[inline]
    fn max_keys(&self) -> usize {
        2 * self.order - 1
    }

    #[inline]
    fn is_full(&self, id: NodeId) -> bool {
        self.arena.get(id).keys().len() == self.max_keys()
    }
}

/// Ascending iterator over a tree's keys (leaf-chain walk).
pub struct Keys<'a, K> {
    tree: &'a BPlusTree<K>,
    leaf: Option<NodeId>,
    position: usize,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.leaf?;
            let node = self.tree.arena.get(id);
            if self.position < node.keys().len() {
                let key = &node.keys()[self.position];
                self.position += 1;
                return Some(key);
            }
            self.leaf = node.next_leaf();
            self.position = 0;
        }
    }
}

/// Left-to-right iterator over a tree's leaf nodes.
pub struct Leaves<'a, K> {
    tree: &'a BPlusTree<K>,
    leaf: Option<NodeId>,
}

impl<'a, K> Iterator for Leaves<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.leaf?;
        let node = self.tree.arena.get(id);
        self.leaf = node.next_leaf();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btree::types::{bytes_comparator, compare_keys};
    use bytes::Bytes;

    #[test]
    fn test_tree_new() {
        let tree: BPlusTree<u64> = BPlusTree::new(2).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_tree_rejects_invalid_order() {
        let result: Result<BPlusTree<u64>> = BPlusTree::new(1);
        assert!(matches!(
            result,
            Err(LatticeError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_tree_basic_insert_and_contains() {
        let mut tree = BPlusTree::new(2).unwrap();

        tree.insert(100u64, u64::cmp).unwrap();
        tree.insert(200, u64::cmp).unwrap();
        tree.insert(50, u64::cmp).unwrap();

        assert_eq!(tree.len(), 3);
        assert!(tree.contains(&100, u64::cmp));
        assert!(tree.contains(&200, u64::cmp));
        assert!(tree.contains(&50, u64::cmp));
        assert!(!tree.contains(&999, u64::cmp));
    }

    #[test]
    fn test_tree_duplicate_key() {
        let mut tree = BPlusTree::new(2).unwrap();

        tree.insert(5u64, u64::cmp).unwrap();
        let result = tree.insert(5, u64::cmp);

        assert!(matches!(result, Err(LatticeError::DuplicateKey)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_tree_root_split_promotes_last_of_left_half() {
        let mut tree = BPlusTree::new(2).unwrap();

        // Fill the root: [5, 10, 20].
        tree.insert(10u64, u64::cmp).unwrap();
        tree.insert(20, u64::cmp).unwrap();
        tree.insert(5, u64::cmp).unwrap();
        assert_eq!(tree.height(), 1);

        // The fourth insert splits the root before descending. The left
        // half keeps [5, 10], so 10 is promoted.
        tree.insert(6, u64::cmp).unwrap();

        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root().keys(), &[10]);
        assert_eq!(tree.root().children().len(), 2);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_tree_iter_sorted() {
        let mut tree = BPlusTree::new(2).unwrap();
        for key in [40u64, 10, 30, 20, 50] {
            tree.insert(key, u64::cmp).unwrap();
        }

        let keys: Vec<u64> = tree.iter().copied().collect();
        assert_eq!(keys, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_tree_from_keys() {
        let tree = BPlusTree::from_keys([3u64, 1, 4, 1, 5], 2, u64::cmp);
        assert!(matches!(tree, Err(LatticeError::DuplicateKey)));

        let tree = BPlusTree::from_keys([3u64, 1, 4, 5, 9, 2, 6], 2, u64::cmp).unwrap();
        let keys: Vec<u64> = tree.iter().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn test_tree_many_inserts() {
        let mut tree = BPlusTree::new(4).unwrap();

        for i in 0..1000u64 {
            tree.insert(i, u64::cmp).unwrap();
        }

        assert_eq!(tree.len(), 1000);
        for i in 0..1000u64 {
            assert!(tree.contains(&i, u64::cmp));
        }
        assert!(!tree.contains(&1000, u64::cmp));
        assert!(tree.height() > 1);
    }

    #[test]
    fn test_tree_byte_keys() {
        let mut tree = BPlusTree::new(2).unwrap();
        let compare = bytes_comparator();

        for name in ["charlie", "alpha", "bravo", "delta", "echo"] {
            tree.insert(Bytes::from_static(name.as_bytes()), &compare)
                .unwrap();
        }

        let keys: Vec<&Bytes> = tree.iter().collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(keys[0].as_ref(), b"alpha");
        assert_eq!(keys[4].as_ref(), b"echo");
        assert!(tree.contains(&Bytes::from_static(b"delta"), &compare));
        assert!(!tree.contains(&Bytes::from_static(b"foxtrot"), &compare));

        // The closure agrees with the raw comparator.
        assert_eq!(
            compare(&Bytes::from_static(b"a"), &Bytes::from_static(b"b")),
            compare_keys(b"a", b"b")
        );
    }

    #[test]
    fn test_tree_leaf_chain_after_splits() {
        let mut tree = BPlusTree::new(2).unwrap();
        for key in [10u64, 20, 5, 6, 12, 30, 7, 17] {
            tree.insert(key, u64::cmp).unwrap();
        }

        // Every leaf is visited exactly once, in ascending order.
        let mut seen = Vec::new();
        for leaf in tree.leaves() {
            assert!(leaf.is_leaf());
            seen.extend_from_slice(leaf.keys());
        }
        assert_eq!(seen, vec![5, 6, 7, 10, 12, 17, 20, 30]);
    }
}
