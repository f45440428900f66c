//! B+ tree node representation and node-local split operations.

use std::cmp::Ordering;

/// Identifier of a node slot in the arena (id = slot index).
pub type NodeId = u32;

/// A single B+ tree vertex.
///
/// Leaves hold keys only and are linked into a forward chain in ascending
/// key order. Internal nodes hold `keys.len() + 1` child ids and never
/// participate in the chain.
#[derive(Debug)]
pub struct Node<K> {
    /// True if this node has no children.
    leaf: bool,
    /// Keys in strictly ascending order under the tree's comparator.
    keys: Vec<K>,
    /// Child node ids; empty for leaves.
    children: Vec<NodeId>,
    /// Next leaf in the chain. Always `None` for internal nodes.
    next: Option<NodeId>,
}

impl<K> Node<K> {
    /// Creates an empty leaf with room for `max_keys` keys.
    pub(crate) fn new_leaf(max_keys: usize) -> Self {
        Self {
            leaf: true,
            keys: Vec::with_capacity(max_keys),
            children: Vec::new(),
            next: None,
        }
    }

    /// Creates the internal root produced by a root split: one promoted
    /// key discriminating between the two halves of the old root.
    pub(crate) fn new_root(promoted: K, left: NodeId, right: NodeId, max_keys: usize) -> Self {
        let mut keys = Vec::with_capacity(max_keys);
        keys.push(promoted);
        let mut children = Vec::with_capacity(max_keys + 1);
        children.push(left);
        children.push(right);
        Self {
            leaf: false,
            keys,
            children,
            next: None,
        }
    }

    /// True if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// The node's keys, ascending.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Child ids; empty for leaves, `keys().len() + 1` entries otherwise.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Next leaf in the chain, if any.
    #[inline]
    pub fn next_leaf(&self) -> Option<NodeId> {
        self.next
    }

    /// Sets the next leaf in the chain.
    #[inline]
    pub(crate) fn set_next_leaf(&mut self, next: Option<NodeId>) {
        self.next = next;
    }

    /// Binary search for `key` under `compare`. Returns `Ok(index)` if an
    /// exact match exists, `Err(index)` with the insertion position
    /// otherwise. The insertion position doubles as the child index to
    /// descend into on internal nodes.
    pub fn search<F>(&self, key: &K, compare: &F) -> std::result::Result<usize, usize>
    where
        F: Fn(&K, &K) -> Ordering,
    {
        self.keys.binary_search_by(|probe| compare(probe, key))
    }

    /// Inserts `key` at `position`, keeping the keys sorted. The caller
    /// supplies the position from a prior `search`.
    pub(crate) fn insert_key(&mut self, position: usize, key: K) {
        self.keys.insert(position, key);
    }

    /// Splices the result of a child split into this node: the promoted
    /// key lands at `position`, the new right sibling at `position + 1`.
    /// `children[position]` already holds the left half, because a split
    /// reuses the slot of the node it divides.
    pub(crate) fn insert_separator(&mut self, position: usize, key: K, right: NodeId) {
        self.keys.insert(position, key);
        self.children.insert(position + 1, right);
    }

    /// Splits a full leaf in two. `self` keeps the lower half of the keys
    /// (one more than the upper half, since a full node holds an odd
    /// count) and the returned right sibling takes the rest plus `self`'s
    /// outgoing chain link. The promoted key is a copy of the left half's
    /// last key: the leaf level stays complete, so chain scans still see
    /// every key.
    ///
    /// The caller links `self` to the right sibling once it has an id.
    pub(crate) fn split_leaf(&mut self) -> (K, Node<K>)
    where
        K: Clone,
    {
        let mid = self.keys.len() / 2;
        let upper = self.keys.split_off(mid + 1);
        let promoted = self.keys[mid].clone();
        let right = Node {
            leaf: true,
            keys: upper,
            children: Vec::new(),
            next: self.next.take(),
        };
        (promoted, right)
    }

    /// Splits a full internal node in two. The middle key moves up to the
    /// parent and is removed here, so both halves keep
    /// `children == keys + 1`. `self` keeps the lower keys and children;
    /// the returned right sibling takes the rest.
    pub(crate) fn split_internal(&mut self) -> (K, Node<K>) {
        let mid = self.keys.len() / 2;
        let upper_keys = self.keys.split_off(mid + 1);
        let promoted = self.keys.remove(mid);
        let upper_children = self.children.split_off(mid + 1);
        let right = Node {
            leaf: false,
            keys: upper_keys,
            children: upper_children,
            next: None,
        };
        (promoted, right)
    }
}
