//! B+ tree index with preemptive top-down splitting.
//!
//! The tree is the indexing primitive beneath a key-value store: callers
//! insert opaque keys under a caller-supplied comparator and the structure
//! maintains sorted order, bounded fan-out, and a forward-linked chain
//! across the leaves for ordered traversal.
//!
//! ## Insertion
//!
//! ```text
//! insert(key)
//!   ├─ root full? split it first (tree grows one level)
//!   └─ walk down from the root:
//!        ├─ exact match anywhere → DuplicateKey
//!        ├─ leaf               → place key, done
//!        └─ child full?        → split child, absorb promoted key,
//!                                re-search this node, then descend
//! ```
//!
//! Splitting a full child *before* descending into it guarantees the
//! parent always has room for the promoted key, so no split ever
//! propagates back up the tree.
//!
//! ## Node layout
//!
//! With minimum degree `m`, every node except the root holds between
//! `m - 1` and `2m - 1` keys; internal nodes hold `keys + 1` children:
//!
//! ```text
//!                 +--------[ 10 | 20 ]--------+
//!                 |           |               |
//!            [ 5 | 10 ]   [ 12 | 20 ]     [ 25 | 30 ]      (leaves)
//!                 \___________/\______________/
//!                   next            next                    (leaf chain)
//! ```
//!
//! Leaf splits copy the separator up (the leaf level stays complete for
//! chain scans); internal splits move the middle key up, keeping the
//! child-count invariant on both halves.
//!
//! ## Storage
//!
//! Nodes live in a slab-style arena addressed by stable `NodeId` indices.
//! A split reuses the slot of the node it divides as the left half, so
//! every id held elsewhere in the tree stays valid.

// Submodules
pub mod arena;
pub mod node;
pub mod tree;
pub mod types;

// Re-exports for public API
pub use arena::NodeArena;
pub use node::{Node, NodeId};
pub use tree::{BPlusTree, Keys, Leaves};
pub use types::{bytes_comparator, compare_keys};
