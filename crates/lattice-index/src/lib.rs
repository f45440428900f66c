//! In-memory ordered index for LatticeDB.
//!
//! This crate provides:
//! - An arena-backed B+ tree over opaque, caller-compared keys
//! - Preemptive (top-down) node splitting on insert
//! - A singly-linked leaf chain for ordered traversal
//! - Byte-key comparison helpers for the key-value store use case

mod btree;

pub use btree::{
    bytes_comparator, compare_keys, BPlusTree, Keys, Leaves, Node, NodeArena, NodeId,
};
