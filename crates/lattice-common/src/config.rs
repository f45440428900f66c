//! Configuration structures for LatticeDB.

use crate::error::{LatticeError, Result};
use serde::{Deserialize, Serialize};

/// Smallest permitted minimum degree for an index.
pub const MIN_ORDER: usize = 2;

/// Default minimum degree. Order 16 gives up to 31 keys per node, a good
/// balance between node shift cost and tree height for in-memory use.
pub const DEFAULT_ORDER: usize = 16;

/// Default number of node slots pre-allocated by the node arena.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Configuration for a single B+ tree index instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Minimum degree `m`. Every node except the root holds between
    /// `m - 1` and `2m - 1` keys.
    pub order: usize,
    /// Number of node slots to pre-allocate in the node arena.
    pub initial_capacity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl IndexConfig {
    /// Checks the configuration for parameter errors.
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(LatticeError::InvalidParameter {
                name: "order".to_string(),
                value: self.order.to_string(),
            });
        }
        Ok(())
    }

    /// Maximum number of keys a node may hold (`2m - 1`).
    pub fn max_keys(&self) -> usize {
        2 * self.order - 1
    }

    /// Maximum number of children an internal node may hold (`2m`).
    pub fn max_children(&self) -> usize {
        2 * self.order
    }
}
