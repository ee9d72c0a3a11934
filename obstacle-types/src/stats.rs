use serde::{Deserialize, Serialize};

/// Index statistics
///
/// Shape fields are computed on demand; operation counters accumulate over the
/// lifetime of the index and survive `reset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Height of the root (0 when empty)
    pub height: usize,
    /// Number of indexed records
    pub node_count: usize,
    /// Height of a perfectly packed tree with the same node count
    pub ideal_height: usize,
    /// `ideal_height / height` as a percentage
    pub efficiency: f64,
    /// Records added
    pub inserts: u64,
    /// Inserts rejected because the coordinate was taken
    pub duplicates: u64,
    /// Records removed by explicit deletes
    pub deletes: u64,
    /// Deletes of coordinates that were not indexed
    pub misses: u64,
    /// Records removed by eviction sweeps
    pub evictions: u64,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in the shape fields for a tree of the given height and size.
    pub fn with_shape(mut self, height: usize, node_count: usize) -> Self {
        self.height = height;
        self.node_count = node_count;
        self.ideal_height = ideal_height(node_count);
        self.efficiency = if height > 0 {
            self.ideal_height as f64 / height as f64 * 100.0
        } else {
            100.0
        };
        self
    }

    pub fn record_insert(&mut self, inserted: bool) {
        if inserted {
            self.inserts += 1;
        } else {
            self.duplicates += 1;
        }
    }

    pub fn record_delete(&mut self, removed: bool) {
        if removed {
            self.deletes += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    pub fn is_well_balanced(&self) -> bool {
        self.efficiency > 70.0
    }
}

/// `max(1, bit_length(n) - 1)`, and 1 for an empty tree.
fn ideal_height(node_count: usize) -> usize {
    if node_count == 0 {
        return 1;
    }
    let bit_length = (usize::BITS - node_count.leading_zeros()) as usize;
    bit_length.saturating_sub(1).max(1)
}
