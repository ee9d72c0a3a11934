//! Obstacle index used by the game loop.
//!
//! `ObstacleIndex` wraps the AVL tree with the operations the surrounding
//! application needs: keyed insert and delete, box and viewport queries,
//! traversal snapshots, eviction of obstacles left behind, and a wholesale
//! reset back to the seed obstacles.

use crate::config::Config;
use crate::error::{IndexError, Result};
use crate::scenario::Scenario;
use crate::tree::{AvlTree, TraversalOrder};
use crate::validation::validate_placement;
use obstacle_types::{Bounds, Coord, IndexStats, Obstacle};
use std::path::Path;

/// Seeds larger than this are unusual for a single road segment.
const LARGE_SEED_THRESHOLD: usize = 10_000;

/// Ordered spatial index over obstacles (single-threaded by design).
///
/// All query results are owned snapshots, so callers may mutate the index
/// while walking a previous result.
///
/// # Examples
///
/// ```rust
/// use obstacle_index::{Obstacle, ObstacleIndex};
///
/// let mut index = ObstacleIndex::new();
/// index.insert(Obstacle::new(10, 1, "roca"));
/// index.insert(Obstacle::new(5, 2, "cono"));
/// index.insert(Obstacle::new(15, 0, "hueco"));
///
/// let near = index.range_search(0, 12, 0, 5);
/// assert_eq!(near.len(), 2);
///
/// assert!(index.delete(5, 2).is_some());
/// assert_eq!(index.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObstacleIndex {
    tree: AvlTree<Obstacle>,
    config: Config,
    seed: Vec<Obstacle>,
    stats: IndexStats,
}

impl ObstacleIndex {
    /// Empty index with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().map_err(IndexError::InvalidConfig)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Index seeded from a scenario. The scenario obstacles become the seed
    /// restored by [`reset`](Self::reset).
    pub fn from_scenario(scenario: Scenario) -> Result<Self> {
        scenario.validate()?;
        Self::with_seed(scenario.config, scenario.obstacles)
    }

    /// Load a scenario file and seed an index from it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_scenario(Scenario::from_path(path)?)
    }

    pub(crate) fn with_seed(config: Config, seed: Vec<Obstacle>) -> Result<Self> {
        if seed.len() > LARGE_SEED_THRESHOLD {
            log::warn!(
                "Seeding index with {} obstacles; queries walk O(n) nodes in the worst case",
                seed.len()
            );
        }

        let mut index = Self::with_config(config)?;
        index.seed = seed;
        index.load_seed();
        Ok(index)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Insert an obstacle.
    ///
    /// Returns `false` when an obstacle already occupies the coordinate; the
    /// existing one is kept and the index is unchanged.
    pub fn insert(&mut self, obstacle: Obstacle) -> bool {
        let coord = obstacle.coord();
        let inserted = self.tree.insert(obstacle);
        self.stats.record_insert(inserted);

        if !inserted {
            log::debug!("Ignoring duplicate obstacle at {}", coord);
        }
        inserted
    }

    /// Validate a caller-placed obstacle against the lane layout and the
    /// current anchor, then insert it.
    pub fn place(&mut self, obstacle: Obstacle, anchor_x: i64) -> Result<bool> {
        validate_placement(&obstacle, anchor_x, &self.config)?;
        Ok(self.insert(obstacle))
    }

    /// Remove the obstacle at `(x, y)`. Returns `None` if nothing was there.
    pub fn delete(&mut self, x: i64, y: i64) -> Option<Obstacle> {
        let coord = Coord::new(x, y);
        let removed = self.tree.remove(coord);
        self.stats.record_delete(removed.is_some());

        if removed.is_none() {
            log::debug!("No obstacle to delete at {}", coord);
        }
        removed
    }

    pub fn get(&self, x: i64, y: i64) -> Option<&Obstacle> {
        self.tree.get(Coord::new(x, y))
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.tree.contains(Coord::new(x, y))
    }

    /// Obstacles inside the closed box `[x_min, x_max] x [y_min, y_max]`.
    pub fn range_search(
        &self,
        x_min: i64,
        x_max: i64,
        y_min: i64,
        y_max: i64,
    ) -> Vec<Obstacle> {
        self.query(&Bounds::new(x_min, x_max, y_min, y_max))
    }

    pub fn query(&self, bounds: &Bounds) -> Vec<Obstacle> {
        if bounds.is_empty() {
            log::warn!("Range query with inverted bounds {:?} matches nothing", bounds);
        }
        snapshot(self.tree.range_search(bounds))
    }

    /// Obstacles in the window around a moving anchor.
    ///
    /// The window spans from a quarter of the viewport width behind the
    /// anchor (never below zero) to one full width ahead, across the
    /// configured vertical extent.
    pub fn visible_records(&self, anchor_x: i64, viewport_width: i64) -> Vec<Obstacle> {
        let bounds = self.config.viewport.bounds(anchor_x, viewport_width);
        self.query(&bounds)
    }

    /// Remove every obstacle more than `eviction_margin` behind the anchor.
    ///
    /// Candidates are taken from a full in-order snapshot before any removal.
    pub fn evict_behind(&mut self, anchor_x: i64) -> Vec<Obstacle> {
        let limit = anchor_x.saturating_sub(self.config.eviction_margin);
        let stale: Vec<Coord> = self
            .tree
            .inorder()
            .into_iter()
            .map(Obstacle::coord)
            .filter(|coord| coord.x < limit)
            .collect();

        let evicted: Vec<Obstacle> = stale
            .into_iter()
            .filter_map(|coord| self.tree.remove(coord))
            .collect();

        if !evicted.is_empty() {
            log::info!("Evicted {} obstacles behind x={}", evicted.len(), limit);
            self.stats.record_evictions(evicted.len() as u64);
        }
        evicted
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<Obstacle> {
        snapshot(self.tree.traverse(order))
    }

    pub fn inorder(&self) -> Vec<Obstacle> {
        self.traverse(TraversalOrder::Inorder)
    }

    pub fn preorder(&self) -> Vec<Obstacle> {
        self.traverse(TraversalOrder::Preorder)
    }

    pub fn postorder(&self) -> Vec<Obstacle> {
        self.traverse(TraversalOrder::Postorder)
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Number of obstacles. O(n) on every call.
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn root(&self) -> Option<&Obstacle> {
        self.tree.root()
    }

    pub fn tree(&self) -> &AvlTree<Obstacle> {
        &self.tree
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
            .clone()
            .with_shape(self.tree.height(), self.tree.count())
    }

    /// Indented text dump of the tree shape.
    pub fn structure(&self) -> String {
        self.tree.structure()
    }

    pub fn verify(&self) -> Result<()> {
        self.tree.verify()
    }

    /// Drop every obstacle, keeping the seed for a later reset.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Discard the tree and rebuild it from the seed obstacles.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.load_seed();
        log::info!("Index reset to {} seed obstacles", self.tree.count());
    }

    fn load_seed(&mut self) {
        for obstacle in &self.seed {
            if !self.tree.insert(obstacle.clone()) {
                log::debug!("Seed repeats coordinate {}", obstacle.coord());
            }
        }
    }
}

fn snapshot(records: Vec<&Obstacle>) -> Vec<Obstacle> {
    records.into_iter().cloned().collect()
}
