//! Index builder for flexible configuration
//!
//! Collects a configuration and seed obstacles from code and/or a scenario
//! file before building an [`ObstacleIndex`].

use crate::config::Config;
use crate::error::Result;
use crate::index::ObstacleIndex;
use crate::scenario::Scenario;
use obstacle_types::Obstacle;
use std::path::PathBuf;

/// Builder for an [`ObstacleIndex`].
///
/// When a scenario path is set, its configuration replaces the builder's and
/// its obstacles are seeded before any added with [`obstacle`](Self::obstacle).
///
/// # Examples
///
/// ```rust
/// use obstacle_index::{Config, IndexBuilder, Obstacle};
///
/// let index = IndexBuilder::new()
///     .config(Config::default().with_lane_count(4))
///     .obstacle(Obstacle::new(10, 1, "roca"))
///     .obstacles(vec![Obstacle::new(20, 3, "cono")])
///     .build()?;
///
/// assert_eq!(index.count(), 2);
/// # Ok::<(), obstacle_index::IndexError>(())
/// ```
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: Config,
    seed: Vec<Obstacle>,
    scenario_path: Option<PathBuf>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Add one seed obstacle.
    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.seed.push(obstacle);
        self
    }

    pub fn obstacles<I: IntoIterator<Item = Obstacle>>(mut self, obstacles: I) -> Self {
        self.seed.extend(obstacles);
        self
    }

    /// Read configuration and seed obstacles from a scenario file at build time.
    pub fn scenario_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.scenario_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<ObstacleIndex> {
        let Some(path) = self.scenario_path else {
            return ObstacleIndex::with_seed(self.config, self.seed);
        };

        let scenario = Scenario::from_path(&path)?;
        let mut seed = scenario.obstacles;
        seed.extend(self.seed);
        ObstacleIndex::with_seed(scenario.config, seed)
    }
}
