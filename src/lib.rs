//! Ordered spatial index over road obstacles, backed by an AVL tree.
//!
//! ## Features
//! - **Keyed storage**: obstacles keyed by an integer `(x, y)` coordinate,
//!   ordered by `x` then `y`, duplicates silently rejected
//! - **Guaranteed balance**: rotations after every insert and delete keep the
//!   height logarithmic in the number of obstacles
//! - **Range queries**: closed-box searches and a viewport window around a
//!   moving anchor
//! - **Traversals**: in-order, pre-order and post-order snapshots
//! - **Scenarios**: seed an index from a JSON (or TOML, with the `toml`
//!   feature) file and reset back to it
//!
//! ```rust
//! use obstacle_index::{Obstacle, ObstacleIndex};
//!
//! let mut index = ObstacleIndex::new();
//! index.insert(Obstacle::new(10, 1, "roca"));
//! index.insert(Obstacle::new(5, 2, "cono"));
//! index.insert(Obstacle::new(15, 0, "hueco"));
//! index.insert(Obstacle::new(3, 1, "aceite"));
//!
//! // Duplicates are ignored
//! assert!(!index.insert(Obstacle::new(5, 2, "roca")));
//!
//! let visible = index.visible_records(0, 12);
//! assert_eq!(visible.len(), 3);
//!
//! // Obstacles more than `eviction_margin` behind the anchor are dropped
//! let evicted = index.evict_behind(115);
//! assert_eq!(evicted.len(), 3);
//! assert_eq!(index.count(), 1);
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod scenario;
pub mod tree;
pub mod validation;

pub use builder::IndexBuilder;
pub use catalog::{KindCatalog, KindSpec};
pub use config::{Config, ViewportConfig};
pub use error::{IndexError, Result};
pub use index::ObstacleIndex;
pub use scenario::Scenario;
pub use tree::{AvlTree, TraversalOrder};

pub use obstacle_types::{Bounds, Coord, IndexStats, Keyed, Obstacle};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{IndexBuilder, IndexError, ObstacleIndex, Result};

    pub use crate::{Bounds, Coord, Keyed, Obstacle};

    pub use crate::{Config, KindCatalog, Scenario, TraversalOrder};
}
