//! # obstacle-types
//!
//! Core coordinate and record types shared by the obstacle index.
//!
//! - **Keys**: `Coord`, an integer `(x, y)` pair ordered lexicographically, and the
//!   `Keyed` trait that lets any record expose its key to the tree.
//! - **Records**: `Obstacle`, a coordinate plus a kind tag and opaque caller fields.
//! - **Queries**: `Bounds`, a closed axis-aligned box.
//! - **Diagnostics**: `IndexStats`.
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use obstacle_types::bounds::Bounds;
//! use obstacle_types::obstacle::Obstacle;
//!
//! let rock = Obstacle::new(120, 2, "roca");
//! let window = Bounds::new(100, 200, 0, 5);
//! assert!(window.contains(rock.coord()));
//! ```

pub mod bounds;
pub mod coord;
pub mod obstacle;
pub mod stats;

pub use bounds::Bounds;
pub use coord::{Coord, Keyed};
pub use obstacle::Obstacle;
pub use stats::IndexStats;
