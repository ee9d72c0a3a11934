use crate::coord::Coord;
use serde::{Deserialize, Serialize};

/// A closed axis-aligned query box over integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: i64,
    pub y_max: i64,
}

impl Bounds {
    /// Create a box from its inclusive limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use obstacle_types::bounds::Bounds;
    /// use obstacle_types::coord::Coord;
    ///
    /// let bounds = Bounds::new(0, 12, 0, 5);
    /// assert!(bounds.contains(Coord::new(12, 5)));
    /// assert!(!bounds.contains(Coord::new(13, 0)));
    /// ```
    pub const fn new(x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.contains_x(coord.x) && (self.y_min..=self.y_max).contains(&coord.y)
    }

    pub fn contains_x(&self, x: i64) -> bool {
        (self.x_min..=self.x_max).contains(&x)
    }

    /// True when either axis has `min > max`, so nothing can match.
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }
}
