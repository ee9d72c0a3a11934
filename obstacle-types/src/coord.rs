use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite integer key of an indexed record.
///
/// Ordering is lexicographic: `x` first, `y` breaks ties. The derived `Ord`
/// relies on the field declaration order below.
///
/// # Examples
///
/// ```
/// use obstacle_types::coord::Coord;
///
/// assert!(Coord::new(5, 9) < Coord::new(10, 0));
/// assert!(Coord::new(10, 0) < Coord::new(10, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Distance along the road.
    pub x: i64,
    /// Lane index.
    pub y: i64,
}

impl Coord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A record that can be stored in the ordered index.
///
/// The returned key must stay constant for as long as the record is indexed.
pub trait Keyed {
    fn coord(&self) -> Coord;
}

impl Keyed for Coord {
    fn coord(&self) -> Coord {
        *self
    }
}
