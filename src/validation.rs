//! Validation for caller-placed obstacles.

use crate::config::Config;
use crate::error::{IndexError, Result};
use obstacle_types::Obstacle;

/// Checks that an obstacle sits on an existing lane and ahead of the anchor.
///
/// Lanes are `0..config.lane_count`; `x` must be strictly greater than
/// `anchor_x`.
///
/// # Examples
///
/// ```
/// use obstacle_index::validation::validate_placement;
/// use obstacle_index::{Config, Obstacle};
///
/// let config = Config::default();
///
/// assert!(validate_placement(&Obstacle::new(500, 2, "roca"), 100, &config).is_ok());
///
/// // Lane 6 does not exist with the default six lanes
/// assert!(validate_placement(&Obstacle::new(500, 6, "roca"), 100, &config).is_err());
///
/// // Behind the anchor
/// assert!(validate_placement(&Obstacle::new(50, 2, "roca"), 100, &config).is_err());
/// ```
pub fn validate_placement(obstacle: &Obstacle, anchor_x: i64, config: &Config) -> Result<()> {
    validate_lane(obstacle.y, config.lane_count)?;

    if obstacle.x <= anchor_x {
        return Err(IndexError::InvalidInput(format!(
            "x must be greater than the current position {}, got: {}",
            anchor_x, obstacle.x
        )));
    }

    Ok(())
}

/// Checks `0 <= lane < lane_count`.
pub fn validate_lane(lane: i64, lane_count: i64) -> Result<()> {
    if !(0..lane_count).contains(&lane) {
        return Err(IndexError::InvalidInput(format!(
            "Lane out of range [0, {}]: {}",
            lane_count - 1,
            lane
        )));
    }

    Ok(())
}
