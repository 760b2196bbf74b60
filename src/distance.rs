//! Integer distance primitives
//!
//! All proximity comparisons in the generator (seed spacing, the cluster
//! neighbor radius, the growth bias) use squared Euclidean distance on integer
//! grid coordinates. Nothing here touches floating point except the one-off
//! threshold derivation, which rounds to an integer before use.

use glam::IVec2;

/// Grid coordinate of a sector
///
/// Coordinates fit in a byte each because grid dimensions are capped at 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    /// Column, 0 at the left edge
    pub x: u8,
    /// Row, 0 at the top edge
    pub y: u8,
}

impl Coord {
    /// Create a coordinate
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Convert to a signed vector for arithmetic
    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(i32::from(self.x), i32::from(self.y))
    }

    /// Squared Euclidean distance to another coordinate
    #[inline]
    pub fn distance_squared(self, other: Coord) -> u32 {
        distance_squared(self, other)
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

/// Squared Euclidean distance between two grid coordinates
///
/// The largest possible value on a 255×255 grid is `2 * 254²`, well inside `u32`.
#[inline]
pub fn distance_squared(a: Coord, b: Coord) -> u32 {
    (a.as_ivec2() - b.as_ivec2()).length_squared() as u32
}

/// Cell count of the grid the spacing ratios were tuned on (22×17)
pub const REFERENCE_CELL_COUNT: f64 = 374.0;

/// Same-race spacing budget on the reference grid
pub const SAME_RACE_REFERENCE: f64 = 12.5;

/// Different-race spacing budget on the reference grid
pub const DIFF_RACE_REFERENCE: f64 = 1.5;

/// Seed spacing thresholds derived from the grid's total cell count
///
/// Both values are squared-distance budgets: a candidate cell is excluded when
/// its squared distance to an existing seed is strictly below the threshold.
/// They scale linearly with the cell count and are not squared again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingThresholds {
    /// Base budget between two seeds of the same race (before per-race scaling)
    pub same_race: u32,
    /// Budget between any seed and a later seed of any race
    pub diff_race: u32,
}

impl SpacingThresholds {
    /// Derive thresholds for a grid with `cell_count` cells
    pub fn for_cell_count(cell_count: usize) -> Self {
        let total = cell_count as f64;
        Self {
            same_race: round_half_away(total * SAME_RACE_REFERENCE / REFERENCE_CELL_COUNT),
            diff_race: round_half_away(total * DIFF_RACE_REFERENCE / REFERENCE_CELL_COUNT),
        }
    }

    /// Same-race budget for a race that requested `max_clusters` seeds
    ///
    /// Races with more clusters pack them tighter. Returns 0 for inactive races.
    pub fn same_race_for(&self, max_clusters: u32) -> u32 {
        if max_clusters == 0 {
            return 0;
        }
        round_half_away(2.0 / f64::from(max_clusters) * f64::from(self.same_race))
    }
}

// f64::round already rounds half away from zero
fn round_half_away(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_squared() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(distance_squared(a, b), 25);
        assert_eq!(distance_squared(b, a), 25);
        assert_eq!(a.distance_squared(a), 0);
    }

    #[test]
    fn test_distance_squared_extremes() {
        let a = Coord::new(0, 0);
        let b = Coord::new(255, 255);
        assert_eq!(distance_squared(a, b), 2 * 255 * 255);
    }

    #[test]
    fn test_reference_grid_thresholds() {
        let t = SpacingThresholds::for_cell_count(374);
        // 12.5 rounds away from zero
        assert_eq!(t.same_race, 13);
        assert_eq!(t.diff_race, 2);
    }

    #[test]
    fn test_small_grid_thresholds() {
        let t = SpacingThresholds::for_cell_count(25);
        assert_eq!(t.same_race, 1);
        assert_eq!(t.diff_race, 0);
        assert_eq!(t.same_race_for(1), 2);
    }

    #[test]
    fn test_same_race_scaling() {
        let t = SpacingThresholds::for_cell_count(374);
        assert_eq!(t.same_race_for(1), 26);
        assert_eq!(t.same_race_for(2), 13);
        // 2/3 * 13 = 8.67
        assert_eq!(t.same_race_for(3), 9);
        assert_eq!(t.same_race_for(0), 0);
    }
}
