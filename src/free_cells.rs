//! Free-cell set used during seed placement
//!
//! A bitset over the row-major cell indices. Iteration order is the index
//! order, so picking "the n-th free cell" is reproducible across runs.

use fixedbitset::FixedBitSet;

use crate::distance::{distance_squared, Coord};

/// Set of grid coordinates not yet reserved or claimed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCells {
    bits: FixedBitSet,
    width: u8,
    height: u8,
}

impl FreeCells {
    /// Every cell of a `width × height` grid
    pub fn full(width: u8, height: u8) -> Self {
        let len = usize::from(width) * usize::from(height);
        let mut bits = FixedBitSet::with_capacity(len);
        bits.insert_range(..);
        Self { bits, width, height }
    }

    /// No cells of a `width × height` grid
    pub fn empty(width: u8, height: u8) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            bits: FixedBitSet::with_capacity(len),
            width,
            height,
        }
    }

    /// Number of free cells
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Whether no cell is free
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a coordinate is in the set (out-of-grid coordinates never are)
    pub fn contains(&self, coord: Coord) -> bool {
        self.index_of(coord).is_some_and(|i| self.bits.contains(i))
    }

    /// Remove one coordinate
    pub fn remove(&mut self, coord: Coord) {
        if let Some(i) = self.index_of(coord) {
            self.bits.set(i, false);
        }
    }

    /// Remove every cell whose squared distance to `center` is below `threshold`
    ///
    /// Only the bounding square of the exclusion disc is visited.
    pub fn remove_within(&mut self, center: Coord, threshold: u32) {
        if threshold == 0 {
            return;
        }

        let reach = ceil_sqrt(threshold) as i32;
        let cx = i32::from(center.x);
        let cy = i32::from(center.y);

        let x_range = (cx - reach).max(0)..=(cx + reach).min(i32::from(self.width) - 1);
        let y_range = (cy - reach).max(0)..=(cy + reach).min(i32::from(self.height) - 1);

        for y in y_range {
            for x in x_range.clone() {
                let coord = Coord::new(x as u8, y as u8);
                if distance_squared(coord, center) < threshold {
                    self.remove(coord);
                }
            }
        }
    }

    /// The `n`-th free coordinate in row-major order
    pub fn nth(&self, n: usize) -> Option<Coord> {
        self.bits.ones().nth(n).map(|i| self.coord_of(i))
    }

    /// Iterate free coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bits.ones().map(|i| self.coord_of(i))
    }

    /// Overwrite this set with the contents of another, reusing the allocation
    pub fn copy_from(&mut self, other: &FreeCells) {
        self.bits.clone_from(&other.bits);
        self.width = other.width;
        self.height = other.height;
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
    }

    fn coord_of(&self, index: usize) -> Coord {
        let width = usize::from(self.width);
        Coord::new((index % width) as u8, (index / width) as u8)
    }
}

/// Smallest `r` with `r * r >= value`
fn ceil_sqrt(value: u32) -> u32 {
    let mut r = f64::from(value).sqrt() as u32;
    while r * r < value {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_empty() {
        let full = FreeCells::full(5, 4);
        assert_eq!(full.len(), 20);
        assert!(full.contains(Coord::new(4, 3)));
        assert!(!full.contains(Coord::new(5, 0)));

        let empty = FreeCells::empty(5, 4);
        assert!(empty.is_empty());
        assert_eq!(empty.nth(0), None);
    }

    #[test]
    fn test_remove_and_nth() {
        let mut cells = FreeCells::full(5, 5);
        assert_eq!(cells.nth(0), Some(Coord::new(0, 0)));
        assert_eq!(cells.nth(6), Some(Coord::new(1, 1)));

        cells.remove(Coord::new(0, 0));
        assert_eq!(cells.len(), 24);
        assert_eq!(cells.nth(0), Some(Coord::new(1, 0)));

        // out-of-grid removal is a no-op
        cells.remove(Coord::new(9, 9));
        assert_eq!(cells.len(), 24);
    }

    #[test]
    fn test_remove_within_strict_threshold() {
        let mut cells = FreeCells::full(9, 9);
        let center = Coord::new(4, 4);
        cells.remove_within(center, 4);

        // distances 0, 1, 2 removed; distance 4 kept
        assert!(!cells.contains(center));
        assert!(!cells.contains(Coord::new(5, 4)));
        assert!(!cells.contains(Coord::new(5, 5)));
        assert!(cells.contains(Coord::new(6, 4)));
        assert_eq!(cells.len(), 81 - 9);
    }

    #[test]
    fn test_remove_within_clipped_at_edges() {
        let mut cells = FreeCells::full(5, 5);
        cells.remove_within(Coord::new(0, 0), 2);
        assert!(!cells.contains(Coord::new(0, 0)));
        assert!(!cells.contains(Coord::new(1, 0)));
        assert!(!cells.contains(Coord::new(0, 1)));
        assert!(cells.contains(Coord::new(1, 1)));
        assert_eq!(cells.len(), 22);
    }

    #[test]
    fn test_remove_within_zero_threshold() {
        let mut cells = FreeCells::full(5, 5);
        cells.remove_within(Coord::new(2, 2), 0);
        assert_eq!(cells.len(), 25);
    }

    #[test]
    fn test_iter_matches_nth() {
        let mut cells = FreeCells::full(6, 5);
        cells.remove_within(Coord::new(3, 2), 5);
        for (i, coord) in cells.iter().enumerate() {
            assert_eq!(cells.nth(i), Some(coord));
        }
    }

    #[test]
    fn test_copy_from_reuses_buffer() {
        let mut source = FreeCells::full(5, 5);
        source.remove(Coord::new(2, 2));

        let mut scratch = FreeCells::empty(5, 5);
        scratch.copy_from(&source);
        assert_eq!(scratch, source);

        scratch.remove(Coord::new(0, 0));
        assert!(source.contains(Coord::new(0, 0)));
    }

    #[test]
    fn test_ceil_sqrt() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(2), 2);
        assert_eq!(ceil_sqrt(4), 2);
        assert_eq!(ceil_sqrt(26), 6);
    }
}
