//! Spatial indexing for coordinate-to-cluster lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::distance::Coord;

/// Wrapper around KD-tree over cluster seed coordinates
///
/// Seeds never move once placement is done, so the tree is built once at the
/// end of generation and answers "which cluster is this position closest to"
/// queries for renderers and tooling.
///
/// # Performance
///
/// - Construction: O(n log n) in the number of clusters
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from seed coordinates
    ///
    /// Item `i` of the index is `seeds[i]`. Returns `None` for an empty slice.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_universe_generator::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let seeds = vec![Coord::new(1, 1), Coord::new(10, 3), Coord::new(4, 9)];
    ///
    /// let index = SpatialIndex::new(&seeds).unwrap();
    /// assert_eq!(index.find_nearest(Coord::new(9, 4)), 1);
    /// # }
    /// ```
    pub fn new(seeds: &[Coord]) -> Option<Self> {
        if seeds.is_empty() {
            return None;
        }

        let points: Vec<[f32; 2]> = seeds
            .iter()
            .map(|c| [f32::from(c.x), f32::from(c.y)])
            .collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        })
    }

    /// Index of the seed nearest to a coordinate
    ///
    /// Equidistant seeds resolve to whichever the tree reaches first.
    pub fn find_nearest(&self, coord: Coord) -> usize {
        let query = [f32::from(coord.x), f32::from(coord.y)];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
