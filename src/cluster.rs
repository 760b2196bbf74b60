//! Cluster structure
//!
//! A cluster is a contiguous territory of one race, grown from a single seed.

use crate::config::Race;
use crate::distance::{distance_squared, Coord};
use crate::sector::SectorId;

/// Stable handle of a cluster (its creation index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub usize);

impl ClusterId {
    /// Position in the universe's cluster list
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A territory owned by one race
///
/// # Invariants
///
/// - `sectors().len() <= max_size`
/// - every growable sector is also a member
/// - once `can_grow` is false it stays false
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Handle of this cluster
    pub id: ClusterId,

    /// Owning race
    pub race: Race,

    /// Coordinate of the first claimed sector
    pub seed: Coord,

    /// Size cap copied from the race's quotas
    pub max_size: u32,

    sectors: Vec<SectorId>,
    growable: Vec<SectorId>,
    neighbors: Vec<ClusterId>,
}

impl Cluster {
    pub(crate) fn new(id: ClusterId, race: Race, seed: Coord, max_size: u32) -> Self {
        Self {
            id,
            race,
            seed,
            max_size,
            sectors: Vec::new(),
            growable: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// Member sectors in claim order (seed first)
    #[inline]
    pub fn sectors(&self) -> &[SectorId] {
        &self.sectors
    }

    /// Number of member sectors
    #[inline]
    pub fn size(&self) -> usize {
        self.sectors.len()
    }

    /// Members that still touch at least one free sector
    #[inline]
    pub fn growable_sectors(&self) -> &[SectorId] {
        &self.growable
    }

    /// Clusters whose seeds lie within the neighbor radius
    ///
    /// Sorted nearest first once placement has finished.
    #[inline]
    pub fn neighbors(&self) -> &[ClusterId] {
        &self.neighbors
    }

    /// Whether any neighbors are registered
    #[inline]
    pub fn has_neighbors(&self) -> bool {
        !self.neighbors.is_empty()
    }

    /// Closest neighbor by seed distance
    #[inline]
    pub fn nearest_neighbor(&self) -> Option<ClusterId> {
        self.neighbors.first().copied()
    }

    /// Check whether another cluster is registered as a neighbor
    #[inline]
    pub fn is_neighbor_of(&self, other: ClusterId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Whether this cluster has frontier left and is below its cap
    #[inline]
    pub fn can_grow(&self) -> bool {
        !self.growable.is_empty() && (self.sectors.len() as u64) < u64::from(self.max_size)
    }

    /// Squared distance between the seeds of two clusters
    #[inline]
    pub fn seed_distance_squared(&self, other: &Cluster) -> u32 {
        distance_squared(self.seed, other.seed)
    }

    pub(crate) fn add_sector(&mut self, sector: SectorId) {
        self.sectors.push(sector);
    }

    pub(crate) fn add_growable(&mut self, sector: SectorId) {
        self.growable.push(sector);
    }

    pub(crate) fn remove_growable(&mut self, sector: SectorId) {
        if let Some(i) = self.growable.iter().position(|&s| s == sector) {
            self.growable.remove(i);
        }
    }

    pub(crate) fn add_neighbor(&mut self, other: ClusterId) {
        if !self.neighbors.contains(&other) {
            self.neighbors.push(other);
        }
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<ClusterId>) {
        self.neighbors = neighbors;
    }
}
