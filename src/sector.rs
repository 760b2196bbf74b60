//! Sector structure
//!
//! A sector is one grid cell. Sectors live in a flat arena owned by the
//! universe and refer to each other and to clusters by index only.

use smallvec::SmallVec;

use crate::cluster::ClusterId;
use crate::config::Race;
use crate::distance::Coord;

/// Index of a sector in the universe's row-major arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorId(pub usize);

impl SectorId {
    /// Position in the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Sector relations never exceed the four orthogonal neighbors
pub(crate) type SectorLinks = SmallVec<[SectorId; 4]>;

/// A single grid cell
///
/// Each sector carries:
/// - its fixed coordinate
/// - the owning cluster and race once claimed
/// - while owned: the orthogonal neighbors that are still free (its growth frontier)
/// - while free: the owned neighbors that list it as reachable (its claimers)
///
/// A sector appears in another sector's free set exactly when that other
/// sector appears in its claimer set. Claiming is one-way.
#[derive(Debug, Clone)]
pub struct Sector {
    /// Stable arena index
    pub id: SectorId,

    /// Grid coordinate, fixed for the universe's lifetime
    pub coord: Coord,

    owner: Option<ClusterId>,
    race: Option<Race>,
    free_neighbors: SectorLinks,
    claimers: SectorLinks,
}

impl Sector {
    /// Create an unclaimed sector
    ///
    /// Sectors are created by the universe, not by user code.
    pub(crate) fn new(id: SectorId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            owner: None,
            race: None,
            free_neighbors: SmallVec::new(),
            claimers: SmallVec::new(),
        }
    }

    /// Cluster that owns this sector
    #[inline]
    pub fn owner(&self) -> Option<ClusterId> {
        self.owner
    }

    /// Race of the owning cluster
    #[inline]
    pub fn race(&self) -> Option<Race> {
        self.race
    }

    /// Whether no cluster owns this sector yet
    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Free orthogonal neighbors this sector can grow into
    ///
    /// Empty for free sectors.
    #[inline]
    pub fn free_neighbors(&self) -> &[SectorId] {
        &self.free_neighbors
    }

    /// Owned sectors that can grow into this one
    ///
    /// Empty for owned sectors.
    #[inline]
    pub fn claimers(&self) -> &[SectorId] {
        &self.claimers
    }

    /// Owned and still has at least one free neighbor
    #[inline]
    pub fn can_grow(&self) -> bool {
        !self.free_neighbors.is_empty()
    }

    pub(crate) fn set_owner(&mut self, cluster: ClusterId, race: Race) {
        self.owner = Some(cluster);
        self.race = Some(race);
    }

    pub(crate) fn add_free_neighbor(&mut self, sector: SectorId) {
        self.free_neighbors.push(sector);
    }

    /// Returns true when the frontier became empty through this removal
    pub(crate) fn remove_free_neighbor(&mut self, sector: SectorId) -> bool {
        match self.free_neighbors.iter().position(|&s| s == sector) {
            Some(i) => {
                self.free_neighbors.remove(i);
                self.free_neighbors.is_empty()
            }
            None => false,
        }
    }

    pub(crate) fn add_claimer(&mut self, sector: SectorId) {
        self.claimers.push(sector);
    }

    pub(crate) fn take_claimers(&mut self) -> SectorLinks {
        std::mem::take(&mut self.claimers)
    }
}
