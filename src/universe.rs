//! Universe main structure
//!
//! The universe owns every sector and cluster and is the only place sectors
//! change hands. Claiming always goes through [`Universe::claim`] so the
//! frontier bookkeeping between sectors and clusters stays consistent.

use crate::cluster::{Cluster, ClusterId};
use crate::config::{Race, UniverseSettings};
use crate::distance::{distance_squared, Coord};
use crate::error::{Result, UniverseError};
use crate::sector::{Sector, SectorId, SectorLinks};
use crate::summary::{GenerationSummary, RaceSummary};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Seeds within this many grid units of each other make their clusters neighbors
pub const CLUSTER_NEIGHBOR_RADIUS: u32 = 10;

/// A grid of sectors partitioned into race-owned clusters
///
/// # Examples
///
/// ```
/// use rust_universe_generator::*;
///
/// let settings = UniverseSettingsBuilder::new()
///     .dimensions(10, 8)
///     .unwrap()
///     .race(RaceSettings::new(Race::Argon, 20, 2, 10))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let universe = UniverseGenerator::from_seed(42).generate(&settings).unwrap();
/// println!("{} clusters, {} sectors claimed", universe.clusters().len(), universe.claimed_count());
///
/// if let Some(sector) = universe.sector_at(Coord::new(0, 0)) {
///     println!("top-left owner: {:?}", sector.race());
/// }
/// ```
#[derive(Clone)]
pub struct Universe {
    /// Settings this universe was created from
    settings: UniverseSettings,

    /// Row-major sector arena
    sectors: Vec<Sector>,

    /// Clusters in creation order (indexed by `ClusterId`)
    clusters: Vec<Cluster>,

    /// Set when generation stopped early
    interrupted: bool,

    /// Seed lookup, built once placement is final
    #[cfg(feature = "spatial-index")]
    seed_index: Option<SpatialIndex>,
}

impl Universe {
    /// Create an empty universe: every sector free, no clusters
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the settings fail validation
    pub fn new(settings: UniverseSettings) -> Result<Self> {
        settings.validate()?;

        let width = settings.width;
        let height = settings.height;
        let mut sectors = Vec::with_capacity(settings.cell_count());
        for y in 0..height {
            for x in 0..width {
                let id = SectorId(sectors.len());
                sectors.push(Sector::new(id, Coord::new(x, y)));
            }
        }

        let cluster_capacity = settings.requested_clusters() as usize;

        Ok(Self {
            settings,
            sectors,
            clusters: Vec::with_capacity(cluster_capacity),
            interrupted: false,
            #[cfg(feature = "spatial-index")]
            seed_index: None,
        })
    }

    /// Settings used to create this universe
    #[inline]
    pub fn settings(&self) -> &UniverseSettings {
        &self.settings
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> u8 {
        self.settings.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> u8 {
        self.settings.height
    }

    /// Number of sectors
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.sectors.len()
    }

    /// Arena index of a coordinate, if inside the grid
    #[inline]
    pub fn sector_id(&self, coord: Coord) -> Option<SectorId> {
        if coord.x >= self.width() || coord.y >= self.height() {
            return None;
        }
        Some(SectorId(
            usize::from(coord.y) * usize::from(self.width()) + usize::from(coord.x),
        ))
    }

    /// Sector at signed coordinates
    ///
    /// # Errors
    ///
    /// Returns `SectorOutOfBounds` if the coordinates lie outside the grid
    pub fn sector(&self, x: i32, y: i32) -> Result<&Sector> {
        let out_of_bounds = UniverseError::SectorOutOfBounds { x, y };
        let coord = match (u8::try_from(x), u8::try_from(y)) {
            (Ok(x), Ok(y)) => Coord::new(x, y),
            _ => return Err(out_of_bounds),
        };
        self.sector_at(coord).ok_or(out_of_bounds)
    }

    /// Sector at a coordinate, `None` outside the grid
    #[inline]
    pub fn sector_at(&self, coord: Coord) -> Option<&Sector> {
        self.sector_id(coord).map(|id| &self.sectors[id.index()])
    }

    /// Sector by arena index
    #[inline]
    pub fn sector_by_id(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id.index())
    }

    /// All sectors in row-major order
    #[inline]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// All clusters in creation order
    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster by handle
    #[inline]
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.index())
    }

    /// Clusters owned by one race
    pub fn clusters_of(&self, race: Race) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(move |c| c.race == race)
    }

    /// Number of claimed sectors
    pub fn claimed_count(&self) -> usize {
        self.sectors.iter().filter(|s| !s.is_free()).count()
    }

    /// Number of sectors owned by one race
    pub fn race_sector_count(&self, race: Race) -> usize {
        self.clusters_of(race).map(Cluster::size).sum()
    }

    /// Whether generation was stopped before it finished
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Free orthogonal neighbors of a coordinate (left, right, up, down)
    pub fn free_adjacent(&self, coord: Coord) -> impl Iterator<Item = SectorId> + '_ {
        let x = i32::from(coord.x);
        let y = i32::from(coord.y);
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .filter_map(move |(nx, ny)| {
                let nx = u8::try_from(nx).ok()?;
                let ny = u8::try_from(ny).ok()?;
                self.sector_id(Coord::new(nx, ny))
            })
            .filter(move |id| self.sectors[id.index()].is_free())
    }

    /// Claim a free sector for a cluster
    ///
    /// All frontier bookkeeping happens here, in one step:
    /// - the sector records its owner and race
    /// - every owned sector that could reach this one forgets it, and drops out
    ///   of its cluster's growable set if that was its last free neighbor
    /// - the free orthogonal neighbors become this sector's frontier, and this
    ///   sector becomes their claimer
    /// - the sector joins the cluster, and its growable set if it has frontier
    ///
    /// Quota counters are the caller's business.
    ///
    /// # Errors
    ///
    /// Returns `SectorNotFound` / `ClusterNotFound` for unknown handles and
    /// `SectorAlreadyClaimed` if the sector has an owner. Nothing is modified
    /// when an error is returned.
    pub fn claim(&mut self, sector: SectorId, cluster: ClusterId) -> Result<()> {
        let race = self
            .clusters
            .get(cluster.index())
            .ok_or(UniverseError::ClusterNotFound(cluster.index()))?
            .race;
        let target = self
            .sectors
            .get(sector.index())
            .ok_or(UniverseError::SectorNotFound(sector.index()))?;
        if !target.is_free() {
            return Err(UniverseError::SectorAlreadyClaimed {
                x: target.coord.x,
                y: target.coord.y,
            });
        }
        let coord = target.coord;

        self.sectors[sector.index()].set_owner(cluster, race);

        for claimer in self.sectors[sector.index()].take_claimers() {
            let exhausted = self.sectors[claimer.index()].remove_free_neighbor(sector);
            if exhausted {
                if let Some(owner) = self.sectors[claimer.index()].owner() {
                    self.clusters[owner.index()].remove_growable(claimer);
                }
            }
        }

        let frontier: SectorLinks = self.free_adjacent(coord).collect();
        for &free in &frontier {
            self.sectors[sector.index()].add_free_neighbor(free);
            self.sectors[free.index()].add_claimer(sector);
        }

        let owner = &mut self.clusters[cluster.index()];
        owner.add_sector(sector);
        if !frontier.is_empty() {
            owner.add_growable(sector);
        }

        Ok(())
    }

    /// Found a new cluster at a free seed sector
    ///
    /// Claims the seed and links the cluster with every existing cluster whose
    /// seed lies within [`CLUSTER_NEIGHBOR_RADIUS`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the race is not configured,
    /// `SectorOutOfBounds` for a seed outside the grid, and
    /// `SectorAlreadyClaimed` if the seed is owned
    pub fn create_cluster(&mut self, race: Race, seed: Coord) -> Result<ClusterId> {
        let max_size = self
            .settings
            .race(race)
            .map(|r| r.max_cluster_size)
            .ok_or_else(|| {
                UniverseError::InvalidConfig(format!("{} is not configured", race.name()))
            })?;
        let sector = self.sector_id(seed).ok_or(UniverseError::SectorOutOfBounds {
            x: i32::from(seed.x),
            y: i32::from(seed.y),
        })?;
        if !self.sectors[sector.index()].is_free() {
            return Err(UniverseError::SectorAlreadyClaimed { x: seed.x, y: seed.y });
        }

        let id = ClusterId(self.clusters.len());
        self.clusters.push(Cluster::new(id, race, seed, max_size));
        self.claim(sector, id)?;
        self.register_neighbors(id, CLUSTER_NEIGHBOR_RADIUS);

        Ok(id)
    }

    /// Clusters (other than `cluster`) whose seeds lie within `range`
    ///
    /// # Errors
    ///
    /// Returns `ClusterNotFound` for an unknown handle
    pub fn clusters_in_range(&self, cluster: ClusterId, range: u32) -> Result<Vec<ClusterId>> {
        let origin = self
            .cluster(cluster)
            .ok_or(UniverseError::ClusterNotFound(cluster.index()))?
            .seed;
        let range_squared = range * range;

        Ok(self
            .clusters
            .iter()
            .filter(|other| other.id != cluster)
            .filter(|other| distance_squared(origin, other.seed) <= range_squared)
            .map(|other| other.id)
            .collect())
    }

    fn register_neighbors(&mut self, cluster: ClusterId, range: u32) {
        let Ok(in_range) = self.clusters_in_range(cluster, range) else {
            return;
        };
        for other in in_range {
            self.clusters[cluster.index()].add_neighbor(other);
            self.clusters[other.index()].add_neighbor(cluster);
        }
    }

    /// Order each cluster's neighbors nearest first (ties by handle)
    ///
    /// Called once between placement and growth.
    pub fn sort_cluster_neighbors(&mut self) {
        for i in 0..self.clusters.len() {
            let seed = self.clusters[i].seed;
            let mut neighbors = self.clusters[i].neighbors().to_vec();
            neighbors.sort_by_key(|&n| (distance_squared(seed, self.clusters[n.index()].seed), n));
            self.clusters[i].set_neighbors(neighbors);
        }
    }

    pub(crate) fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    /// Per-race fulfillment of the configured quotas
    pub fn summary(&self) -> GenerationSummary {
        let races = self
            .settings
            .races
            .iter()
            .map(|quota| RaceSummary {
                race: quota.race,
                requested_clusters: quota.max_clusters,
                placed_clusters: self.clusters_of(quota.race).count() as u32,
                max_race_size: quota.max_race_size,
                max_cluster_size: quota.max_cluster_size,
                claimed_sectors: self.race_sector_count(quota.race) as u32,
            })
            .collect();

        GenerationSummary {
            races,
            interrupted: self.interrupted,
        }
    }

    /// Build the seed lookup used by [`Universe::nearest_cluster`]
    #[cfg(feature = "spatial-index")]
    pub(crate) fn build_seed_index(&mut self) {
        let seeds: Vec<Coord> = self.clusters.iter().map(|c| c.seed).collect();
        self.seed_index = SpatialIndex::new(&seeds);
    }

    /// Cluster whose seed is nearest to a coordinate (requires spatial-index feature)
    ///
    /// Returns `None` when the universe has no clusters.
    ///
    /// # Example
    ///
    /// ```
    /// # use rust_universe_generator::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// # let universe = UniverseGenerator::from_seed(3).generate(&UniverseSettings::default()).unwrap();
    /// if let Some(id) = universe.nearest_cluster(Coord::new(0, 0)) {
    ///     println!("closest seed to the corner belongs to {:?}", universe.cluster(id).unwrap().race);
    /// }
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn nearest_cluster(&self, coord: Coord) -> Option<ClusterId> {
        match &self.seed_index {
            Some(index) => Some(ClusterId(index.find_nearest(coord))),
            None => self
                .clusters
                .iter()
                .min_by_key(|c| (distance_squared(c.seed, coord), c.id))
                .map(|c| c.id),
        }
    }
}
