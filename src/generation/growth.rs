//! Cluster growth
//!
//! Races take turns, in a fresh random order each round, growing one of their
//! clusters by one sector. Clusters with registered neighbors grow toward the
//! nearest one; isolated clusters grow in a random direction. Growth ends when
//! no race has a cluster that can still grow within its caps.

use std::sync::atomic::AtomicBool;

use tracing::{debug, trace};

use super::{is_cancelled, PhaseOutcome};
use crate::cluster::{Cluster, ClusterId};
use crate::config::Race;
use crate::distance::{distance_squared, Coord};
use crate::error::{Result, UniverseError};
use crate::events::{GenerationEvent, GenerationObserver};
use crate::random::RandomProvider;
use crate::sector::SectorId;
use crate::universe::Universe;

/// Growth bookkeeping for one race
#[derive(Debug)]
struct RaceGrowth {
    race: Race,
    max_race_size: u32,
    claimed: u32,
    growable: Vec<ClusterId>,
}

impl RaceGrowth {
    /// Drop clusters whose frontier was used up or whose cap was reached
    fn refresh(&mut self, universe: &Universe) {
        self.growable
            .retain(|&id| universe.cluster(id).is_some_and(Cluster::can_grow));
    }

    fn is_eligible(&self) -> bool {
        self.claimed < self.max_race_size && !self.growable.is_empty()
    }
}

/// Completion tracking for progress events
struct Progress {
    claimed: usize,
    target: usize,
}

impl Progress {
    fn fraction(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.claimed as f32 / self.target as f32).min(1.0)
    }
}

/// Grow every cluster until no race can grow any further
pub(crate) fn grow_clusters<R, O>(
    universe: &mut Universe,
    rng: &mut R,
    observer: &mut O,
    cancel: Option<&AtomicBool>,
) -> Result<PhaseOutcome>
where
    R: RandomProvider,
    O: GenerationObserver + ?Sized,
{
    let mut races: Vec<RaceGrowth> = universe
        .settings()
        .active_races()
        .map(|quota| RaceGrowth {
            race: quota.race,
            max_race_size: quota.max_race_size,
            claimed: universe.race_sector_count(quota.race) as u32,
            growable: universe
                .clusters_of(quota.race)
                .filter(|c| c.can_grow())
                .map(|c| c.id)
                .collect(),
        })
        .collect();

    let target: usize = universe
        .settings()
        .active_races()
        .map(|quota| {
            let by_clusters = u64::from(quota.max_clusters) * u64::from(quota.max_cluster_size);
            u64::from(quota.max_race_size).min(by_clusters) as usize
        })
        .sum();
    let mut progress = Progress {
        claimed: universe.claimed_count(),
        target: target.min(universe.cell_count()),
    };

    let mut round: Vec<usize> = Vec::with_capacity(races.len());

    loop {
        round.clear();
        for (i, race) in races.iter_mut().enumerate() {
            race.refresh(universe);
            if race.is_eligible() {
                round.push(i);
            }
        }
        if round.is_empty() {
            break;
        }
        if is_cancelled(cancel) {
            return Ok(PhaseOutcome::Interrupted);
        }

        rng.shuffle(&mut round);

        for &index in &round {
            let race = &mut races[index];
            // rivals may have used up this race's frontier earlier in the round
            race.refresh(universe);
            if !race.is_eligible() {
                continue;
            }

            let cluster = race.growable[rng.next_int(race.growable.len())];
            let (sector, coord) = choose_target(universe, cluster, rng)?;
            universe.claim(sector, cluster)?;

            race.claimed += 1;
            progress.claimed += 1;

            let can_grow = universe.cluster(cluster).is_some_and(Cluster::can_grow);
            if !can_grow {
                race.growable.retain(|&id| id != cluster);
            }

            trace!(
                race = race.race.name(),
                cluster = cluster.index(),
                x = coord.x,
                y = coord.y,
                "sector claimed"
            );
            observer.notify(&GenerationEvent::SectorClaimed {
                cluster,
                race: race.race,
                coord,
                progress: progress.fraction(),
            });
        }
    }

    for race in &races {
        debug!(
            race = race.race.name(),
            claimed = race.claimed,
            cap = race.max_race_size,
            "race finished growing"
        );
    }

    Ok(PhaseOutcome::Completed)
}

/// Pick the free sector a cluster expands into
///
/// First the boundary sector to grow from, then one of its free neighbors,
/// both by the same rule (see [`pick_biased`]).
fn choose_target<R: RandomProvider>(
    universe: &Universe,
    cluster: ClusterId,
    rng: &mut R,
) -> Result<(SectorId, Coord)> {
    let owner = universe
        .cluster(cluster)
        .ok_or(UniverseError::ClusterNotFound(cluster.index()))?;
    let toward = owner
        .nearest_neighbor()
        .and_then(|n| universe.cluster(n))
        .map(|n| n.seed);

    let boundary = pick_biased(universe, owner.growable_sectors(), toward, rng).ok_or_else(|| {
        UniverseError::GenerationFailed(format!(
            "cluster {} can grow but has no boundary sector",
            cluster.index()
        ))
    })?;
    let boundary = universe
        .sector_by_id(boundary)
        .ok_or(UniverseError::SectorNotFound(boundary.index()))?;

    let target = pick_biased(universe, boundary.free_neighbors(), toward, rng).ok_or_else(|| {
        UniverseError::GenerationFailed(format!(
            "growable sector ({}, {}) has no free neighbor",
            boundary.coord.x, boundary.coord.y
        ))
    })?;
    let coord = universe
        .sector_by_id(target)
        .ok_or(UniverseError::SectorNotFound(target.index()))?
        .coord;

    Ok((target, coord))
}

/// Closest candidate to `toward` (first one on ties), or a uniformly random
/// candidate when there is nothing to grow toward
///
/// The biased branch draws nothing from the random source.
fn pick_biased<R: RandomProvider>(
    universe: &Universe,
    candidates: &[SectorId],
    toward: Option<Coord>,
    rng: &mut R,
) -> Option<SectorId> {
    if candidates.is_empty() {
        return None;
    }

    match toward {
        Some(target) => candidates.iter().copied().min_by_key(|&id| {
            universe
                .sector_by_id(id)
                .map_or(u32::MAX, |s| distance_squared(s.coord, target))
        }),
        None => Some(candidates[rng.next_int(candidates.len())]),
    }
}
