//! Seed placement
//!
//! Races take turns founding clusters, one seed per race per round, in a fresh
//! random order each round. Seeds of the same race keep a per-race spacing;
//! every seed additionally reserves a small disc that no later seed of any
//! race may use.

use std::sync::atomic::AtomicBool;

use tracing::{debug, trace, warn};

use super::{is_cancelled, PhaseOutcome};
use crate::config::Race;
use crate::distance::{Coord, SpacingThresholds};
use crate::error::{Result, UniverseError};
use crate::events::{GenerationEvent, GenerationObserver};
use crate::free_cells::FreeCells;
use crate::random::RandomProvider;
use crate::universe::Universe;

/// Placement bookkeeping for one race
#[derive(Debug)]
struct SeedQuota {
    race: Race,
    remaining: u32,
    /// Squared-distance budget between two seeds of this race
    min_spacing: u32,
    seeds: Vec<Coord>,
}

/// Found one cluster per requested seed, as far as space allows
///
/// A race with no valid candidate cell left forfeits the rest of its seeds.
pub(crate) fn place_seeds<R, O>(
    universe: &mut Universe,
    rng: &mut R,
    observer: &mut O,
    cancel: Option<&AtomicBool>,
) -> Result<PhaseOutcome>
where
    R: RandomProvider,
    O: GenerationObserver + ?Sized,
{
    let thresholds = SpacingThresholds::for_cell_count(universe.cell_count());
    let (width, height) = (universe.width(), universe.height());

    let mut quotas: Vec<SeedQuota> = universe
        .settings()
        .active_races()
        .map(|quota| SeedQuota {
            race: quota.race,
            remaining: quota.max_clusters,
            min_spacing: thresholds.same_race_for(quota.max_clusters),
            seeds: Vec::with_capacity(quota.max_clusters as usize),
        })
        .collect();

    debug!(
        same_race = thresholds.same_race,
        diff_race = thresholds.diff_race,
        races = quotas.len(),
        "placing cluster seeds"
    );

    let mut free = FreeCells::full(width, height);
    let mut candidates = FreeCells::empty(width, height);
    let mut round: Vec<usize> = Vec::with_capacity(quotas.len());
    let mut round_number = 0u32;

    loop {
        round.clear();
        round.extend((0..quotas.len()).filter(|&i| quotas[i].remaining > 0));
        if round.is_empty() {
            break;
        }
        if is_cancelled(cancel) {
            return Ok(PhaseOutcome::Interrupted);
        }

        round_number += 1;
        rng.shuffle(&mut round);
        trace!(round = round_number, races = round.len(), "placement round");

        for &index in &round {
            let quota = &mut quotas[index];

            candidates.copy_from(&free);
            for &seed in &quota.seeds {
                candidates.remove_within(seed, quota.min_spacing);
            }

            if candidates.is_empty() {
                warn!(
                    race = quota.race.name(),
                    placed = quota.seeds.len(),
                    forfeited = quota.remaining,
                    "no room left for further seeds"
                );
                quota.remaining = 0;
                continue;
            }

            let pick = rng.next_int(candidates.len());
            let seed = candidates.nth(pick).ok_or_else(|| {
                UniverseError::GenerationFailed(format!(
                    "candidate {} of {} vanished",
                    pick,
                    candidates.len()
                ))
            })?;

            let cluster = universe.create_cluster(quota.race, seed)?;
            quota.seeds.push(seed);
            quota.remaining -= 1;

            free.remove(seed);
            free.remove_within(seed, thresholds.diff_race);

            debug!(
                race = quota.race.name(),
                x = seed.x,
                y = seed.y,
                cluster = cluster.index(),
                "seed placed"
            );
            observer.notify(&GenerationEvent::ClusterCreated {
                cluster,
                race: quota.race,
                seed,
            });
        }
    }

    Ok(PhaseOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RaceSettings, UniverseSettings, UniverseSettingsBuilder};
    use crate::distance::distance_squared;
    use crate::random::SeededRandom;

    fn place(settings: UniverseSettings, seed: u64) -> Universe {
        let mut universe = Universe::new(settings).unwrap();
        let mut rng = SeededRandom::new(seed);
        let outcome = place_seeds(&mut universe, &mut rng, &mut (), None).unwrap();
        assert_eq!(outcome, PhaseOutcome::Completed);
        universe
    }

    #[test]
    fn test_places_requested_seeds() {
        let settings = UniverseSettingsBuilder::new()
            .dimensions(20, 20)
            .unwrap()
            .race(RaceSettings::new(Race::Argon, 10, 3, 5))
            .unwrap()
            .race(RaceSettings::new(Race::Boron, 10, 2, 5))
            .unwrap()
            .build()
            .unwrap();

        let universe = place(settings, 1);
        assert_eq!(universe.clusters_of(Race::Argon).count(), 3);
        assert_eq!(universe.clusters_of(Race::Boron).count(), 2);
        // placement claims only seeds
        assert_eq!(universe.claimed_count(), 5);
        assert!(universe.clusters().iter().all(|c| c.size() == 1));
    }

    #[test]
    fn test_inactive_race_gets_nothing() {
        let settings = UniverseSettingsBuilder::new()
            .dimensions(10, 10)
            .unwrap()
            .race(RaceSettings::new(Race::Argon, 10, 2, 5))
            .unwrap()
            .race(RaceSettings::new(Race::Xenon, 0, 0, 0))
            .unwrap()
            .build()
            .unwrap();

        let universe = place(settings, 9);
        assert_eq!(universe.clusters_of(Race::Xenon).count(), 0);
        assert_eq!(universe.clusters().len(), 2);
    }

    #[test]
    fn test_same_race_spacing() {
        let settings = UniverseSettingsBuilder::new()
            .dimensions(22, 17)
            .unwrap()
            .race(RaceSettings::new(Race::Paranid, 20, 2, 10))
            .unwrap()
            .build()
            .unwrap();
        // 374 cells: base 13, two clusters -> 13
        let min = SpacingThresholds::for_cell_count(374).same_race_for(2);
        assert_eq!(min, 13);

        for seed in 0..20 {
            let universe = place(settings.clone(), seed);
            let seeds: Vec<Coord> = universe.clusters().iter().map(|c| c.seed).collect();
            assert_eq!(seeds.len(), 2);
            assert!(distance_squared(seeds[0], seeds[1]) >= min);
        }
    }

    #[test]
    fn test_crowded_grid_forfeits_without_hanging() {
        // 1600 cells give a different-race budget of 6, so seeds need
        // pairwise squared distance >= 6. Their radius-1 plus shapes are then
        // disjoint, which caps the grid at well under 800 seeds.
        let settings = UniverseSettingsBuilder::new()
            .dimensions(40, 40)
            .unwrap()
            .race(RaceSettings::new(Race::Argon, 400, 400, 1))
            .unwrap()
            .race(RaceSettings::new(Race::Boron, 400, 400, 1))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(SpacingThresholds::for_cell_count(1600).diff_race, 6);

        let universe = place(settings, 4);
        let summary = universe.summary();
        assert!(summary.total_clusters() < 800);
        assert!(summary.shortfalls().count() >= 1);

        let seeds: Vec<Coord> = universe.clusters().iter().map(|c| c.seed).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert!(distance_squared(*a, *b) >= 6);
            }
        }
    }

    #[test]
    fn test_cancel_before_first_round() {
        let settings = UniverseSettings::default();
        let mut universe = Universe::new(settings).unwrap();
        let mut rng = SeededRandom::new(0);
        let flag = AtomicBool::new(true);

        let outcome = place_seeds(&mut universe, &mut rng, &mut (), Some(&flag)).unwrap();
        assert_eq!(outcome, PhaseOutcome::Interrupted);
        assert!(universe.clusters().is_empty());
    }

    #[test]
    fn test_emits_cluster_created() {
        let settings = UniverseSettingsBuilder::new()
            .dimensions(10, 10)
            .unwrap()
            .race(RaceSettings::new(Race::Split, 10, 3, 4))
            .unwrap()
            .build()
            .unwrap();
        let mut universe = Universe::new(settings).unwrap();
        let mut rng = SeededRandom::new(2);
        let mut events: Vec<GenerationEvent> = Vec::new();

        place_seeds(&mut universe, &mut rng, &mut events, None).unwrap();

        let created: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GenerationEvent::ClusterCreated { cluster, seed, .. } => Some((*cluster, *seed)),
                _ => None,
            })
            .collect();
        assert_eq!(created.len(), universe.clusters().len());
        for (id, seed) in created {
            assert_eq!(universe.cluster(id).unwrap().seed, seed);
        }
    }
}
