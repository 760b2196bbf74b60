//! Universe generation
//!
//! Runs seed placement followed by cluster growth on a fresh [`Universe`],
//! reporting progress to an observer and honoring an optional cancel flag
//! between rounds.

mod growth;
mod placement;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn, Level};

use crate::config::UniverseSettings;
use crate::error::Result;
use crate::events::{GenerationEvent, GenerationObserver, GenerationPhase};
use crate::random::{RandomProvider, SeededRandom};
use crate::render::render_ascii;
use crate::universe::Universe;

/// How a phase ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseOutcome {
    Completed,
    Interrupted,
}

pub(crate) fn is_cancelled(flag: Option<&AtomicBool>) -> bool {
    flag.is_some_and(|f| f.load(Ordering::Relaxed))
}

/// Generates universes from settings
///
/// Owns the random source, so consecutive calls to [`generate`](Self::generate)
/// on one generator produce different universes while a freshly seeded
/// generator always reproduces the same one.
///
/// # Examples
///
/// ```
/// use rust_universe_generator::*;
///
/// let settings = UniverseSettings::default();
/// let a = UniverseGenerator::from_seed(7).generate(&settings).unwrap();
/// let b = UniverseGenerator::from_seed(7).generate(&settings).unwrap();
///
/// assert_eq!(render_ascii(&a), render_ascii(&b));
/// ```
pub struct UniverseGenerator<R: RandomProvider = SeededRandom> {
    rng: R,
    cancel: Option<Arc<AtomicBool>>,
}

impl UniverseGenerator<SeededRandom> {
    /// Generator backed by a [`SeededRandom`] with the given seed
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SeededRandom::new(seed))
    }
}

impl<R: RandomProvider> UniverseGenerator<R> {
    /// Generator drawing from any random provider
    pub fn new(rng: R) -> Self {
        Self { rng, cancel: None }
    }

    /// Stop generation at the next round boundary once `flag` is set
    ///
    /// A cancelled run still returns a consistent universe, marked
    /// [`Universe::is_interrupted`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    /// use rust_universe_generator::*;
    ///
    /// let flag = Arc::new(AtomicBool::new(false));
    /// let mut generator = UniverseGenerator::from_seed(1).with_cancel_flag(flag.clone());
    ///
    /// flag.store(true, Ordering::Relaxed);
    /// let universe = generator.generate(&UniverseSettings::default()).unwrap();
    /// assert!(universe.is_interrupted());
    /// ```
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The random source
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Generate a universe, discarding progress events
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the settings fail validation. Other errors
    /// indicate broken internal bookkeeping and should not occur.
    pub fn generate(&mut self, settings: &UniverseSettings) -> Result<Universe> {
        self.generate_with_observer(settings, &mut ())
    }

    /// Generate a universe, reporting every step to `observer`
    ///
    /// # Example
    ///
    /// ```
    /// use rust_universe_generator::*;
    ///
    /// let mut events: Vec<GenerationEvent> = Vec::new();
    /// let universe = UniverseGenerator::from_seed(5)
    ///     .generate_with_observer(&UniverseSettings::default(), &mut events)
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     events.last(),
    ///     Some(&GenerationEvent::Finished {
    ///         clusters: universe.clusters().len(),
    ///         sectors: universe.claimed_count(),
    ///     })
    /// );
    /// ```
    pub fn generate_with_observer<O>(
        &mut self,
        settings: &UniverseSettings,
        observer: &mut O,
    ) -> Result<Universe>
    where
        O: GenerationObserver + ?Sized,
    {
        let start = Instant::now();
        info!(
            width = settings.width,
            height = settings.height,
            races = settings.active_races().count(),
            "generating universe"
        );

        let mut universe = Universe::new(settings.clone())?;
        let cancel = self.cancel.as_deref();

        observer.notify(&GenerationEvent::PhaseStarted(GenerationPhase::Placement));
        let mut outcome = placement::place_seeds(&mut universe, &mut self.rng, observer, cancel)?;

        if outcome == PhaseOutcome::Completed {
            universe.sort_cluster_neighbors();
            debug!(clusters = universe.clusters().len(), "placement finished");
            if tracing::enabled!(Level::DEBUG) {
                debug!("seeds:\n{}", render_ascii(&universe));
            }

            observer.notify(&GenerationEvent::PhaseStarted(GenerationPhase::Growth));
            outcome = growth::grow_clusters(&mut universe, &mut self.rng, observer, cancel)?;
        }

        if outcome == PhaseOutcome::Interrupted {
            universe.mark_interrupted();
            warn!(
                clusters = universe.clusters().len(),
                sectors = universe.claimed_count(),
                "generation cancelled"
            );
        }

        #[cfg(feature = "spatial-index")]
        universe.build_seed_index();

        observer.notify(&GenerationEvent::Finished {
            clusters: universe.clusters().len(),
            sectors: universe.claimed_count(),
        });

        info!(
            clusters = universe.clusters().len(),
            sectors = universe.claimed_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "universe generated"
        );

        Ok(universe)
    }
}
